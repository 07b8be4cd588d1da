mod common;

use common::{MockGateway, Reply};
use obdhud_core::prelude::*;
use obdhud_core::resolver::FALLBACK;

#[test]
fn test_unsupported_returns_fallback_without_query() {
    let mut gateway = MockGateway::connected()
        .with_supported(&[])
        .with_all(Reply::Value(50.0));

    for id in MeasurementId::ALL {
        let value = query_display(&mut gateway, id);
        assert_eq!(value.as_str(), FALLBACK);
    }
    assert!(gateway.queries.is_empty());
}

#[test]
fn test_unsupported_resolution_variant() {
    let mut gateway = MockGateway::connected().with_supported(&[MeasurementId::Rpm]);
    assert!(matches!(
        resolve(&mut gateway, MeasurementId::Speed),
        Resolution::Unsupported
    ));
}

#[test]
fn test_supported_value_is_truncated() {
    let mut gateway = MockGateway::connected().with_reply(MeasurementId::Speed, Reply::Value(50.0));
    assert_eq!(query_display(&mut gateway, MeasurementId::Speed).as_str(), "50");

    let mut gateway = MockGateway::connected().with_reply(MeasurementId::Speed, Reply::Value(50.9));
    assert_eq!(query_display(&mut gateway, MeasurementId::Speed).as_str(), "50");
}

#[test]
fn test_negative_value_truncates_towards_zero() {
    let mut gateway =
        MockGateway::connected().with_reply(MeasurementId::CoolantTemp, Reply::Value(-7.6));
    assert_eq!(
        query_display(&mut gateway, MeasurementId::CoolantTemp).as_str(),
        "-7"
    );
}

#[test]
fn test_timeout_returns_fallback() {
    let mut gateway = MockGateway::connected().with_reply(MeasurementId::Rpm, Reply::Timeout);
    let resolution = resolve(&mut gateway, MeasurementId::Rpm);
    assert!(matches!(resolution, Resolution::Fault(GatewayError::Timeout)));
    assert_eq!(resolution.into_display().as_str(), "0");
}

#[test]
fn test_io_error_returns_fallback() {
    let mut gateway = MockGateway::connected().with_reply(MeasurementId::Rpm, Reply::Io);
    assert_eq!(query_display(&mut gateway, MeasurementId::Rpm).as_str(), "0");
}

#[test]
fn test_null_payload_returns_fallback() {
    let mut gateway = MockGateway::connected().with_reply(MeasurementId::Rpm, Reply::Null);
    let resolution = resolve(&mut gateway, MeasurementId::Rpm);
    assert!(matches!(resolution, Resolution::NullPayload));
    assert_eq!(resolution.into_display().as_str(), "0");
}

#[test]
fn test_non_finite_value_returns_fallback() {
    let mut gateway =
        MockGateway::connected().with_reply(MeasurementId::Rpm, Reply::Value(f64::NAN));
    assert!(matches!(
        resolve(&mut gateway, MeasurementId::Rpm),
        Resolution::Fault(GatewayError::MalformedResponse(_))
    ));
}

#[test]
fn test_exactly_one_query_per_call() {
    let mut gateway = MockGateway::connected().with_reply(MeasurementId::Rpm, Reply::Timeout);
    let _ = query_display(&mut gateway, MeasurementId::Rpm);
    assert_eq!(gateway.queries, vec![MeasurementId::Rpm]);
}

#[test]
fn test_resolver_is_idempotent() {
    let mut gateway = MockGateway::connected()
        .with_supported(&[MeasurementId::Speed, MeasurementId::Rpm])
        .with_reply(MeasurementId::Speed, Reply::Value(88.4));
    let supported_before = gateway.supported.clone();

    for id in MeasurementId::ALL {
        let first = query_display(&mut gateway, id);
        let second = query_display(&mut gateway, id);
        assert_eq!(first, second);
    }
    assert_eq!(gateway.supported, supported_before);
    assert_eq!(gateway.state(), ConnectionState::Connected);
}

#[test]
fn test_demo_gateway_values_are_integers() {
    let config = DemoConfig {
        seed: Some(42),
        ..DemoConfig::default()
    };
    let mut gateway = DemoGateway::connect(&config);
    for id in MeasurementId::ALL {
        let value = query_display(&mut gateway, id);
        assert!(value.as_integer().is_some(), "{id} gave {value}");
    }
}
