//! Diagnostics Gateway
//!
//! Abstraction over the live diagnostics link to the vehicle.
//!
//! The gateway owns the connection state and the set of measurements the
//! vehicle answers. The polling engine only reads them.

pub mod demo;
mod error;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub use demo::{DemoConfig, DemoGateway};
pub use error::GatewayError;

/// Result of a successful query: a numeric magnitude, or nothing
pub type RawReading = Option<f64>;

/// Identifier of a tracked sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasurementId {
    /// Vehicle speed (km/h)
    Speed,
    /// Absolute throttle position (%)
    ThrottlePos,
    /// Engine speed (rev/min)
    Rpm,
    /// Engine coolant temperature (°C)
    CoolantTemp,
}

impl MeasurementId {
    /// Every measurement the dashboard tracks
    pub const ALL: [MeasurementId; 4] = [
        MeasurementId::Speed,
        MeasurementId::ThrottlePos,
        MeasurementId::Rpm,
        MeasurementId::CoolantTemp,
    ];

    /// Canonical upper-case name (matches the serialized form)
    pub fn name(self) -> &'static str {
        match self {
            MeasurementId::Speed => "SPEED",
            MeasurementId::ThrottlePos => "THROTTLE_POS",
            MeasurementId::Rpm => "RPM",
            MeasurementId::CoolantTemp => "COOLANT_TEMP",
        }
    }

    /// SAE J1979 mode 01 PID number
    pub fn pid(self) -> u8 {
        match self {
            MeasurementId::Speed => 0x0D,
            MeasurementId::ThrottlePos => 0x11,
            MeasurementId::Rpm => 0x0C,
            MeasurementId::CoolantTemp => 0x05,
        }
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for MeasurementId {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_uppercase();
        MeasurementId::ALL
            .into_iter()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| GatewayError::MalformedResponse(format!("unknown measurement '{s}'")))
    }
}

/// Set of measurements the connected vehicle can answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedSet {
    ids: HashSet<MeasurementId>,
}

impl SupportedSet {
    /// Empty set (nothing supported)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set containing every tracked measurement
    pub fn all() -> Self {
        MeasurementId::ALL.into_iter().collect()
    }

    /// Check membership
    pub fn contains(&self, id: MeasurementId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of supported measurements
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is supported
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate supported ids (unordered)
    pub fn iter(&self) -> impl Iterator<Item = MeasurementId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<MeasurementId> for SupportedSet {
    fn from_iter<I: IntoIterator<Item = MeasurementId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Connection state of the diagnostics link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Link up, queries are answered
    Connected,
    /// Link down
    Disconnected,
}

impl ConnectionState {
    /// Convenience check
    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }
}

/// A live diagnostics link
///
/// Implementations own the supported set and the connection state; both may
/// only change when the link is (re)established.
pub trait Gateway {
    /// Current link state. Polled once per tick.
    fn state(&self) -> ConnectionState;

    /// Measurements this link can answer
    fn supported(&self) -> &SupportedSet;

    /// Point-in-time query for one measurement
    fn query(&mut self, id: MeasurementId) -> Result<RawReading, GatewayError>;
}

impl<G: Gateway + ?Sized> Gateway for Box<G> {
    fn state(&self) -> ConnectionState {
        (**self).state()
    }

    fn supported(&self) -> &SupportedSet {
        (**self).supported()
    }

    fn query(&mut self, id: MeasurementId) -> Result<RawReading, GatewayError> {
        (**self).query(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_names_round_trip() {
        for id in MeasurementId::ALL {
            assert_eq!(id.name().parse::<MeasurementId>().unwrap(), id);
        }
        assert_eq!(
            "throttle-pos".parse::<MeasurementId>().unwrap(),
            MeasurementId::ThrottlePos
        );
        assert!("OIL_TEMP".parse::<MeasurementId>().is_err());
    }

    #[test]
    fn test_measurement_serde_name() {
        let json = serde_json::to_string(&MeasurementId::CoolantTemp).unwrap();
        assert_eq!(json, "\"COOLANT_TEMP\"");
    }

    #[test]
    fn test_supported_set_membership() {
        let set: SupportedSet = [MeasurementId::Speed, MeasurementId::Rpm]
            .into_iter()
            .collect();
        assert!(set.contains(MeasurementId::Speed));
        assert!(!set.contains(MeasurementId::CoolantTemp));
        assert_eq!(set.len(), 2);
        assert_eq!(SupportedSet::all().len(), 4);
        assert!(SupportedSet::new().is_empty());
    }

    #[test]
    fn test_connection_state() {
        assert!(ConnectionState::Connected.is_connected());
        assert!(!ConnectionState::Disconnected.is_connected());
    }
}
