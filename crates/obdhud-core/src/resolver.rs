//! Safe query resolution
//!
//! Turns a gateway query into a [`DisplayValue`] that is always defined.
//! Unsupported measurements, query faults, empty payloads and unusable
//! magnitudes all degrade to the fallback `"0"`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gateway::{Gateway, GatewayError, MeasurementId};

/// Value shown when a measurement cannot be resolved
pub const FALLBACK: &str = "0";

/// Normalized string shown on the display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayValue(String);

impl DisplayValue {
    /// The fallback value `"0"`
    pub fn fallback() -> Self {
        DisplayValue(FALLBACK.to_string())
    }

    /// Decimal form of an integer reading
    pub fn from_integer(value: i64) -> Self {
        DisplayValue(value.to_string())
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer form, if the text parses as one
    pub fn as_integer(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DisplayValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of resolving one measurement
#[derive(Debug)]
pub enum Resolution {
    /// Query answered with a usable magnitude (already truncated)
    Value(i64),
    /// Measurement not in the supported set; no query was made
    Unsupported,
    /// Query answered without a magnitude
    NullPayload,
    /// Query raised a fault
    Fault(GatewayError),
}

impl Resolution {
    /// Collapse into the value shown on screen
    pub fn into_display(self) -> DisplayValue {
        match self {
            Resolution::Value(v) => DisplayValue::from_integer(v),
            Resolution::Unsupported | Resolution::NullPayload | Resolution::Fault(_) => {
                DisplayValue::fallback()
            }
        }
    }

    /// True when the fallback will be shown
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Resolution::Value(_))
    }
}

/// Truncate a magnitude towards zero. Non-finite or out-of-range input is
/// reported as malformed.
pub fn truncate_magnitude(magnitude: f64) -> Result<i64, GatewayError> {
    if !magnitude.is_finite() {
        return Err(GatewayError::MalformedResponse(format!(
            "non-finite magnitude {magnitude}"
        )));
    }
    let truncated = magnitude.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(GatewayError::MalformedResponse(format!(
            "magnitude {magnitude} out of range"
        )));
    }
    Ok(truncated as i64)
}

/// Resolve one measurement against the gateway
///
/// Issues at most one query, and none at all for an unsupported id.
pub fn resolve<G: Gateway + ?Sized>(gateway: &mut G, id: MeasurementId) -> Resolution {
    if !gateway.supported().contains(id) {
        tracing::debug!(measurement = %id, "measurement not supported, skipping query");
        return Resolution::Unsupported;
    }

    match gateway.query(id) {
        Ok(Some(magnitude)) => match truncate_magnitude(magnitude) {
            Ok(value) => Resolution::Value(value),
            Err(e) => {
                tracing::warn!(measurement = %id, "query returned unusable value: {e}");
                Resolution::Fault(e)
            }
        },
        Ok(None) => {
            tracing::warn!(measurement = %id, "query returned no value");
            Resolution::NullPayload
        }
        Err(e) => {
            tracing::warn!(measurement = %id, "error querying measurement: {e}");
            Resolution::Fault(e)
        }
    }
}

/// Resolve straight to the on-screen value
pub fn query_display<G: Gateway + ?Sized>(gateway: &mut G, id: MeasurementId) -> DisplayValue {
    resolve(gateway, id).into_display()
}
