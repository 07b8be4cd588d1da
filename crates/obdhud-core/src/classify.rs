//! Coolant temperature classification
//!
//! Thresholds are compile-time constants; the band → color mapping is a
//! static table.

use serde::{Deserialize, Serialize};

/// Readings strictly below this are cold (°C)
pub const COOLANT_COLD_BELOW: i64 = 60;

/// Readings strictly above this are hot (°C)
pub const COOLANT_HOT_ABOVE: i64 = 120;

const _: () = assert!(COOLANT_COLD_BELOW < COOLANT_HOT_ABOVE);

/// Three-way coolant temperature band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureBand {
    /// Engine still warming up
    Cold,
    /// Operating range
    Normal,
    /// Overheating
    Hot,
}

/// Display color of a band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandColor {
    /// CSS-style color name
    pub name: &'static str,
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

const COLD_COLOR: BandColor = BandColor {
    name: "dodgerblue",
    r: 30,
    g: 144,
    b: 255,
};
const NORMAL_COLOR: BandColor = BandColor {
    name: "white",
    r: 255,
    g: 255,
    b: 255,
};
const HOT_COLOR: BandColor = BandColor {
    name: "red",
    r: 255,
    g: 0,
    b: 0,
};

impl TemperatureBand {
    /// Band for an integer reading in °C
    pub fn from_celsius(value: i64) -> Self {
        if value < COOLANT_COLD_BELOW {
            TemperatureBand::Cold
        } else if value > COOLANT_HOT_ABOVE {
            TemperatureBand::Hot
        } else {
            TemperatureBand::Normal
        }
    }

    /// Foreground color for the temperature readout
    pub fn color(self) -> BandColor {
        match self {
            TemperatureBand::Cold => COLD_COLOR,
            TemperatureBand::Normal => NORMAL_COLOR,
            TemperatureBand::Hot => HOT_COLOR,
        }
    }
}

/// Classify a coolant display string.
///
/// Text that does not parse as an integer (e.g. a surface default like
/// `"--"`) is treated as [`TemperatureBand::Normal`].
pub fn classify(coolant: &str) -> TemperatureBand {
    match coolant.trim().parse::<i64>() {
        Ok(value) => TemperatureBand::from_celsius(value),
        Err(_) => TemperatureBand::Normal,
    }
}
