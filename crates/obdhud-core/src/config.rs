//! Dashboard configuration
//!
//! Settings are stored as pretty-printed JSON, by default under
//! `<config_dir>/obdhud/config.json`. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::display::SurfaceOptions;
use crate::engine::DEFAULT_POLL_INTERVAL_MS;
use crate::gateway::DemoConfig;

/// Config file name inside the application directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors loading or saving the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Delay between polling ticks
    pub poll_interval_ms: u64,
    /// Draw frame borders
    pub debug_layout: bool,
    /// Anchor the dashboard to the bottom of the screen
    pub bottom_orientation: bool,
    /// Simulated vehicle settings
    pub demo: DemoConfig,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            debug_layout: false,
            bottom_orientation: false,
            demo: DemoConfig::default(),
        }
    }
}

impl HudConfig {
    /// Default config file location
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("obdhud").join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                let config: HudConfig = serde_json::from_str(&content)?;
                config.validate()?;
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.demo.fault_rate) {
            return Err(ConfigError::Invalid(format!(
                "demo.fault_rate must be within 0.0-1.0, got {}",
                self.demo.fault_rate
            )));
        }
        Ok(())
    }

    /// Tick delay
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Flags for the display surface
    pub fn surface_options(&self) -> SurfaceOptions {
        SurfaceOptions {
            debug_layout: self.debug_layout,
            bottom_orientation: self.bottom_orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HudConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.surface_options(), SurfaceOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: HudConfig = serde_json::from_str(r#"{"debug_layout": true}"#).unwrap();
        assert!(config.debug_layout);
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.demo, DemoConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = HudConfig {
            poll_interval_ms: 0,
            ..HudConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_bad_fault_rate() {
        let mut config = HudConfig::default();
        config.demo.fault_rate = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
