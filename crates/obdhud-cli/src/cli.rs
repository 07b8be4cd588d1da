//! Command-line interface

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use obdhud_core::config::{ConfigError, HudConfig};
use obdhud_core::gateway::MeasurementId;

/// Full-screen OBD-II heads-up display
#[derive(Parser, Debug)]
#[command(name = "obdhud", version, about, long_about = None)]
pub struct Cli {
    /// Shows the frame borders to help with the placement of the UI elements
    #[arg(long)]
    pub debug: bool,

    /// Orients the UI at the bottom of the screen to support larger screens
    #[arg(long, alias = "bottom_orientation")]
    pub bottom_orientation: bool,

    /// Config file (defaults to <config dir>/obdhud/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Delay between polling ticks in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Simulated link drops after this many seconds
    #[arg(long, value_name = "SECS")]
    pub demo_link_secs: Option<u64>,

    /// Probability (0.0-1.0) that a simulated query times out
    #[arg(long, value_name = "RATE")]
    pub demo_fault_rate: Option<f64>,

    /// Measurements the simulated vehicle does not support (comma separated)
    #[arg(long, value_name = "IDS", value_delimiter = ',')]
    pub demo_unsupported: Vec<MeasurementId>,

    /// RNG seed for a reproducible simulation
    #[arg(long, value_name = "SEED")]
    pub demo_seed: Option<u64>,

    /// Save the merged settings to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Config file location
    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => HudConfig::default_path(),
        }
    }

    /// Overlay command-line flags on top of file settings
    pub fn apply(&self, config: &mut HudConfig) {
        if self.debug {
            config.debug_layout = true;
        }
        if self.bottom_orientation {
            config.bottom_orientation = true;
        }
        if let Some(ms) = self.interval_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(secs) = self.demo_link_secs {
            config.demo.link_duration_secs = Some(secs);
        }
        if let Some(rate) = self.demo_fault_rate {
            config.demo.fault_rate = rate;
        }
        if !self.demo_unsupported.is_empty() {
            config.demo.unsupported = self.demo_unsupported.clone();
        }
        if let Some(seed) = self.demo_seed {
            config.demo.seed = Some(seed);
        }
    }
}
