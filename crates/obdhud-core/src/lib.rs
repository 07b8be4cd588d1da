//! # obdhud Core Library
//!
//! Polling engine for a full-screen vehicle dashboard overlay.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - The diagnostics gateway abstraction and a simulated vehicle
//! - Fault-tolerant resolution of sensor readings into display strings
//! - Coolant temperature classification
//! - The self-rescheduling polling loop that drives a display surface
//! - JSON configuration
//!
//! ## Example
//!
//! ```rust,ignore
//! use obdhud_core::prelude::*;
//!
//! let gateway = DemoGateway::connect(&DemoConfig::default());
//! let mut engine = PollingEngine::new(gateway, my_surface);
//! if engine.start() == EngineState::Running {
//!     engine.run().await;
//! }
//! ```

pub mod classify;
pub mod config;
pub mod display;
pub mod engine;
pub mod gateway;
pub mod resolver;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::classify::{classify, TemperatureBand};
    pub use crate::config::{ConfigError, HudConfig};
    pub use crate::display::{DisplaySurface, SurfaceOptions, TextField};
    pub use crate::engine::{DashValues, EngineState, PollingEngine, TickOutcome};
    pub use crate::gateway::{
        ConnectionState, DemoConfig, DemoGateway, Gateway, GatewayError, MeasurementId,
        RawReading, SupportedSet,
    };
    pub use crate::resolver::{query_display, resolve, DisplayValue, Resolution};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
