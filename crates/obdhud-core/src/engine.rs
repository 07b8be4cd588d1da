//! Polling Engine
//!
//! Owns the recurring fetch cycle. Every tick resolves the four tracked
//! measurements, pushes them to the display surface, applies the coolant
//! band color, then polls the link state: a live link re-arms the timer,
//! a dead one tears the surface down and ends the loop for good.

use std::time::Duration;

use crate::classify::{classify, TemperatureBand};
use crate::display::{DisplaySurface, TextField};
use crate::gateway::{ConnectionState, Gateway, MeasurementId};
use crate::resolver::{query_display, DisplayValue};

/// Default delay between ticks in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Suffix appended to the throttle readout
pub const THROTTLE_SUFFIX: &str = "%";

/// Suffix appended to the temperature readout
pub const TEMPERATURE_SUFFIX: &str = "°C";

/// The value set rendered on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashValues {
    /// Vehicle speed (km/h)
    pub speed: DisplayValue,
    /// Throttle position (%)
    pub throttle: DisplayValue,
    /// Engine speed
    pub rpm: DisplayValue,
    /// Latest coolant reading; the only value the band is derived from
    pub coolant: DisplayValue,
}

impl DashValues {
    /// Text for the speed field
    pub fn speed_text(&self) -> String {
        self.speed.to_string()
    }

    /// Text for the throttle field
    pub fn throttle_text(&self) -> String {
        format!("{}{}", self.throttle, THROTTLE_SUFFIX)
    }

    /// Text for the RPM field
    pub fn rpm_text(&self) -> String {
        self.rpm.to_string()
    }

    /// Text for the temperature field
    pub fn temperature_text(&self) -> String {
        format!("{}{}", self.coolant, TEMPERATURE_SUFFIX)
    }

    /// Throttle bar level, clamped to 0-100
    pub fn throttle_progress(&self) -> u8 {
        self.throttle.as_integer().unwrap_or(0).clamp(0, 100) as u8
    }

    /// Coolant band, recomputed on every call
    pub fn band(&self) -> TemperatureBand {
        classify(self.coolant.as_str())
    }
}

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Not started, or the vehicle was not connected at startup
    Idle,
    /// Ticking
    Running,
    /// Terminal; the surface has been torn down
    Stopped,
}

/// What the loop does after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Run the next tick after this delay
    Reschedule(Duration),
    /// No further ticks
    Stopped,
}

/// Recurring poll of a gateway into a display surface
pub struct PollingEngine<G, S> {
    gateway: G,
    surface: S,
    values: DashValues,
    state: EngineState,
    interval: Duration,
    ticks: u64,
    torn_down: bool,
}

impl<G: Gateway, S: DisplaySurface> PollingEngine<G, S> {
    /// Create an engine with the default 100 ms cadence
    pub fn new(gateway: G, surface: S) -> Self {
        Self {
            gateway,
            surface,
            values: DashValues::default(),
            state: EngineState::Idle,
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ticks: 0,
            torn_down: false,
        }
    }

    /// Override the delay between ticks
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Render the defaults and start ticking if the vehicle is connected.
    ///
    /// Without a connection the engine stays [`EngineState::Idle`] and the
    /// display keeps its defaults.
    pub fn start(&mut self) -> EngineState {
        if self.state != EngineState::Idle {
            return self.state;
        }

        // Defaults render white; only a resolved reading is classified
        self.push_values(TemperatureBand::Normal);

        match self.gateway.state() {
            ConnectionState::Connected => {
                tracing::info!(
                    interval_ms = self.interval.as_millis() as u64,
                    supported = self.gateway.supported().len(),
                    "polling engine started"
                );
                self.state = EngineState::Running;
            }
            ConnectionState::Disconnected => {
                tracing::info!("vehicle not connected, display stays at defaults");
            }
        }
        self.state
    }

    /// Run a single tick
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != EngineState::Running {
            return TickOutcome::Stopped;
        }

        let throttle = query_display(&mut self.gateway, MeasurementId::ThrottlePos);
        let rpm = query_display(&mut self.gateway, MeasurementId::Rpm);
        let coolant = query_display(&mut self.gateway, MeasurementId::CoolantTemp);
        let speed = query_display(&mut self.gateway, MeasurementId::Speed);

        self.values = DashValues {
            speed,
            throttle,
            rpm,
            coolant,
        };
        self.push_values(self.values.band());
        self.ticks += 1;

        match self.gateway.state() {
            ConnectionState::Connected => {
                tracing::trace!(tick = self.ticks, "next tick scheduled");
                TickOutcome::Reschedule(self.interval)
            }
            ConnectionState::Disconnected => {
                tracing::info!(ticks = self.ticks, "vehicle link lost, closing display");
                self.stop();
                TickOutcome::Stopped
            }
        }
    }

    /// Tick until the link drops. Returns the final state.
    pub async fn run(&mut self) -> EngineState {
        loop {
            match self.tick() {
                TickOutcome::Reschedule(delay) => tokio::time::sleep(delay).await,
                TickOutcome::Stopped => return self.state,
            }
        }
    }

    /// End the session on user request. Tears the surface down unless that
    /// already happened.
    pub fn shutdown(&mut self) {
        if self.state != EngineState::Stopped {
            tracing::info!(ticks = self.ticks, "shutdown requested");
        }
        self.stop();
    }

    fn stop(&mut self) {
        self.state = EngineState::Stopped;
        if !self.torn_down {
            self.torn_down = true;
            self.surface.teardown();
        }
    }

    fn push_values(&mut self, band: TemperatureBand) {
        let values = &self.values;
        self.surface.set_text(TextField::Speed, &values.speed_text());
        self.surface.set_text(TextField::Throttle, &values.throttle_text());
        self.surface.set_text(TextField::Rpm, &values.rpm_text());
        self.surface.set_text(TextField::Temperature, &values.temperature_text());
        self.surface.set_progress(values.throttle_progress());
        self.surface.set_classification(band);
        self.surface.refresh();
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Values rendered by the latest tick
    pub fn values(&self) -> &DashValues {
        &self.values
    }

    /// Number of completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Delay between ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Borrow the gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Borrow the surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Take the collaborators back
    pub fn into_parts(self) -> (G, S) {
        (self.gateway, self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(speed: i64, throttle: i64, rpm: i64, coolant: i64) -> DashValues {
        DashValues {
            speed: DisplayValue::from_integer(speed),
            throttle: DisplayValue::from_integer(throttle),
            rpm: DisplayValue::from_integer(rpm),
            coolant: DisplayValue::from_integer(coolant),
        }
    }

    #[test]
    fn test_default_texts() {
        let v = DashValues::default();
        assert_eq!(v.speed_text(), "0");
        assert_eq!(v.throttle_text(), "0%");
        assert_eq!(v.rpm_text(), "0");
        assert_eq!(v.temperature_text(), "0°C");
        assert_eq!(v.throttle_progress(), 0);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(values(0, 150, 0, 0).throttle_progress(), 100);
        assert_eq!(values(0, -3, 0, 0).throttle_progress(), 0);
        assert_eq!(values(0, 42, 0, 0).throttle_progress(), 42);
    }

    #[test]
    fn test_band_follows_coolant() {
        assert_eq!(values(0, 0, 0, 40).band(), TemperatureBand::Cold);
        assert_eq!(values(0, 0, 0, 90).band(), TemperatureBand::Normal);
        assert_eq!(values(0, 0, 0, 125).band(), TemperatureBand::Hot);
    }
}
