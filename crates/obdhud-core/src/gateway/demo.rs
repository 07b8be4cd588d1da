//! Demo Gateway - Simulated vehicle for running the dashboard without a car
//!
//! Simulates an engine idling at ~850 RPM with random throttle blips, a slowly
//! varying road speed and a coolant warm-up curve. Optional knobs drop
//! measurements from the supported set, inject query faults, and cut the link
//! after a fixed time so the degraded paths can be exercised on a desk.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::{ConnectionState, Gateway, GatewayError, MeasurementId, RawReading, SupportedSet};

const IDLE_RPM: f64 = 850.0;
const RAMP_UP_MS: u64 = 300;
const HOLD_MS: u64 = 200;
const RAMP_DOWN_MS: u64 = 800;

/// Demo gateway settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Seconds until the simulated link drops (None = never)
    pub link_duration_secs: Option<u64>,
    /// Measurements the simulated vehicle does not answer
    pub unsupported: Vec<MeasurementId>,
    /// Probability (0.0 - 1.0) that a single query times out
    pub fault_rate: f64,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            link_duration_secs: None,
            unsupported: Vec::new(),
            fault_rate: 0.0,
            seed: None,
        }
    }
}

/// One instant of simulated vehicle state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshot {
    /// Road speed (km/h)
    pub speed_kmh: f64,
    /// Throttle opening (%)
    pub throttle_pct: f64,
    /// Engine speed
    pub rpm: f64,
    /// Coolant temperature (°C)
    pub coolant_c: f64,
}

impl VehicleSnapshot {
    /// Value of one measurement
    pub fn get(&self, id: MeasurementId) -> f64 {
        match id {
            MeasurementId::Speed => self.speed_kmh,
            MeasurementId::ThrottlePos => self.throttle_pct,
            MeasurementId::Rpm => self.rpm,
            MeasurementId::CoolantTemp => self.coolant_c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlipState {
    /// Engine idling normally
    Idle,
    /// Throttle opening, RPM rising
    RampUp { start_ms: u64 },
    /// At peak RPM, holding
    Hold { start_ms: u64 },
    /// Throttle closing, RPM falling
    RampDown { start_ms: u64 },
}

/// Engine and road model behind [`DemoGateway`]
pub struct VehicleSimulator {
    last_update_ms: Option<u64>,
    next_blip_at_ms: u64,
    blip_state: BlipState,
    current_rpm: f64,
    blip_target_rpm: f64,
    rng: StdRng,
}

impl VehicleSimulator {
    /// Create a simulator driven by the given RNG
    pub fn new(mut rng: StdRng) -> Self {
        let first_blip = rng.gen_range(8000..15000);
        Self {
            last_update_ms: None,
            next_blip_at_ms: first_blip,
            blip_state: BlipState::Idle,
            current_rpm: IDLE_RPM,
            blip_target_rpm: IDLE_RPM,
            rng,
        }
    }

    /// Advance the model to `elapsed_ms` since the link came up
    pub fn update(&mut self, elapsed_ms: u64) -> VehicleSnapshot {
        let delta_ms = self
            .last_update_ms
            .map(|last| elapsed_ms.saturating_sub(last))
            .unwrap_or(0);
        self.last_update_ms = Some(elapsed_ms);

        self.update_blip_state(elapsed_ms);
        let target_rpm = self.target_rpm(elapsed_ms);

        // RPM/sec slew limits
        let rpm_rate = if target_rpm > self.current_rpm { 8000.0 } else { 3000.0 };
        let max_change = rpm_rate * (delta_ms as f64 / 1000.0);
        self.current_rpm += (target_rpm - self.current_rpm).clamp(-max_change, max_change);

        let t = elapsed_ms as f64 / 1000.0;
        let idle_wobble = if matches!(self.blip_state, BlipState::Idle) {
            20.0 * (t * 2.5).sin() + 10.0 * (t * 7.3).sin()
        } else {
            0.0
        };
        let rpm = (self.current_rpm + idle_wobble).max(0.0);

        let blip_progress = if self.blip_target_rpm > IDLE_RPM {
            ((self.current_rpm - IDLE_RPM) / (self.blip_target_rpm - IDLE_RPM)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let throttle = match self.blip_state {
            BlipState::Idle => 1.5 + 1.0 * (t * 0.3).sin().abs(),
            BlipState::RampUp { .. } => 2.0 + blip_progress * 45.0,
            BlipState::Hold { .. } => 45.0 + 5.0 * (t * 3.0).sin(),
            BlipState::RampDown { .. } => 2.0 + blip_progress * 40.0,
        };

        let cruise = 45.0 + 15.0 * (t / 20.0).sin();
        let speed = cruise + (rpm - IDLE_RPM).max(0.0) / 100.0;

        // Warm-up from ambient towards ~90 °C
        let coolant = 20.0 + 70.0 * (1.0 - (-t / 120.0).exp());

        VehicleSnapshot {
            speed_kmh: speed.clamp(0.0, 250.0),
            throttle_pct: throttle.clamp(0.0, 100.0),
            rpm,
            coolant_c: coolant,
        }
    }

    fn update_blip_state(&mut self, now_ms: u64) {
        match self.blip_state {
            BlipState::Idle => {
                if now_ms >= self.next_blip_at_ms {
                    self.blip_target_rpm = self.rng.gen_range(2000.0..4000.0);
                    self.blip_state = BlipState::RampUp { start_ms: now_ms };
                }
            }
            BlipState::RampUp { start_ms } => {
                if now_ms >= start_ms + RAMP_UP_MS {
                    self.blip_state = BlipState::Hold { start_ms: now_ms };
                }
            }
            BlipState::Hold { start_ms } => {
                if now_ms >= start_ms + HOLD_MS {
                    self.blip_state = BlipState::RampDown { start_ms: now_ms };
                }
            }
            BlipState::RampDown { start_ms } => {
                if now_ms >= start_ms + RAMP_DOWN_MS {
                    self.blip_state = BlipState::Idle;
                    self.next_blip_at_ms = now_ms + self.rng.gen_range(8000..15000);
                }
            }
        }
    }

    fn target_rpm(&self, now_ms: u64) -> f64 {
        match self.blip_state {
            BlipState::Idle => IDLE_RPM,
            BlipState::RampUp { start_ms } => {
                let progress = ((now_ms - start_ms) as f64 / RAMP_UP_MS as f64).min(1.0);
                IDLE_RPM + (self.blip_target_rpm - IDLE_RPM) * progress
            }
            BlipState::Hold { .. } => self.blip_target_rpm,
            BlipState::RampDown { start_ms } => {
                let progress = ((now_ms - start_ms) as f64 / RAMP_DOWN_MS as f64).min(1.0);
                self.blip_target_rpm + (IDLE_RPM - self.blip_target_rpm) * progress
            }
        }
    }
}

/// Simulated diagnostics link
pub struct DemoGateway {
    simulator: VehicleSimulator,
    supported: SupportedSet,
    connected_at: Instant,
    link_duration: Option<Duration>,
    fault_rate: f64,
    rng: StdRng,
}

impl DemoGateway {
    /// Bring up the simulated link
    pub fn connect(config: &DemoConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sim_rng = StdRng::seed_from_u64(rng.gen());

        let supported: SupportedSet = MeasurementId::ALL
            .into_iter()
            .filter(|id| !config.unsupported.contains(id))
            .collect();

        tracing::info!(
            supported = supported.len(),
            fault_rate = config.fault_rate,
            link_duration_secs = ?config.link_duration_secs,
            "demo gateway connected"
        );

        Self {
            simulator: VehicleSimulator::new(sim_rng),
            supported,
            connected_at: Instant::now(),
            link_duration: config.link_duration_secs.map(Duration::from_secs),
            fault_rate: config.fault_rate.clamp(0.0, 1.0),
            rng,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.connected_at.elapsed().as_millis() as u64
    }
}

impl Gateway for DemoGateway {
    fn state(&self) -> ConnectionState {
        match self.link_duration {
            Some(limit) if self.connected_at.elapsed() >= limit => ConnectionState::Disconnected,
            _ => ConnectionState::Connected,
        }
    }

    fn supported(&self) -> &SupportedSet {
        &self.supported
    }

    fn query(&mut self, id: MeasurementId) -> Result<RawReading, GatewayError> {
        if !self.state().is_connected() {
            return Err(GatewayError::NotConnected);
        }
        if !self.supported.contains(id) {
            return Err(GatewayError::Unsupported(id));
        }
        if self.fault_rate > 0.0 && self.rng.gen_bool(self.fault_rate) {
            return Err(GatewayError::Timeout);
        }

        let snapshot = self.simulator.update(self.elapsed_ms());
        Ok(Some(snapshot.get(id)))
    }
}
