#![allow(dead_code)]

use obdhud_core::prelude::*;
use std::cell::Cell;
use std::collections::HashMap;

/// Canned answer for one measurement
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Value(f64),
    Null,
    Timeout,
    Io,
}

/// Scripted gateway recording every query
pub struct MockGateway {
    pub supported: SupportedSet,
    pub replies: HashMap<MeasurementId, Reply>,
    pub queries: Vec<MeasurementId>,
    /// Number of state polls answered with Connected before the link drops.
    /// None keeps the link up forever.
    pub connected_polls: Option<u32>,
    pub state_polls: Cell<u32>,
}

impl MockGateway {
    pub fn connected() -> Self {
        Self {
            supported: SupportedSet::all(),
            replies: HashMap::new(),
            queries: Vec::new(),
            connected_polls: None,
            state_polls: Cell::new(0),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected_polls: Some(0),
            ..Self::connected()
        }
    }

    pub fn with_all(mut self, reply: Reply) -> Self {
        for id in MeasurementId::ALL {
            self.replies.insert(id, reply);
        }
        self
    }

    pub fn with_reply(mut self, id: MeasurementId, reply: Reply) -> Self {
        self.replies.insert(id, reply);
        self
    }

    pub fn with_supported(mut self, ids: &[MeasurementId]) -> Self {
        self.supported = ids.iter().copied().collect();
        self
    }

    pub fn dropping_after(mut self, polls: u32) -> Self {
        self.connected_polls = Some(polls);
        self
    }
}

impl Gateway for MockGateway {
    fn state(&self) -> ConnectionState {
        let polls = self.state_polls.get();
        self.state_polls.set(polls + 1);
        match self.connected_polls {
            Some(limit) if polls >= limit => ConnectionState::Disconnected,
            _ => ConnectionState::Connected,
        }
    }

    fn supported(&self) -> &SupportedSet {
        &self.supported
    }

    fn query(&mut self, id: MeasurementId) -> Result<RawReading, GatewayError> {
        self.queries.push(id);
        match self.replies.get(&id).copied().unwrap_or(Reply::Null) {
            Reply::Value(v) => Ok(Some(v)),
            Reply::Null => Ok(None),
            Reply::Timeout => Err(GatewayError::Timeout),
            Reply::Io => Err(GatewayError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "adapter unplugged",
            ))),
        }
    }
}

/// Surface that records everything pushed to it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub texts: HashMap<TextField, String>,
    pub progress: Option<u8>,
    pub band: Option<TemperatureBand>,
    pub refreshes: u32,
    pub teardowns: u32,
}

impl RecordingSurface {
    pub fn text(&self, field: TextField) -> &str {
        self.texts.get(&field).map(String::as_str).unwrap_or("")
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_text(&mut self, field: TextField, value: &str) {
        self.texts.insert(field, value.to_string());
    }

    fn set_progress(&mut self, value: u8) {
        self.progress = Some(value);
    }

    fn set_classification(&mut self, band: TemperatureBand) {
        self.band = Some(band);
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn teardown(&mut self) {
        self.teardowns += 1;
    }
}
