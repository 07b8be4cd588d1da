//! Gateway errors

use thiserror::Error;

use super::MeasurementId;

/// Errors a gateway query can raise
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Query timeout")]
    Timeout,

    #[error("Not connected to vehicle")]
    NotConnected,

    #[error("Measurement {0} not supported by vehicle")]
    Unsupported(MeasurementId),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
