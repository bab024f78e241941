//! Error — construction and serving error types.

use thiserror::Error;

/// Construction-time failures. A bootstrap that returns one of these must
/// not proceed to serving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("service `{0}` is registered twice; service identifiers must be unique")]
    DuplicateService(&'static str),

    #[error("no services registered; a server needs at least one")]
    NoServices,
}

/// Serving-time failures of the handle itself. Per-request failures are
/// `tonic::Status` values and never surface here.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("server handle has already served; handles are single-use")]
    AlreadyServed,

    #[error("server handle was stopped before serving")]
    Stopped,

    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}
