//! Error types returned by the hook and its delivery pipeline.

use std::io;

use thiserror::Error;

/// Invalid user supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Severity name outside `panic`, `fatal`, `error`, `warn`, `info`,
    /// `debug` and `trace`.
    #[error("invalid log level: {0}")]
    InvalidLevel(String),
    /// A builder option was rejected.
    #[error("invalid hook configuration: {0}")]
    InvalidConfig(String),
}

/// Dialling the aggregator failed on every attempt.
#[derive(Debug, Error)]
#[error("unable to connect to {address} after {attempts} attempts")]
pub struct ConnectionError {
    pub address: String,
    pub attempts: u32,
    #[source]
    pub source: io::Error,
}

/// A record could not be turned into a wire frame.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("failed to encode record as json: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("encoded frame of {size} bytes exceeds the {limit} byte limit")]
    FrameTooLarge { size: usize, limit: usize },
}

/// The last failure observed by the delivery loop.
#[derive(Debug, Error)]
pub enum DeliveryFailure {
    #[error(transparent)]
    Connect(#[from] ConnectionError),
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

/// Every delivery attempt failed.
#[derive(Debug, Error)]
#[error("failed to deliver record after {attempts} attempts")]
pub struct DeliveryError {
    pub attempts: u32,
    #[source]
    pub cause: DeliveryFailure,
}

/// Outcome of a failed [`GraylogHook::send`](crate::GraylogHook::send).
#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Failure installing the `log` bridge.
#[cfg(feature = "log-compat")]
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("a global logger is already installed")]
    AlreadySet(#[from] log::SetLoggerError),
}
