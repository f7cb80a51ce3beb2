//! Ship structured log records to Graylog as GELF over TCP.
//!
//! [`GraylogHook`] owns a single lazily dialled connection to the aggregator
//! and writes one zero-terminated JSON frame per record, retrying with a fixed
//! delay when the connection fails. The optional `log-compat` feature installs
//! the hook behind the `log` facade.

pub mod diagnostics;
pub mod error;
pub mod gelf;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
pub mod log_record;
pub mod rate_limited_warner;

pub use diagnostics::{Diagnostic, DiagnosticSink, DiscardSink, LogSink};
#[cfg(feature = "log-compat")]
pub use error::InitError;
pub use error::{
    ConfigError, ConnectionError, DeliveryError, DeliveryFailure, SendError, SerializationError,
};
pub use gelf::{GraylogHook, GraylogHookBuilder, GraylogHookConfig, RetryPolicy};
pub use level::Level;
#[cfg(feature = "log-compat")]
pub use log_compat::GraylogLogger;
pub use log_record::LogRecord;
