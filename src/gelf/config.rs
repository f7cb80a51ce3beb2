//! Configuration structures consumed by the hook lifecycle.
//!
//! `GraylogHookBuilder` constructs these values before passing them to
//! [`GraylogHook`](super::GraylogHook) for runtime use.

use std::{fmt, sync::Arc, time::Duration};

use crate::{
    diagnostics::{DiagnosticSink, DiscardSink},
    error::ConfigError,
    level::Level,
};

/// Default number of dial and write attempts.
pub const DEFAULT_ATTEMPTS: u32 = 3;
/// Default fixed pause between failed attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(200);
/// Default connection timeout applied per resolved address.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default write timeout applied to socket writes.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(1);
/// Default maximum frame size (in bytes, delimiter included).
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1 << 20; // 1 MiB

/// Fixed-delay retry policy shared by the dial and write loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Everything needed to run a [`GraylogHook`](super::GraylogHook).
#[derive(Clone)]
pub struct GraylogHookConfig {
    /// Aggregator address in `host:port` form.
    pub address: String,
    /// Value of the GELF `host` field.
    pub host: String,
    pub level: Level,
    pub retry: RetryPolicy,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    pub max_frame_size: usize,
    pub diagnostics: Arc<dyn DiagnosticSink>,
}

impl GraylogHookConfig {
    /// Configuration with default tuning for the given target and host.
    pub fn new(address: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            host: host.into(),
            level: Level::default(),
            retry: RetryPolicy::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            diagnostics: Arc::new(DiscardSink),
        }
    }

    /// Reject values that would make every send fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_address(&self.address)?;
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("host must not be empty".into()));
        }
        ensure_nonzero(self.retry.attempts == 0, "attempts")?;
        ensure_nonzero(self.connect_timeout.is_zero(), "connect_timeout")?;
        ensure_nonzero(self.write_timeout.is_zero(), "write_timeout")?;
        ensure_nonzero(self.max_frame_size == 0, "max_frame_size")?;
        Ok(())
    }
}

fn ensure_nonzero(is_zero: bool, field: &str) -> Result<(), ConfigError> {
    if is_zero {
        Err(ConfigError::InvalidConfig(format!(
            "{field} must be greater than zero"
        )))
    } else {
        Ok(())
    }
}

fn validate_address(address: &str) -> Result<(), ConfigError> {
    let port = address
        .rsplit_once(':')
        .filter(|(host, _)| !host.is_empty())
        .map(|(_, port)| port)
        .ok_or_else(|| {
            ConfigError::InvalidConfig(format!("address {address:?} must have the form host:port"))
        })?;
    let port = port.parse::<u16>().map_err(|_| {
        ConfigError::InvalidConfig(format!("address {address:?} has an invalid port"))
    })?;
    ensure_nonzero(port == 0, "address port")
}

impl fmt::Debug for GraylogHookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraylogHookConfig")
            .field("address", &self.address)
            .field("host", &self.host)
            .field("level", &self.level)
            .field("retry", &self.retry)
            .field("connect_timeout", &self.connect_timeout)
            .field("write_timeout", &self.write_timeout)
            .field("max_frame_size", &self.max_frame_size)
            .finish_non_exhaustive()
    }
}
