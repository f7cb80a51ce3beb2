//! Builder for [`GraylogHook`](super::GraylogHook).
//!
//! Exposes the retry policy, socket timeouts, frame limit, initial level and
//! diagnostic sink. Values are validated when [`GraylogHookBuilder::build`]
//! runs so a misconfigured hook never reaches the network.

use std::{sync::Arc, time::Duration};

use crate::{diagnostics::DiagnosticSink, error::ConfigError, level::Level};

use super::{GraylogHook, config::GraylogHookConfig};

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(ConfigError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`GraylogHook`] instances.
#[derive(Clone, Default)]
pub struct GraylogHookBuilder {
    address: String,
    host: String,
    instance_suffix: bool,
    level: Option<String>,
    attempts: Option<u32>,
    retry_delay_ms: Option<u64>,
    connect_timeout_ms: Option<u64>,
    write_timeout_ms: Option<u64>,
    max_frame_size: Option<usize>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl GraylogHookBuilder {
    /// Create a builder targeting `address` (`host:port`) that reports as
    /// `host`.
    pub fn new(address: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            host: host.into(),
            ..Self::default()
        }
    }

    /// Append `-<8 hex digits>` to the host so several instances logging
    /// under one name stay distinguishable.
    pub fn with_instance_suffix(mut self) -> Self {
        self.instance_suffix = true;
        self
    }

    /// Set the initial minimum level by name.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    option_setter!(
        #[doc = "Set how many times dialling and writing are attempted."]
        with_attempts,
        attempts,
        u32
    );
    option_setter!(
        #[doc = "Set the fixed pause between attempts. Zero is allowed."]
        with_retry_delay_ms,
        retry_delay_ms,
        u64
    );
    option_setter!(with_connect_timeout_ms, connect_timeout_ms, u64);
    option_setter!(with_write_timeout_ms, write_timeout_ms, u64);
    option_setter!(with_max_frame_size, max_frame_size, usize);

    /// Route connection diagnostics to `sink`.
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Some(Arc::new(sink));
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("host must not be empty".into()));
        }
        self.validate_limits()?;
        Ok(())
    }

    fn validate_limits(&self) -> Result<(), ConfigError> {
        if let Some(attempts) = self.attempts {
            ensure_positive!(attempts, "attempts")?;
        }
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.write_timeout_ms {
            ensure_positive!(timeout, "write_timeout_ms")?;
        }
        if let Some(size) = self.max_frame_size {
            ensure_positive!(size, "max_frame_size")?;
        }
        Ok(())
    }

    fn host_identifier(&self) -> String {
        if !self.instance_suffix {
            return self.host.clone();
        }
        format!("{}-{:08x}", self.host, rand::random::<u32>())
    }

    /// Validate the options and produce the resulting configuration.
    pub fn build_config(&self) -> Result<GraylogHookConfig, ConfigError> {
        self.validate()?;
        let mut config = GraylogHookConfig::new(self.address.clone(), self.host_identifier());
        if let Some(ref level) = self.level {
            config.level = level.parse::<Level>()?;
        }
        if let Some(attempts) = self.attempts {
            config.retry.attempts = attempts;
        }
        if let Some(ms) = self.retry_delay_ms {
            config.retry.delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.connect_timeout_ms {
            config.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.write_timeout_ms {
            config.write_timeout = Duration::from_millis(ms);
        }
        if let Some(size) = self.max_frame_size {
            config.max_frame_size = size;
        }
        if let Some(ref sink) = self.diagnostics {
            config.diagnostics = Arc::clone(sink);
        }
        config.validate()?;
        Ok(config)
    }

    /// Build the hook.
    pub fn build(&self) -> Result<GraylogHook, ConfigError> {
        GraylogHook::with_config(self.build_config()?)
    }
}

impl std::fmt::Debug for GraylogHookBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraylogHookBuilder")
            .field("address", &self.address)
            .field("host", &self.host)
            .field("instance_suffix", &self.instance_suffix)
            .field("level", &self.level)
            .field("attempts", &self.attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("write_timeout_ms", &self.write_timeout_ms)
            .field("max_frame_size", &self.max_frame_size)
            .finish_non_exhaustive()
    }
}
