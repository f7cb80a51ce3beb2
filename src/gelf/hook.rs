//! Public hook type exported by the crate.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    diagnostics::DiagnosticSink,
    error::{ConfigError, SendError},
    level::Level,
    log_record::LogRecord,
};

use super::{
    config::GraylogHookConfig, connection::ConnectionManager, delivery::DeliveryPipeline,
};

/// Ships [`LogRecord`]s to a Graylog aggregator as GELF over TCP.
///
/// `GraylogHook` is `Send + Sync`; share it behind an `Arc` to log from many
/// threads.
pub struct GraylogHook {
    host: String,
    address: String,
    threshold: RwLock<Level>,
    pipeline: DeliveryPipeline,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl GraylogHook {
    /// Construct a hook targeting `address` with default configuration.
    pub fn new(address: impl Into<String>, host: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_config(GraylogHookConfig::new(address, host))
    }

    /// Construct the hook from a configuration object.
    ///
    /// Fails when the configuration is unusable, for example a zero write
    /// timeout. No connection is opened until the first [`send`](Self::send).
    pub fn with_config(config: GraylogHookConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let manager = ConnectionManager::new(
            config.address.clone(),
            config.retry,
            config.connect_timeout,
            config.write_timeout,
            Arc::clone(&config.diagnostics),
        );
        let pipeline = DeliveryPipeline::new(
            manager,
            config.max_frame_size,
            Arc::clone(&config.diagnostics),
        );
        Ok(Self {
            host: config.host,
            address: config.address,
            threshold: RwLock::new(config.level),
            pipeline,
            diagnostics: config.diagnostics,
        })
    }

    /// Value written to the GELF `host` field of records built by
    /// [`record`](Self::record).
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Current minimum severity.
    pub fn level(&self) -> Level {
        *self.threshold.read()
    }

    /// Set the minimum severity by name, ignoring case.
    ///
    /// An unknown name leaves the current threshold in place.
    pub fn set_level(&self, name: &str) -> Result<(), ConfigError> {
        let level = name.parse::<Level>()?;
        *self.threshold.write() = level;
        Ok(())
    }

    /// Levels this hook accepts, most severe first.
    pub fn enabled_levels(&self) -> Vec<Level> {
        Level::at_or_above(self.level())
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Build a record stamped with this hook's host identifier.
    pub fn record(&self, level: Level, message: &str) -> LogRecord {
        LogRecord::new(&self.host, level, message)
    }

    /// Encode `record` as a GELF frame and write it to the aggregator.
    ///
    /// Blocks until the frame is written or every attempt has failed. The
    /// record is sent regardless of the configured threshold; level filtering
    /// is the caller's job.
    pub fn send(&self, record: &LogRecord) -> Result<(), SendError> {
        self.pipeline.send(record)
    }

    /// Whether a connection is currently held.
    pub fn is_connected(&self) -> bool {
        self.pipeline.is_connected()
    }

    /// Close the held connection. The next send redials.
    pub fn disconnect(&self) {
        self.pipeline.disconnect();
    }

    pub fn diagnostics(&self) -> &dyn DiagnosticSink {
        self.diagnostics.as_ref()
    }
}

impl std::fmt::Debug for GraylogHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraylogHook")
            .field("host", &self.host)
            .field("address", &self.address)
            .field("level", &self.level())
            .finish()
    }
}
