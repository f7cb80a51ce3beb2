//! Compatibility bridge for the Rust `log` crate.
//!
//! This module provides `GraylogLogger`, an implementation of `log::Log`
//! that turns each `log` record into a [`LogRecord`] and ships it through a
//! shared [`GraylogHook`]. Delivery failures never reach the logging call
//! site; they are counted and reported, rate limited, to the hook's
//! diagnostic sink.

use std::sync::Arc;

use log::{Metadata, Record};
use parking_lot::Mutex;

use crate::{
    diagnostics::{DIAGNOSTICS_TARGET, Diagnostic},
    error::{InitError, SendError},
    gelf::{GraylogHook, GraylogHookBuilder},
    level::Level,
    log_record::LogRecord,
    rate_limited_warner::RateLimitedWarner,
};

fn map_log_level(level: log::Level) -> Level {
    match level {
        log::Level::Trace => Level::Trace,
        log::Level::Debug => Level::Debug,
        log::Level::Info => Level::Info,
        log::Level::Warn => Level::Warn,
        log::Level::Error => Level::Error,
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        map_log_level(level)
    }
}

/// Adapter implementing the Rust `log::Log` trait.
pub struct GraylogLogger {
    hook: Arc<GraylogHook>,
    warner: RateLimitedWarner,
    /// Most recent delivery error, reported alongside pending drop counts.
    last_error: Mutex<Option<SendError>>,
}

impl GraylogLogger {
    pub fn new(hook: Arc<GraylogHook>) -> Self {
        Self {
            hook,
            warner: RateLimitedWarner::default(),
            last_error: Mutex::new(None),
        }
    }

    pub fn hook(&self) -> &Arc<GraylogHook> {
        &self.hook
    }

    fn report_drops(&self, count: u64, error: &SendError) {
        self.hook
            .diagnostics()
            .emit(&Diagnostic::RecordDropped { count, error });
    }

    fn to_log_record(&self, record: &Record<'_>) -> LogRecord {
        let mut out = self.hook.record(
            Level::from(record.level()),
            &record.args().to_string(),
        );
        out.insert_value("target", record.target());
        if let Some(module_path) = record.module_path() {
            out.insert_value("module_path", module_path);
        }
        if let Some(file) = record.file() {
            out.insert_value("file", file);
        }
        if let Some(line) = record.line() {
            out.insert_value("line", line);
        }
        out
    }
}

impl log::Log for GraylogLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !metadata.target().starts_with(DIAGNOSTICS_TARGET)
            && self.hook.is_enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Err(error) = self.hook.send(&self.to_log_record(record)) {
            self.warner.record_drop();
            let mut last = self.last_error.lock();
            let error = last.insert(error);
            self.warner.warn_if_due(|count| self.report_drops(count, error));
        }
    }

    /// Report drops still held back by the rate limit.
    fn flush(&self) {
        if let Some(error) = self.last_error.lock().as_ref() {
            self.warner.flush(|count| self.report_drops(count, error));
        }
    }
}

/// Build a hook for `app_name` and install it as the global `log` logger.
///
/// The host identifier gets a random instance suffix and the threshold starts
/// at `debug`. Returns the shared hook so callers can adjust its level later.
pub fn init(address: &str, app_name: &str) -> Result<Arc<GraylogHook>, InitError> {
    let hook = GraylogHookBuilder::new(address, app_name)
        .with_instance_suffix()
        .with_level("debug")
        .build()?;
    install(Arc::new(hook))
}

/// Install an existing hook as the global `log` logger.
pub fn install(hook: Arc<GraylogHook>) -> Result<Arc<GraylogHook>, InitError> {
    log::set_boxed_logger(Box::new(GraylogLogger::new(Arc::clone(&hook))))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(hook)
}
