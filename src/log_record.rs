//! Log record representation consumed by the delivery pipeline.
//!
//! A `LogRecord` captures a single event: the emitting host, its severity,
//! the message, a Unix timestamp in seconds, and arbitrary structured fields.
//! Records are built by the caller and handed to
//! [`GraylogHook::send`](crate::GraylogHook::send) by reference.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::SerializationError;
use crate::level::Level;

#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    /// Identifier of the emitting application instance.
    pub host: String,
    /// Severity of the event.
    pub level: Level,
    /// The log message content.
    pub message: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Structured key-value pairs attached to the record.
    pub fields: BTreeMap<String, Value>,
}

impl LogRecord {
    /// Construct a record stamped with the current time.
    pub fn new(host: &str, level: Level, message: &str) -> Self {
        Self {
            host: host.to_owned(),
            level,
            message: message.to_owned(),
            timestamp: Utc::now().timestamp(),
            fields: BTreeMap::new(),
        }
    }

    /// Override the timestamp with explicit Unix seconds.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Override the timestamp from a UTC date-time.
    pub fn with_datetime(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = at.timestamp();
        self
    }

    /// Attach a field, converting `value` to JSON.
    ///
    /// Fails when `value` has no JSON representation, for example a map keyed
    /// by tuples.
    pub fn with_field<T: Serialize + ?Sized>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self, SerializationError> {
        let value = serde_json::to_value(value)?;
        self.fields.insert(key.into(), value);
        Ok(self)
    }

    /// Attach an already-built JSON value. Re-using a key replaces the
    /// previous value.
    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.host, self.level, self.message)
    }
}
