//! GELF JSON serialisation helpers.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use crate::{error::SerializationError, log_record::LogRecord};

/// GELF specification version emitted in every payload.
pub const GELF_VERSION: &str = "1.1";
/// Byte terminating each frame on a GELF TCP stream.
pub const FRAME_DELIMITER: u8 = 0;

/// Caller fields re-keyed with a leading underscore.
struct AdditionalFields<'a>(&'a BTreeMap<String, Value>);

impl Serialize for AdditionalFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(&format!("_{key}"), value)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct GelfPayload<'a> {
    version: &'static str,
    host: &'a str,
    level: u8,
    short_message: &'a str,
    timestamp: i64,
    #[serde(flatten)]
    fields: AdditionalFields<'a>,
}

impl<'a> From<&'a LogRecord> for GelfPayload<'a> {
    fn from(record: &'a LogRecord) -> Self {
        Self {
            version: GELF_VERSION,
            host: &record.host,
            level: record.level.gelf_code(),
            short_message: &record.message,
            timestamp: record.timestamp,
            fields: AdditionalFields(&record.fields),
        }
    }
}

/// Serialise a record into a GELF JSON payload.
pub fn serialise_record(record: &LogRecord) -> Result<Vec<u8>, SerializationError> {
    let mut buf = Vec::with_capacity(128);
    serde_json::to_writer(&mut buf, &GelfPayload::from(record))?;
    Ok(buf)
}

/// Terminate the payload with the frame delimiter.
///
/// Returns `None` when the framed size would exceed `max_size`. JSON escapes
/// control characters, so the payload itself never contains the delimiter.
pub fn frame_payload(mut payload: Vec<u8>, max_size: usize) -> Option<Vec<u8>> {
    if payload.len() >= max_size {
        return None;
    }
    payload.push(FRAME_DELIMITER);
    Some(payload)
}

/// Serialise and frame a record in one step.
pub fn encode_frame(record: &LogRecord, max_size: usize) -> Result<Vec<u8>, SerializationError> {
    let payload = serialise_record(record)?;
    let size = payload.len() + 1;
    frame_payload(payload, max_size).ok_or(SerializationError::FrameTooLarge {
        size,
        limit: max_size,
    })
}
