//! GELF-over-TCP delivery to a Graylog aggregator.
//!
//! This module defines `GraylogHook`, which serialises
//! [`LogRecord`](crate::log_record::LogRecord) values into zero-terminated
//! GELF JSON frames and writes them to a single TCP connection. The connection
//! is dialled lazily, discarded on the first write error, and redialled with a
//! fixed delay between attempts. All connection access happens under one
//! mutex, so the hook can be shared freely between threads.

mod builder;
mod config;
mod connection;
mod delivery;
mod hook;
mod serialise;
mod transport;


pub use builder::GraylogHookBuilder;
pub use config::{
    DEFAULT_ATTEMPTS, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_FRAME_SIZE, DEFAULT_RETRY_DELAY,
    DEFAULT_WRITE_TIMEOUT, GraylogHookConfig, RetryPolicy,
};
pub use hook::GraylogHook;
pub use serialise::{FRAME_DELIMITER, GELF_VERSION, encode_frame};
