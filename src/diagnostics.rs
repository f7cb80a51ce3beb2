//! Observability hooks for the delivery pipeline.
//!
//! The hook never writes to stdout or stderr on its own. Connection churn and
//! dropped records are reported as [`Diagnostic`] events to an injected
//! [`DiagnosticSink`]. [`LogSink`] forwards them to the `log` facade under
//! [`DIAGNOSTICS_TARGET`], which the `log` bridge refuses to ship so that
//! diagnostics cannot loop back into the hook.

use std::io;

use crate::error::SendError;

/// `log` target used by [`LogSink`].
pub const DIAGNOSTICS_TARGET: &str = "graylog_hook::diagnostics";

/// Event raised by the connection manager or the `log` bridge.
#[derive(Debug)]
pub enum Diagnostic<'a> {
    /// A dial attempt failed.
    DialFailed {
        address: &'a str,
        attempt: u32,
        error: &'a io::Error,
    },
    /// A dial attempt succeeded.
    Connected { address: &'a str, attempt: u32 },
    /// The held connection had already been closed by the peer.
    StaleConnection { address: &'a str },
    /// Writing a frame failed and the connection was discarded.
    WriteFailed {
        address: &'a str,
        attempt: u32,
        error: &'a io::Error,
    },
    /// Records were lost since the last report.
    RecordDropped { count: u64, error: &'a SendError },
}

/// Receiver for [`Diagnostic`] events.
///
/// Connection events are emitted while the hook's connection lock is held.
/// A sink must not call [`GraylogHook::send`](crate::GraylogHook::send) on the
/// hook that reports to it; the lock is not reentrant and the call deadlocks.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: &Diagnostic<'_>);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic<'_>) + Send + Sync,
{
    fn emit(&self, event: &Diagnostic<'_>) {
        self(event)
    }
}

/// Sink that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSink;

impl DiagnosticSink for DiscardSink {
    fn emit(&self, _event: &Diagnostic<'_>) {}
}

/// Sink forwarding events to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, event: &Diagnostic<'_>) {
        match event {
            Diagnostic::DialFailed {
                address,
                attempt,
                error,
            } => log::warn!(
                target: DIAGNOSTICS_TARGET,
                "dial {attempt} to {address} failed: {error}"
            ),
            Diagnostic::Connected { address, attempt } => log::debug!(
                target: DIAGNOSTICS_TARGET,
                "connected to {address} on attempt {attempt}"
            ),
            Diagnostic::StaleConnection { address } => log::debug!(
                target: DIAGNOSTICS_TARGET,
                "connection to {address} closed by peer; redialling"
            ),
            Diagnostic::WriteFailed {
                address,
                attempt,
                error,
            } => log::warn!(
                target: DIAGNOSTICS_TARGET,
                "write {attempt} to {address} failed: {error}"
            ),
            Diagnostic::RecordDropped { count, error } => log::warn!(
                target: DIAGNOSTICS_TARGET,
                "dropped {count} records; last error: {error}"
            ),
        }
    }
}
