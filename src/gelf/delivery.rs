//! Encode-and-write loop shared by every caller of the hook.

use std::{sync::Arc, thread};

use parking_lot::Mutex;

use crate::{
    diagnostics::{Diagnostic, DiagnosticSink},
    error::{DeliveryError, DeliveryFailure, SendError},
    log_record::LogRecord,
};

use super::{connection::ConnectionManager, serialise::encode_frame};

/// Serialises records and pushes them through the connection manager.
///
/// The manager sits behind a single mutex held for the whole connect and
/// write cycle, so concurrent senders are delivered in lock-acquisition order
/// and their frames never interleave on the wire.
pub struct DeliveryPipeline {
    manager: Mutex<ConnectionManager>,
    max_frame_size: usize,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl DeliveryPipeline {
    pub fn new(
        manager: ConnectionManager,
        max_frame_size: usize,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            manager: Mutex::new(manager),
            max_frame_size,
            diagnostics,
        }
    }

    /// Encode `record` and deliver it, retrying on connection failure.
    ///
    /// Encoding errors are returned without touching the network.
    pub fn send(&self, record: &LogRecord) -> Result<(), SendError> {
        let frame = encode_frame(record, self.max_frame_size)?;
        let mut manager = self.manager.lock();
        self.deliver(&mut manager, &frame)?;
        Ok(())
    }

    fn deliver(&self, manager: &mut ConnectionManager, frame: &[u8]) -> Result<(), DeliveryError> {
        let retry = manager.retry();
        let attempts = retry.attempts.max(1);
        let mut last_err = None;
        for attempt in 1..=attempts {
            if attempt > 1 {
                thread::sleep(retry.delay);
            }
            // The manager already spent its own dial budget; dialling again
            // from here would only repeat it.
            if let Err(err) = manager.ensure_connected() {
                return Err(DeliveryError {
                    attempts: attempt,
                    cause: DeliveryFailure::Connect(err),
                });
            }
            match manager.write(frame) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    self.diagnostics.emit(&Diagnostic::WriteFailed {
                        address: manager.address(),
                        attempt,
                        error: &err,
                    });
                    last_err = Some(err);
                }
            }
        }
        let cause = match last_err {
            Some(err) => DeliveryFailure::Write(err),
            None => DeliveryFailure::Write(std::io::Error::other("no write attempted")),
        };
        Err(DeliveryError { attempts, cause })
    }

    pub fn is_connected(&self) -> bool {
        self.manager.lock().is_connected()
    }

    pub fn disconnect(&self) {
        self.manager.lock().discard();
    }
}
