//! Ownership and lifecycle of the single aggregator connection.

use std::{io, net::TcpStream, sync::Arc, thread, time::Duration};

use crate::{
    diagnostics::{Diagnostic, DiagnosticSink},
    error::ConnectionError,
};

use super::{
    config::RetryPolicy,
    transport::{connect_tcp, peer_closed, write_frame},
};

/// Holds at most one live TCP stream to the aggregator.
///
/// `conn` is either `None` or a stream that was dialled successfully and has
/// not failed since. Any write error clears it before returning.
pub struct ConnectionManager {
    address: String,
    retry: RetryPolicy,
    connect_timeout: Duration,
    write_timeout: Duration,
    diagnostics: Arc<dyn DiagnosticSink>,
    conn: Option<TcpStream>,
}

impl ConnectionManager {
    pub fn new(
        address: String,
        retry: RetryPolicy,
        connect_timeout: Duration,
        write_timeout: Duration,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            address,
            retry,
            connect_timeout,
            write_timeout,
            diagnostics,
            conn: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Return the held connection, dialling up to `retry.attempts` times when
    /// none is held.
    pub fn ensure_connected(&mut self) -> Result<&mut TcpStream, ConnectionError> {
        if self.conn.as_ref().is_some_and(peer_closed) {
            self.diagnostics.emit(&Diagnostic::StaleConnection {
                address: &self.address,
            });
            self.discard();
        }

        let stream = match self.conn.take() {
            Some(stream) => stream,
            None => self.dial()?,
        };
        Ok(self.conn.insert(stream))
    }

    fn dial(&self) -> Result<TcpStream, ConnectionError> {
        let attempts = self.retry.attempts.max(1);
        let mut last_err = None;
        for attempt in 1..=attempts {
            if attempt > 1 {
                thread::sleep(self.retry.delay);
            }
            match connect_tcp(&self.address, self.connect_timeout) {
                Ok(stream) => {
                    self.diagnostics.emit(&Diagnostic::Connected {
                        address: &self.address,
                        attempt,
                    });
                    return Ok(stream);
                }
                Err(err) => {
                    self.diagnostics.emit(&Diagnostic::DialFailed {
                        address: &self.address,
                        attempt,
                        error: &err,
                    });
                    last_err = Some(err);
                }
            }
        }
        Err(ConnectionError {
            address: self.address.clone(),
            attempts,
            source: last_err
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "no dial attempted")),
        })
    }

    /// Write `frame` to the held connection, discarding it on failure.
    pub fn write(&mut self, frame: &[u8]) -> io::Result<()> {
        let write_timeout = self.write_timeout;
        let Some(stream) = self.conn.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "no connection held",
            ));
        };
        let result = write_frame(stream, frame, write_timeout);
        if result.is_err() {
            self.discard();
        }
        result
    }

    /// Close and forget the held connection, if any.
    pub fn discard(&mut self) {
        if let Some(stream) = self.conn.take() {
            let _ = stream.shutdown(std::net::Shutdown::Both);
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.discard();
    }
}
