//! In-process GELF TCP collector for integration tests.
//!
//! Accepts any number of connections and forwards every zero-terminated
//! frame it reads, still raw, over a channel so tests can check framing as
//! well as content.

use std::{
    io::{BufRead, BufReader},
    net::{SocketAddr, TcpListener},
    sync::mpsc,
    thread,
    time::Duration,
};

use serde_json::Value;

/// Listener thread collecting raw frames (delimiter stripped).
pub struct GelfCollector {
    addr: SocketAddr,
    frames: mpsc::Receiver<Vec<u8>>,
}

impl GelfCollector {
    /// Bind an ephemeral port on loopback and start accepting connections.
    pub fn spawn() -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener");
        let addr = listener.local_addr().expect("listener has address");
        let (tx, frames) = mpsc::channel();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    return;
                };
                let tx = tx.clone();
                thread::spawn(move || {
                    let mut reader = BufReader::new(stream);
                    loop {
                        let mut frame = Vec::new();
                        match reader.read_until(0, &mut frame) {
                            Ok(0) | Err(_) => return,
                            Ok(_) => {
                                if frame.pop() != Some(0) {
                                    return;
                                }
                                if tx.send(frame).is_err() {
                                    return;
                                }
                            }
                        }
                    }
                });
            }
        });
        Self { addr, frames }
    }

    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    /// Wait for the next frame.
    pub fn recv_frame(&self) -> Vec<u8> {
        self.frames
            .recv_timeout(Duration::from_secs(5))
            .expect("frame should arrive")
    }

    /// Wait for the next frame and decode it as JSON.
    pub fn recv_json(&self) -> Value {
        serde_json::from_slice(&self.recv_frame()).expect("frame is json")
    }

    /// Assert that no further frame arrives within `wait`.
    #[allow(dead_code)]
    pub fn assert_quiet(&self, wait: Duration) {
        assert!(
            self.frames.recv_timeout(wait).is_err(),
            "unexpected extra frame"
        );
    }
}

/// Loopback address on which nothing is listening.
#[allow(dead_code)]
pub fn closed_addr() -> String {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener");
    listener.local_addr().expect("listener has address").to_string()
}
