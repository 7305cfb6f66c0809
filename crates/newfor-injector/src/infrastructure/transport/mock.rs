//! Mock packet sink for unit testing.
//!
//! # Why a mock transport?
//!
//! The real [`super::TcpTransport`] needs a listening receiver, and a socket
//! cannot be told to fail on the third write.  `MockTransport` replaces the
//! socket with in-memory recording so tests can check exactly which packets
//! were written, in what order, and what happens when one of them fails.
//!
//! # Usage in tests
//!
//! ```ignore
//! let transport = MockTransport::new();
//! let record = transport.clone(); // shares the same log
//! let mut session = Session::with_sink(transport, ProtocolVariant::Newfor, "mock");
//!
//! session.clear("888").unwrap();
//!
//! assert_eq!(record.writes(), vec![vec![0x98]]);
//! ```
//!
//! # `fail_on` index
//!
//! [`MockTransport::failing_on`] makes the n-th write attempt (0-based) return
//! a `BrokenPipe` error instead of recording.  Later attempts succeed again.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use super::PacketSink;

#[derive(Debug, Default)]
struct Record {
    writes: Vec<Vec<u8>>,
    attempts: usize,
    shutdowns: usize,
}

/// A sink that records writes instead of sending them.
///
/// Clones share one record, so a test can keep a clone after moving the
/// original into a session.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    record: Arc<Mutex<Record>>,
    fail_on: Option<usize>,
}

impl MockTransport {
    /// Creates a transport that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport whose `index`-th write attempt fails.
    pub fn failing_on(index: usize) -> Self {
        Self {
            fail_on: Some(index),
            ..Self::default()
        }
    }

    /// Every successful write, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.lock().writes.clone()
    }

    /// Number of write attempts, including failed ones.
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    /// Number of times `shutdown` was called.
    pub fn shutdowns(&self) -> usize {
        self.lock().shutdowns
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Record> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PacketSink for MockTransport {
    fn write_packet(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut record = self.lock();
        let attempt = record.attempts;
        record.attempts += 1;
        if self.fail_on == Some(attempt) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock failure"));
        }
        record.writes.push(bytes.to_vec());
        Ok(())
    }

    fn shutdown(&mut self) {
        self.lock().shutdowns += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_writes_through_clones() {
        // Arrange
        let mut transport = MockTransport::new();
        let record = transport.clone();

        // Act
        transport.write_packet(&[1, 2]).unwrap();
        transport.write_packet(&[3]).unwrap();
        transport.shutdown();

        // Assert
        assert_eq!(record.writes(), vec![vec![1, 2], vec![3]]);
        assert_eq!(record.shutdowns(), 1);
    }

    #[test]
    fn test_mock_fails_only_the_chosen_attempt() {
        let mut transport = MockTransport::failing_on(1);

        assert!(transport.write_packet(&[1]).is_ok());
        let err = transport.write_packet(&[2]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(transport.write_packet(&[3]).is_ok());

        assert_eq!(transport.writes(), vec![vec![1], vec![3]]);
        assert_eq!(transport.attempts(), 3);
    }
}
