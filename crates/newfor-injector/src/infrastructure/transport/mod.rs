//! Transport infrastructure: where encoded packets go.
//!
//! The session never touches a socket directly.  It writes through the
//! [`PacketSink`] trait, which has two implementations:
//!
//! - [`TcpTransport`] – a blocking `std::net::TcpStream` to the receiver.
//! - [`mock::MockTransport`] – records every write in memory for tests.
//!
//! # Why blocking I/O? (for beginners)
//!
//! The receiver never answers, there is exactly one connection, and every
//! write is triggered by an operator keypress.  A plain blocking socket keeps
//! the write order obvious: each packet is written and flushed before the next
//! one starts, and an error surfaces at the exact packet that failed.

pub mod mock;

use std::fmt;
use std::io::{self, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use tracing::{debug, info};

/// A destination for encoded packets.
///
/// Implementations must not reorder or coalesce writes: when
/// [`PacketSink::write_packet`] returns `Ok`, the bytes have been handed to the
/// OS (or recorded) and flushed.
pub trait PacketSink {
    /// Writes `bytes` in full and flushes.
    fn write_packet(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Releases the underlying connection.  Called at most once.
    fn shutdown(&mut self);
}

/// Where the receiver lives and how patient to be with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverTarget {
    pub host: String,
    pub port: u16,
    /// Per-write deadline.  `None` blocks until the OS gives up.
    pub write_timeout: Option<Duration>,
}

impl ReceiverTarget {
    /// Creates a target with no write timeout.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            write_timeout: None,
        }
    }

    /// Sets the per-write deadline.
    pub fn with_write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }
}

impl fmt::Display for ReceiverTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Blocking TCP connection to a Newfor receiver.
pub struct TcpTransport {
    stream: TcpStream,
    peer: String,
}

impl TcpTransport {
    /// Opens a TCP connection to `target`.
    ///
    /// `host` may be an IP address or a name; every resolved address is tried
    /// in turn.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from resolution or the last connect attempt.
    pub fn connect(target: &ReceiverTarget) -> io::Result<Self> {
        let stream = TcpStream::connect((target.host.as_str(), target.port))?;
        // Packets are tiny and must go out immediately.
        stream.set_nodelay(true)?;
        stream.set_write_timeout(target.write_timeout)?;

        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| target.to_string());
        info!("TCP connection to receiver {peer} established");
        Ok(Self { stream, peer })
    }

    /// Address of the connected receiver.
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

impl PacketSink for TcpTransport {
    fn write_packet(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes)?;
        self.stream.flush()
    }

    fn shutdown(&mut self) {
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            // Already closed by the peer; the socket is released on drop anyway.
            debug!("socket shutdown for {}: {e}", self.peer);
        }
    }
}
