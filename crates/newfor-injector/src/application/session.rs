//! Session client: one connection to one receiver.
//!
//! # Lifecycle (for beginners)
//!
//! ```text
//!   (no Session)  ──connect──▶  Connected  ──disconnect──▶  Disconnected
//!                                 │  ▲
//!                  send / clear   └──┘
//! ```
//!
//! - There is no "idle" value: until [`Session::connect`] succeeds there is no
//!   `Session` at all.  A failed connect returns an error and the caller may
//!   simply try again.
//! - `send` and `clear` keep the session `Connected` whether they succeed or
//!   not.  A failed write aborts the rest of that action only; the next
//!   keypress can retry.
//! - `disconnect` always releases the socket, even when the DISCONNECT packet
//!   itself cannot be written.  After that every action returns
//!   [`SessionError::Disconnected`].
//!
//! The bytes for each action come from the configured
//! [`newfor_core::WireVariant`]; the session only decides *when* to write and
//! what to do when a write fails.

use std::io;

use newfor_core::{
    EncodeError, LayoutError, PacketKind, PageError, PageNumber, ProtocolError, ProtocolVariant,
    RowOverflow, SubtitleStyle, WireVariant, WireWrite,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::infrastructure::transport::{PacketSink, ReceiverTarget, TcpTransport};

/// Errors reported by session operations.
///
/// None of these end the process: each one is reported to the operator, who
/// can retry the action.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The TCP connection could not be opened.
    #[error("could not connect to receiver at {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Writing or flushing a packet failed; later packets of the same action
    /// were not sent.
    #[error("failed to write {packet} packet: {source}")]
    Write {
        packet: PacketKind,
        #[source]
        source: io::Error,
    },

    /// The lines do not fit on screen in the requested layout.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The page text is not a valid page number.
    #[error(transparent)]
    Page(#[from] PageError),

    /// A packet could not be encoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The session has already been disconnected.
    #[error("session is disconnected")]
    Disconnected,
}

impl From<EncodeError> for SessionError {
    fn from(e: EncodeError) -> Self {
        match e {
            EncodeError::Layout(e) => SessionError::Layout(e),
            EncodeError::Protocol(e) => SessionError::Protocol(e),
        }
    }
}

/// Lifecycle phase of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Connected,
    Disconnected,
}

/// Outcome of a successful [`Session::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReport {
    /// Display rows that were written, top to bottom.
    pub rows: Vec<u8>,
    /// Rows whose content was truncated to fit.
    pub overflows: Vec<RowOverflow>,
}

/// A live connection to a Newfor receiver.
///
/// Not thread-safe by design: every method takes `&mut self`, so only one
/// action can be in flight.
pub struct Session<S: PacketSink = TcpTransport> {
    /// `None` once disconnected.
    sink: Option<S>,
    wire: &'static dyn WireVariant,
    peer: String,
}

impl Session<TcpTransport> {
    /// Opens a TCP connection to `target` and speaks `variant` on it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Connection`] if the socket cannot be opened.
    /// Nothing is created in that case, so the caller may retry.
    pub fn connect(target: &ReceiverTarget, variant: ProtocolVariant) -> Result<Self, SessionError> {
        info!("connecting to receiver {target} ({variant})");
        let transport = TcpTransport::connect(target).map_err(|source| {
            error!("connection to {target} failed: {source}");
            SessionError::Connection {
                addr: target.to_string(),
                source,
            }
        })?;
        let peer = transport.peer().to_string();
        Ok(Self::with_sink(transport, variant, peer))
    }
}

impl<S: PacketSink> Session<S> {
    /// Wraps an already-open sink.  Used by tests and by callers that manage
    /// their own connection.
    pub fn with_sink(sink: S, variant: ProtocolVariant, peer: impl Into<String>) -> Self {
        Self {
            sink: Some(sink),
            wire: variant.wire(),
            peer: peer.into(),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        if self.sink.is_some() {
            SessionPhase::Connected
        } else {
            SessionPhase::Disconnected
        }
    }

    /// Address (or label) of the receiver.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Name of the wire variant in use.
    pub fn variant_name(&self) -> &'static str {
        self.wire.name()
    }

    /// Puts `lines` on screen on `page`.
    ///
    /// With the canonical variant this writes CONNECT, CLEAR, BUILD and
    /// REVEAL, flushing after each.  Over-long rows are truncated, logged, and
    /// listed in the returned report.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Page`], [`SessionError::Layout`] or
    ///   [`SessionError::Protocol`] before anything is written.
    /// - [`SessionError::Write`] naming the first packet that failed; the
    ///   packets after it are not sent.
    /// - [`SessionError::Disconnected`] after [`Session::disconnect`].
    pub fn send<L: AsRef<str>>(
        &mut self,
        page: &str,
        lines: &[L],
        style: &SubtitleStyle,
    ) -> Result<SendReport, SessionError> {
        self.ensure_connected()?;
        let page: PageNumber = page.parse()?;
        let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();

        let burst = self.wire.subtitle(&page, &lines, style)?;
        for RowOverflow { row, overflow } in &burst.overflows {
            warn!("row {row}: {overflow}");
        }

        self.write_all(&burst.writes)?;
        info!(
            "subtitle sent to page {page}: {} line(s) on rows {:?}",
            lines.len(),
            burst.rows
        );
        Ok(SendReport {
            rows: burst.rows,
            overflows: burst.overflows,
        })
    }

    /// Blanks the display on `page`.
    ///
    /// # Errors
    ///
    /// As for [`Session::send`].
    pub fn clear(&mut self, page: &str) -> Result<(), SessionError> {
        self.ensure_connected()?;
        let page: PageNumber = page.parse()?;
        let writes = self.wire.clear(&page)?;
        self.write_all(&writes)?;
        info!("page {page} cleared");
        Ok(())
    }

    /// Ends the session and releases the socket.
    ///
    /// A second call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Write`] if the DISCONNECT packet could not be
    /// written.  The socket is released regardless.
    pub fn disconnect(&mut self) -> Result<(), SessionError> {
        let Some(mut sink) = self.sink.take() else {
            debug!("disconnect on a closed session ignored");
            return Ok(());
        };

        let result = self
            .wire
            .disconnect()
            .map_err(SessionError::from)
            .and_then(|writes| write_to(&mut sink, &writes));
        sink.shutdown();

        match &result {
            Ok(()) => info!("disconnected from receiver {}", self.peer),
            Err(e) => warn!("disconnected from receiver {} uncleanly: {e}", self.peer),
        }
        result
    }

    fn ensure_connected(&self) -> Result<(), SessionError> {
        match self.phase() {
            SessionPhase::Connected => Ok(()),
            SessionPhase::Disconnected => Err(SessionError::Disconnected),
        }
    }

    fn write_all(&mut self, writes: &[WireWrite]) -> Result<(), SessionError> {
        let sink = self.sink.as_mut().ok_or(SessionError::Disconnected)?;
        write_to(sink, writes)
    }
}

/// Writes each packet in order, stopping at the first failure.
fn write_to<S: PacketSink>(sink: &mut S, writes: &[WireWrite]) -> Result<(), SessionError> {
    for write in writes {
        sink.write_packet(&write.bytes).map_err(|source| {
            error!("{} write failed: {source}", write.kind);
            SessionError::Write {
                packet: write.kind,
                source,
            }
        })?;
        debug!("{} written ({} bytes)", write.kind, write.bytes.len());
    }
    Ok(())
}

impl<S: PacketSink> Drop for Session<S> {
    fn drop(&mut self) {
        if self.sink.is_some() {
            if let Err(e) = self.disconnect() {
                error!("disconnect during drop failed: {e}");
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
