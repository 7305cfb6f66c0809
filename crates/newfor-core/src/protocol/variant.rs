//! Wire variants: the byte sequences a session writes for each user action.
//!
//! The receiver protocol went through several incompatible revisions while it
//! was being worked out from packet captures.  The current one (`newfor`) is
//! the default; the earlier two are kept as separate strategies so a site
//! with an old receiver can still be driven.  A variant is chosen once, from
//! configuration, and never mixed with another inside one session.
//!
//! Each strategy turns a user action into an ordered list of [`WireWrite`]s.
//! The session writes and flushes them one at a time, stopping at the first
//! failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::layout::{compute_layout, LayoutError};
use crate::domain::page::PageNumber;
use crate::domain::style::SubtitleStyle;
use crate::protocol::legacy::{AsciiWire, BurstWire};
use crate::protocol::packet::{encode_packet, BuildRow, Packet, PacketKind, ProtocolError};
use crate::protocol::row::{EncodingOverflow, RowBuffer};

/// Errors raised while turning a subtitle into wire writes.
///
/// Nothing has been written when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// One flushed write: the bytes plus the packet kind they represent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireWrite {
    pub kind: PacketKind,
    pub bytes: Vec<u8>,
}

impl WireWrite {
    /// Encodes a canonical [`Packet`] into a write.
    pub fn packet(packet: &Packet) -> Result<Self, ProtocolError> {
        Ok(Self {
            kind: packet.kind(),
            bytes: encode_packet(packet)?,
        })
    }
}

/// An overflow warning tied to the display row it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOverflow {
    pub row: u8,
    pub overflow: EncodingOverflow,
}

/// The writes for one subtitle, plus any truncation warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleBurst {
    pub writes: Vec<WireWrite>,
    /// Display rows, top to bottom.
    pub rows: Vec<u8>,
    pub overflows: Vec<RowOverflow>,
}

/// A protocol revision, expressed as the writes for each session action.
pub trait WireVariant: Send + Sync {
    /// Short name used in configuration and logs.
    fn name(&self) -> &'static str;

    /// Writes that put `lines` on screen on `page`.
    fn subtitle(
        &self,
        page: &PageNumber,
        lines: &[&str],
        style: &SubtitleStyle,
    ) -> Result<SubtitleBurst, EncodeError>;

    /// Writes that blank the display.
    fn clear(&self, page: &PageNumber) -> Result<Vec<WireWrite>, EncodeError>;

    /// Writes that end the session.  May be empty.
    fn disconnect(&self) -> Result<Vec<WireWrite>, EncodeError>;
}

/// Configuration-level selector for a [`WireVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVariant {
    /// CONNECT / CLEAR / BUILD / REVEAL with Hamming-coded addressing.
    #[default]
    Newfor,
    /// Burst-start / data-packet revision with a fixed data header.
    Burst,
    /// First revision: ASCII page and row numbers between NAK and ETX.
    Ascii,
}

static NEWFOR: NewforWire = NewforWire;
static BURST: BurstWire = BurstWire;
static ASCII: AsciiWire = AsciiWire;

impl ProtocolVariant {
    /// Every variant, default first.
    pub const ALL: [ProtocolVariant; 3] = [
        ProtocolVariant::Newfor,
        ProtocolVariant::Burst,
        ProtocolVariant::Ascii,
    ];

    /// The strategy implementing this variant.
    pub fn wire(self) -> &'static dyn WireVariant {
        match self {
            ProtocolVariant::Newfor => &NEWFOR,
            ProtocolVariant::Burst => &BURST,
            ProtocolVariant::Ascii => &ASCII,
        }
    }
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire().name())
    }
}

/// Error returned when parsing an unknown variant name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown protocol variant {0:?} (expected newfor, burst or ascii)")]
pub struct UnknownVariant(pub String);

impl FromStr for ProtocolVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProtocolVariant::ALL
            .into_iter()
            .find(|v| v.wire().name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

// ── Canonical variant ─────────────────────────────────────────────────────────

/// The current protocol: CONNECT → CLEAR → BUILD → REVEAL per subtitle.
#[derive(Debug, Default, Clone, Copy)]
pub struct NewforWire;

impl WireVariant for NewforWire {
    fn name(&self) -> &'static str {
        "newfor"
    }

    fn subtitle(
        &self,
        page: &PageNumber,
        lines: &[&str],
        style: &SubtitleStyle,
    ) -> Result<SubtitleBurst, EncodeError> {
        let layout = compute_layout(lines.len(), style.position, style.double_height)?;

        let mut rows = Vec::with_capacity(lines.len());
        let mut overflows = Vec::new();
        for (line, row) in lines.iter().zip(layout.rows()) {
            let encoded = RowBuffer::encode(line, style);
            if let Some(overflow) = encoded.overflow {
                overflows.push(RowOverflow { row, overflow });
            }
            rows.push(BuildRow {
                row,
                content: encoded.buffer,
            });
        }
        let row_numbers = rows.iter().map(|r| r.row).collect();

        // One BUILD for the whole update; the clear flag applies to the page.
        let writes = vec![
            WireWrite::packet(&Packet::Connect(*page))?,
            WireWrite::packet(&Packet::Clear)?,
            WireWrite::packet(&Packet::Build { clear: true, rows })?,
            WireWrite::packet(&Packet::Reveal)?,
        ];

        Ok(SubtitleBurst {
            writes,
            rows: row_numbers,
            overflows,
        })
    }

    fn clear(&self, _page: &PageNumber) -> Result<Vec<WireWrite>, EncodeError> {
        Ok(vec![WireWrite::packet(&Packet::Clear)?])
    }

    fn disconnect(&self) -> Result<Vec<WireWrite>, EncodeError> {
        Ok(vec![WireWrite::packet(&Packet::Disconnect)?])
    }
}
