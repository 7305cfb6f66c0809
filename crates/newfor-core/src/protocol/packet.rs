//! Encoder for the five Newfor packet kinds.
//!
//! Wire format:
//! ```text
//! CONNECT     [0E][00][D(mag)][D(tens)][D(units)]
//! BUILD       [8F][D(clear<<3 | rows)] { [D(row>>4)][D(row&F)][40 content bytes] } x rows
//! REVEAL      [10]
//! CLEAR       [98]
//! DISCONNECT  [0E][00][D(9)][D(9)][D(9)]
//! ```
//! `D(n)` is the Hamming 8/4 byte for nibble `n` (see [`crate::protocol::hamming`]).
//!
//! Packets carry no length prefix or checksum: the receiver knows the size of
//! each kind from its first byte and the BUILD row count.

use thiserror::Error;

use crate::domain::page::PageNumber;
use crate::protocol::hamming::{add_odd_parity, encode_digit};
use crate::protocol::row::{RowBuffer, ROW_WIDTH};

/// First two bytes of CONNECT and DISCONNECT.
pub const CONNECT_HEADER: [u8; 2] = [0x0E, 0x00];
/// First byte of BUILD.
pub const BUILD_MARKER: u8 = 0x8F;
/// The whole REVEAL packet.
pub const REVEAL: u8 = 0x10;
/// Control code of CLEAR before parity.
pub const CLEAR_CODE: u8 = 0x18;
/// Most rows one BUILD can carry (the count field is 3 bits wide).
pub const MAX_BUILD_ROWS: usize = 7;

/// Errors that can occur while encoding a packet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// A value passed to the Hamming encoder does not fit in 4 bits.
    #[error("nibble out of range: {0} (must be 0-15)")]
    NibbleOutOfRange(u8),

    /// A BUILD packet was asked to carry more rows than the count field holds.
    #[error("too many rows for one BUILD packet: {0} (max 7)")]
    TooManyRows(usize),

    /// A BUILD packet was asked to carry no rows at all.
    #[error("BUILD packet must carry at least one row")]
    EmptyBuild,
}

/// Discriminant of a packet, used in logs and error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    Connect,
    Build,
    Reveal,
    Clear,
    Disconnect,
}

impl std::fmt::Display for PacketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PacketKind::Connect => "CONNECT",
            PacketKind::Build => "BUILD",
            PacketKind::Reveal => "REVEAL",
            PacketKind::Clear => "CLEAR",
            PacketKind::Disconnect => "DISCONNECT",
        })
    }
}

/// One row of a BUILD packet: the display row it goes to and its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildRow {
    pub row: u8,
    pub content: RowBuffer,
}

/// A Newfor packet ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// Selects the page subsequent packets apply to.
    Connect(PageNumber),
    /// Loads rows into the receiver's buffer without showing them.
    Build {
        /// Erase the page before the rows are applied.
        clear: bool,
        rows: Vec<BuildRow>,
    },
    /// Shows the most recent BUILD.
    Reveal,
    /// Blanks the display, keeping the connected page.
    Clear,
    /// Ends the session by connecting to the illegal page 999.
    Disconnect,
}

impl Packet {
    /// The kind of this packet.
    pub fn kind(&self) -> PacketKind {
        match self {
            Packet::Connect(_) => PacketKind::Connect,
            Packet::Build { .. } => PacketKind::Build,
            Packet::Reveal => PacketKind::Reveal,
            Packet::Clear => PacketKind::Clear,
            Packet::Disconnect => PacketKind::Disconnect,
        }
    }
}

/// Encodes a [`Packet`] into its exact wire bytes.
///
/// # Errors
///
/// Returns [`ProtocolError::EmptyBuild`] or [`ProtocolError::TooManyRows`] for
/// a BUILD with 0 or more than [`MAX_BUILD_ROWS`] rows.
///
/// # Examples
///
/// ```rust
/// use newfor_core::{encode_packet, Packet, PageNumber};
///
/// let page: PageNumber = "888".parse().unwrap();
/// let bytes = encode_packet(&Packet::Connect(page)).unwrap();
/// assert_eq!(bytes, vec![0x0E, 0x00, 0xD0, 0xD0, 0xD0]);
/// assert_eq!(encode_packet(&Packet::Reveal).unwrap(), vec![0x10]);
/// ```
pub fn encode_packet(packet: &Packet) -> Result<Vec<u8>, ProtocolError> {
    match packet {
        Packet::Connect(page) => encode_page_select(page),
        Packet::Build { clear, rows } => encode_build(*clear, rows),
        Packet::Reveal => Ok(vec![REVEAL]),
        Packet::Clear => Ok(vec![add_odd_parity(CLEAR_CODE)]),
        Packet::Disconnect => encode_page_select(&PageNumber::ILLEGAL),
    }
}

fn encode_page_select(page: &PageNumber) -> Result<Vec<u8>, ProtocolError> {
    let mut buf = Vec::with_capacity(5);
    buf.extend_from_slice(&CONNECT_HEADER);
    for digit in page.digits() {
        buf.push(encode_digit(digit)?);
    }
    Ok(buf)
}

fn encode_build(clear: bool, rows: &[BuildRow]) -> Result<Vec<u8>, ProtocolError> {
    if rows.is_empty() {
        return Err(ProtocolError::EmptyBuild);
    }
    if rows.len() > MAX_BUILD_ROWS {
        return Err(ProtocolError::TooManyRows(rows.len()));
    }

    let mut buf = Vec::with_capacity(2 + rows.len() * (2 + ROW_WIDTH));
    buf.push(BUILD_MARKER);
    // Subtitle data nibble: bit 3 = clear page, bits 0-2 = row count.
    let flags = (u8::from(clear) << 3) | rows.len() as u8;
    buf.push(encode_digit(flags)?);

    for row in rows {
        buf.push(encode_digit(row.row >> 4)?);
        buf.push(encode_digit(row.row & 0x0F)?);
        buf.extend_from_slice(row.content.as_bytes());
    }
    Ok(buf)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
