//! Earlier protocol revisions kept for older receivers.
//!
//! Both revisions predate the CONNECT/BUILD/REVEAL framing.  They are selected
//! explicitly through [`crate::ProtocolVariant`] and share nothing with the
//! canonical encoder except the parity and row-content helpers.
//!
//! - **burst** – a burst-start sequence carrying the page, one fixed-header
//!   data packet per row, then an end marker.
//! - **ascii** – one packet per row with the page and row written as ASCII
//!   digits between NAK and ETX, no parity and no padding.
//!
//! Neither revision has a disconnect packet; closing the socket ends the
//! session.

use crate::domain::layout::compute_layout;
use crate::domain::page::PageNumber;
use crate::domain::style::{SubtitleStyle, VerticalPosition};
use crate::protocol::hamming::{add_odd_parity, HAMMING_8_4};
use crate::protocol::packet::{PacketKind, REVEAL};
use crate::protocol::row::{control, text_byte, RowBuffer, ROW_WIDTH};
use crate::protocol::variant::{
    EncodeError, RowOverflow, SubtitleBurst, WireVariant, WireWrite,
};

// ── burst ─────────────────────────────────────────────────────────────────────

/// Burst-start marker and filler used by the burst revision.
const BURST_START: u8 = 0x0E;
const BURST_FILL: u8 = 0x15;
/// Marker closing the burst-start sequence.
const BURST_MARKER: u8 = 0x98;
/// Fixed header of every burst data packet.
const BURST_DATA_HEADER: [u8; 3] = [0x8F, 0xC7, 0x02];

/// Digit encoding of the burst revision.
///
/// Same as Hamming 8/4 except that 0 was captured as 0xD0, the code for 8.
/// Combined with magazine folding, page 888 and page 088 look identical.
fn burst_digit(digit: u8) -> u8 {
    match digit {
        0 | 8 => 0xD0,
        d => HAMMING_8_4[usize::from(d & 0x0F)],
    }
}

/// Page bytes of the burst revision; magazine 8 is sent as magazine 0.
fn burst_page_bytes(page: &PageNumber) -> [u8; 3] {
    let magazine = if page.magazine() == 8 { 0 } else { page.magazine() };
    [
        burst_digit(magazine),
        burst_digit(page.tens()),
        burst_digit(page.units()),
    ]
}

/// The v1.4 burst revision.
#[derive(Debug, Default, Clone, Copy)]
pub struct BurstWire;

impl BurstWire {
    fn burst_start(page: &PageNumber) -> WireWrite {
        let [mag, tens, units] = burst_page_bytes(page);
        WireWrite {
            kind: PacketKind::Connect,
            bytes: vec![
                BURST_START, BURST_FILL, mag, tens, units, // page select
                BURST_START, BURST_FILL, BURST_FILL, BURST_FILL, BURST_FILL, // init confirm
                BURST_MARKER,
            ],
        }
    }

    fn end_marker() -> WireWrite {
        WireWrite {
            kind: PacketKind::Reveal,
            bytes: vec![REVEAL],
        }
    }
}

impl WireVariant for BurstWire {
    fn name(&self) -> &'static str {
        "burst"
    }

    fn subtitle(
        &self,
        page: &PageNumber,
        lines: &[&str],
        style: &SubtitleStyle,
    ) -> Result<SubtitleBurst, EncodeError> {
        let layout = compute_layout(lines.len(), style.position, style.double_height)?;

        let mut writes = vec![Self::burst_start(page)];
        let mut overflows = Vec::new();
        for (line, row) in lines.iter().zip(layout.rows()) {
            let encoded = RowBuffer::encode_open_box(line, style);
            if let Some(overflow) = encoded.overflow {
                overflows.push(RowOverflow { row, overflow });
            }
            let mut bytes = Vec::with_capacity(BURST_DATA_HEADER.len() + 1 + ROW_WIDTH);
            bytes.extend_from_slice(&BURST_DATA_HEADER);
            bytes.push(add_odd_parity(row));
            bytes.extend_from_slice(encoded.buffer.as_bytes());
            writes.push(WireWrite {
                kind: PacketKind::Build,
                bytes,
            });
        }
        writes.push(Self::end_marker());

        Ok(SubtitleBurst {
            writes,
            rows: layout.rows().collect(),
            overflows,
        })
    }

    fn clear(&self, page: &PageNumber) -> Result<Vec<WireWrite>, EncodeError> {
        Ok(vec![Self::burst_start(page), Self::end_marker()])
    }

    fn disconnect(&self) -> Result<Vec<WireWrite>, EncodeError> {
        Ok(Vec::new())
    }
}

// ── ascii ─────────────────────────────────────────────────────────────────────

/// Start and end of an ascii-revision packet.
const NAK: u8 = 0x15;
const ETX: u8 = 0x14;
/// End-box code of the ascii revision (later revisions use 0x0A).
const ASCII_END_BOX: u8 = 0x0C;
/// Rows blanked by an ascii-revision clear.
const ASCII_CLEAR_ROWS: std::ops::RangeInclusive<u8> = 18..=23;

/// The first revision: ASCII addressing, raw text.
///
/// Blocks are always anchored at the bottom; `style.position` is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiWire;

impl AsciiWire {
    fn packet(kind: PacketKind, page: &PageNumber, row: u8, data: &[u8]) -> WireWrite {
        let mut bytes = Vec::with_capacity(1 + 3 + 2 + data.len() + 1);
        bytes.push(NAK);
        bytes.extend_from_slice(page.to_string().as_bytes());
        bytes.extend_from_slice(format!("{row:02}").as_bytes());
        bytes.extend_from_slice(data);
        bytes.push(ETX);
        WireWrite { kind, bytes }
    }

    fn clear_writes(page: &PageNumber) -> Vec<WireWrite> {
        let blank = [control::SPACE; ROW_WIDTH];
        ASCII_CLEAR_ROWS
            .map(|row| Self::packet(PacketKind::Clear, page, row, &blank))
            .collect()
    }
}

impl WireVariant for AsciiWire {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn subtitle(
        &self,
        page: &PageNumber,
        lines: &[&str],
        style: &SubtitleStyle,
    ) -> Result<SubtitleBurst, EncodeError> {
        // This revision has no position control; blocks always sit at the bottom.
        let layout = compute_layout(lines.len(), VerticalPosition::Lower, style.double_height)?;

        let mut writes = Self::clear_writes(page);
        for (line, row) in lines.iter().zip(layout.rows()) {
            let mut data = Vec::with_capacity(line.len() + 4);
            if style.boxed {
                data.push(control::START_BOX);
            }
            data.push(style.color.code());
            if style.double_height {
                data.push(control::DOUBLE_HEIGHT);
            }
            data.extend(line.chars().map(text_byte));
            if style.boxed {
                data.push(ASCII_END_BOX);
            }
            writes.push(Self::packet(PacketKind::Build, page, row, &data));
        }

        // Rows are variable length here, so nothing is ever truncated.
        Ok(SubtitleBurst {
            writes,
            rows: layout.rows().collect(),
            overflows: Vec::new(),
        })
    }

    fn clear(&self, page: &PageNumber) -> Result<Vec<WireWrite>, EncodeError> {
        Ok(Self::clear_writes(page))
    }

    fn disconnect(&self) -> Result<Vec<WireWrite>, EncodeError> {
        Ok(Vec::new())
    }
}
