//! Fixed-width row content buffers.
//!
//! Every subtitle line is sent as exactly [`ROW_WIDTH`] bytes: the teletext
//! control codes that set up the line, the text itself, and padding.  All
//! bytes except the padding are odd-parity coded.
//!
//! Layout of a boxed, double-height white line `HI`:
//!
//! ```text
//! 0D 20 | 20 20 20 20 | 0B 0B | 07 20 | C8 49 | 8A 8A | 8A 8A 8A ...
//!  DH sp   left margin   start   white   H  I   end box   padding to 40
//!                         box                     (0x0A + parity)
//! ```

use thiserror::Error;
use tracing::debug;

use crate::domain::style::SubtitleStyle;
use crate::protocol::hamming::add_odd_parity;

/// Bytes per teletext display row.
pub const ROW_WIDTH: usize = 40;

/// WST control codes used in row content (before parity).
pub mod control {
    pub const START_BOX: u8 = 0x0B;
    pub const END_BOX: u8 = 0x0A;
    pub const DOUBLE_HEIGHT: u8 = 0x0D;
    pub const SPACE: u8 = 0x20;
}

/// Byte used to fill a row after its content.
pub const PADDING: u8 = 0x8A;

/// Blank cells written before the box so text does not touch the screen edge.
const LEFT_MARGIN: usize = 4;

/// Substituted for characters that have no single-byte teletext form.
const REPLACEMENT: u8 = b'?';

/// Row content did not fit in [`ROW_WIDTH`] bytes and was truncated.
///
/// This is a warning, not a failure: the row is still sent.  It usually means
/// the text is too long for the chosen style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("row content is {content_len} bytes; truncated to 40")]
pub struct EncodingOverflow {
    /// Length of the content before truncation.
    pub content_len: usize,
}

/// One display row of protected bytes, always exactly [`ROW_WIDTH`] long.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RowBuffer([u8; ROW_WIDTH]);

/// A row buffer plus the overflow warning raised while building it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedRow {
    pub buffer: RowBuffer,
    pub overflow: Option<EncodingOverflow>,
}

impl RowBuffer {
    /// Builds the canonical row for `line` in `style`.
    ///
    /// Never fails: over-long content is truncated and reported through
    /// [`EncodedRow::overflow`].
    pub fn encode(line: &str, style: &SubtitleStyle) -> EncodedRow {
        Self::from_content(assemble(line, style, true))
    }

    /// Builds a row the way the v1.4 burst revision did: identical to
    /// [`RowBuffer::encode`] except the box is never closed.
    pub(crate) fn encode_open_box(line: &str, style: &SubtitleStyle) -> EncodedRow {
        Self::from_content(assemble(line, style, false))
    }

    /// A row of padding only.
    pub fn blank() -> Self {
        Self([PADDING; ROW_WIDTH])
    }

    /// Truncates or pads `content` to exactly [`ROW_WIDTH`] bytes.
    pub fn from_content(mut content: Vec<u8>) -> EncodedRow {
        let content_len = content.len();
        let overflow = if content_len > ROW_WIDTH {
            debug!("row content of {content_len} bytes truncated to {ROW_WIDTH}");
            content.truncate(ROW_WIDTH);
            Some(EncodingOverflow { content_len })
        } else {
            content.resize(ROW_WIDTH, PADDING);
            None
        };

        let mut bytes = [0u8; ROW_WIDTH];
        bytes.copy_from_slice(&content);
        EncodedRow {
            buffer: Self(bytes),
            overflow,
        }
    }

    /// The 40 row bytes.
    pub fn as_bytes(&self) -> &[u8; ROW_WIDTH] {
        &self.0
    }
}

impl std::fmt::Debug for RowBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RowBuffer(")?;
        for b in self.0 {
            write!(f, "{b:02X}")?;
        }
        write!(f, ")")
    }
}

/// Maps a character to its single display byte (before parity).
pub fn text_byte(c: char) -> u8 {
    if c.is_ascii() && !c.is_ascii_control() {
        c as u8
    } else {
        REPLACEMENT
    }
}

/// Assembles unpadded row content in wire order.
fn assemble(line: &str, style: &SubtitleStyle, close_box: bool) -> Vec<u8> {
    let mut data = Vec::with_capacity(ROW_WIDTH);

    if style.double_height {
        data.push(add_odd_parity(control::DOUBLE_HEIGHT));
        data.push(add_odd_parity(control::SPACE));
    }

    data.extend(std::iter::repeat(add_odd_parity(control::SPACE)).take(LEFT_MARGIN));

    if style.boxed {
        data.push(add_odd_parity(control::START_BOX));
        data.push(add_odd_parity(control::START_BOX));
    }

    data.push(add_odd_parity(style.color.code()));
    data.push(add_odd_parity(control::SPACE));

    data.extend(line.chars().map(|c| add_odd_parity(text_byte(c))));

    if style.boxed && close_box {
        data.push(add_odd_parity(control::END_BOX));
        data.push(add_odd_parity(control::END_BOX));
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::{Color, VerticalPosition};
    use crate::protocol::hamming::has_odd_parity;

    fn style(boxed: bool, double_height: bool) -> SubtitleStyle {
        SubtitleStyle {
            color: Color::White,
            boxed,
            double_height,
            position: VerticalPosition::Lower,
        }
    }

    #[test]
    fn test_boxed_row_starts_with_margin_then_start_box() {
        let row = RowBuffer::encode("HELLO", &style(true, false));
        let bytes = row.buffer.as_bytes();
        assert_eq!(&bytes[0..4], &[0x20; 4]);
        assert_eq!(&bytes[4..6], &[0x0B, 0x0B]);
        assert_eq!(&bytes[6..8], &[0x07, 0x20]);
        assert_eq!(&bytes[8..13], &[0xC8, 0x45, 0x4C, 0x4C, 0x4F]);
        assert_eq!(&bytes[13..15], &[0x8A, 0x8A]);
        assert!(bytes[15..].iter().all(|&b| b == PADDING));
        assert_eq!(row.overflow, None);
    }

    #[test]
    fn test_double_height_prefix_comes_first() {
        let row = RowBuffer::encode("A", &style(false, true));
        let bytes = row.buffer.as_bytes();
        assert_eq!(&bytes[0..2], &[0x0D, 0x20]);
        assert_eq!(&bytes[2..6], &[0x20; 4]);
        assert_eq!(bytes[6], 0x07);
    }

    #[test]
    fn test_unboxed_row_has_no_box_codes() {
        let row = RowBuffer::encode("A", &style(false, false));
        let bytes = row.buffer.as_bytes();
        // margin(4) + color + space + 'A', then padding
        assert_eq!(bytes[4], 0x07);
        assert_eq!(bytes[6], add_odd_parity(b'A'));
        assert!(bytes[7..].iter().all(|&b| b == PADDING));
    }

    #[test]
    fn test_row_is_always_forty_bytes() {
        let long = "X".repeat(80);
        let cases = [
            ("SEVEN!!", style(true, true)),
            ("TWENTY ONE CHARACTERS", style(false, false)),
            ("", style(true, true)),
            (long.as_str(), style(true, true)),
        ];
        for (text, s) in cases {
            assert_eq!(RowBuffer::encode(text, &s).buffer.as_bytes().len(), ROW_WIDTH);
        }
    }

    #[test]
    fn test_exactly_full_row_is_not_an_overflow() {
        // 4 margin + 2 color/space + 34 text = 40
        let row = RowBuffer::encode(&"A".repeat(34), &style(false, false));
        assert_eq!(row.overflow, None);
        assert_eq!(row.buffer.as_bytes()[39], add_odd_parity(b'A'));
    }

    #[test]
    fn test_overlong_row_is_truncated_and_reported() {
        let row = RowBuffer::encode(&"A".repeat(35), &style(true, true));
        // 2 + 4 + 2 + 2 + 35 + 2 = 47
        assert_eq!(row.overflow, Some(EncodingOverflow { content_len: 47 }));
        assert_eq!(row.buffer.as_bytes()[39], add_odd_parity(b'A'));
    }

    #[test]
    fn test_every_non_padding_byte_has_odd_parity() {
        let row = RowBuffer::encode("Subtitle 123", &style(true, true));
        for &b in row.buffer.as_bytes() {
            assert!(has_odd_parity(b), "0x{b:02X}");
        }
    }

    #[test]
    fn test_non_ascii_characters_are_replaced() {
        assert_eq!(text_byte('é'), b'?');
        assert_eq!(text_byte('\t'), b'?');
        assert_eq!(text_byte('Z'), b'Z');
    }

    #[test]
    fn test_open_box_row_omits_end_box() {
        let row = RowBuffer::encode_open_box("HI", &style(true, false));
        let bytes = row.buffer.as_bytes();
        // margin(4) + start box(2) + color/space(2) + text(2) = 10, then padding
        assert_eq!(&bytes[8..10], &[add_odd_parity(b'H'), add_odd_parity(b'I')]);
        assert!(bytes[10..].iter().all(|&b| b == PADDING));
    }

    #[test]
    fn test_blank_row_is_all_padding() {
        assert_eq!(RowBuffer::blank().as_bytes(), &[PADDING; ROW_WIDTH]);
    }
}
