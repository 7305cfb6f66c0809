//! Digit and parity codec for Newfor / WST bytes.
//!
//! # Two kinds of protection (for beginners)
//!
//! Teletext travels through an analogue broadcast chain where single bits get
//! flipped.  It protects bytes in two different ways depending on how much
//! damage a wrong value would do:
//!
//! - **Hamming 8/4** – addressing data (page digits, row numbers, packet
//!   flags) carries only 4 useful bits per byte.  The other 4 bits are
//!   redundancy, so a receiver can detect (and correct) a flipped bit.  We
//!   never compute the code: the 16 valid bytes are a fixed lookup table.
//!
//! - **Odd parity** – display characters use 7 data bits plus 1 parity bit
//!   (bit 7), chosen so every byte has an odd number of set bits.  A single
//!   flipped bit makes the count even, which the decoder can spot.
//!
//! ```text
//! nibble 0x9  --Hamming 8/4-->  0xC7
//! 'H' (0x48)  --odd parity-->   0xC8   (0x48 has 2 set bits, so bit 7 is set)
//! ```

use crate::protocol::packet::ProtocolError;

/// Hamming 8/4 protected byte for each nibble value 0x0–0xF.
pub const HAMMING_8_4: [u8; 16] = [
    0x15, 0x02, 0x49, 0x5E, 0x64, 0x73, 0x38, 0x2F, //
    0xD0, 0xC7, 0x8C, 0x9B, 0xA1, 0xB6, 0xFD, 0xEA,
];

/// Encodes a nibble (0–15) into its Hamming 8/4 protected byte.
///
/// # Errors
///
/// Returns [`ProtocolError::NibbleOutOfRange`] for any value above 15.  The
/// input is never clamped or masked, so a bad caller is always caught.
///
/// # Examples
///
/// ```rust
/// use newfor_core::protocol::hamming::encode_digit;
///
/// assert_eq!(encode_digit(8).unwrap(), 0xD0);
/// assert_eq!(encode_digit(9).unwrap(), 0xC7);
/// assert!(encode_digit(16).is_err());
/// ```
pub fn encode_digit(nibble: u8) -> Result<u8, ProtocolError> {
    HAMMING_8_4
        .get(nibble as usize)
        .copied()
        .ok_or(ProtocolError::NibbleOutOfRange(nibble))
}

/// Returns the nibble whose protected byte is exactly `byte`.
///
/// This is a strict reverse lookup: corrupted bytes yield `None` rather than
/// being corrected.
pub fn decode_digit(byte: u8) -> Option<u8> {
    HAMMING_8_4
        .iter()
        .position(|&b| b == byte)
        .map(|nibble| nibble as u8)
}

/// Sets bit 7 so that the byte carries odd parity over all 8 bits.
///
/// Bit 7 of the input is discarded first, so applying this twice gives the
/// same result as applying it once.
pub fn add_odd_parity(value: u8) -> u8 {
    let low = value & 0x7F;
    if low.count_ones() % 2 == 0 {
        low | 0x80
    } else {
        low
    }
}

/// Returns `true` if `value` has an odd number of set bits.
pub fn has_odd_parity(value: u8) -> bool {
    value.count_ones() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_digit_matches_table_for_every_nibble() {
        for nibble in 0u8..16 {
            assert_eq!(encode_digit(nibble).unwrap(), HAMMING_8_4[nibble as usize]);
        }
    }

    #[test]
    fn test_encode_digit_rejects_values_above_fifteen() {
        for nibble in [16u8, 99, 0xFF] {
            assert_eq!(
                encode_digit(nibble),
                Err(ProtocolError::NibbleOutOfRange(nibble))
            );
        }
    }

    #[test]
    fn test_encode_digit_known_capture_values() {
        // Digits observed in receiver captures of pages 123, 456, 567 and 889.
        assert_eq!(encode_digit(1).unwrap(), 0x02);
        assert_eq!(encode_digit(2).unwrap(), 0x49);
        assert_eq!(encode_digit(3).unwrap(), 0x5E);
        assert_eq!(encode_digit(4).unwrap(), 0x64);
        assert_eq!(encode_digit(5).unwrap(), 0x73);
        assert_eq!(encode_digit(6).unwrap(), 0x38);
        assert_eq!(encode_digit(7).unwrap(), 0x2F);
        assert_eq!(encode_digit(8).unwrap(), 0xD0);
        assert_eq!(encode_digit(9).unwrap(), 0xC7);
    }

    #[test]
    fn test_table_entries_are_distinct() {
        let mut sorted = HAMMING_8_4.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 16);
    }

    #[test]
    fn test_decode_digit_reverses_encode() {
        for nibble in 0u8..16 {
            let byte = encode_digit(nibble).unwrap();
            assert_eq!(decode_digit(byte), Some(nibble));
        }
    }

    #[test]
    fn test_decode_digit_rejects_unprotected_byte() {
        // 0x00 differs from every codeword.
        assert_eq!(decode_digit(0x00), None);
        assert_eq!(decode_digit(0x16), None);
    }

    #[test]
    fn test_add_odd_parity_makes_every_byte_odd() {
        for b in 0u8..=255 {
            let coded = add_odd_parity(b);
            let total = (coded & 0x7F).count_ones() + u32::from((coded >> 7) & 1);
            assert_eq!(total % 2, 1, "byte 0x{b:02X} -> 0x{coded:02X}");
        }
    }

    #[test]
    fn test_add_odd_parity_preserves_low_seven_bits() {
        for b in 0u8..=255 {
            assert_eq!(add_odd_parity(b) & 0x7F, b & 0x7F);
        }
    }

    #[test]
    fn test_add_odd_parity_is_idempotent() {
        for b in 0u8..=255 {
            let once = add_odd_parity(b);
            assert_eq!(add_odd_parity(once), once);
        }
    }

    #[test]
    fn test_add_odd_parity_known_values() {
        assert_eq!(add_odd_parity(0x20), 0x20); // space: 1 bit set
        assert_eq!(add_odd_parity(0x0B), 0x0B); // start box: 3 bits set
        assert_eq!(add_odd_parity(0x07), 0x07); // white: 3 bits set
        assert_eq!(add_odd_parity(0x03), 0x83); // yellow: 2 bits set
        assert_eq!(add_odd_parity(0x0A), 0x8A); // end box: 2 bits set
        assert_eq!(add_odd_parity(0x18), 0x98); // clear control code
        assert_eq!(add_odd_parity(0x0D), 0x0D); // double height: 3 bits set
        assert_eq!(add_odd_parity(b'H'), 0xC8);
    }

    #[test]
    fn test_has_odd_parity_agrees_with_add_odd_parity() {
        for b in 0u8..=255 {
            assert!(has_odd_parity(add_odd_parity(b)));
        }
        assert!(!has_odd_parity(0x00));
        assert!(!has_odd_parity(0x03));
    }
}
