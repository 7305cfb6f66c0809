//! Integration tests for the newfor-core packet encoder.
//!
//! These tests drive whole subtitle updates through the public API and check
//! the exact bytes a receiver would see, exercising the layout engine, row
//! buffers, packet encoder, and wire variants together.

use newfor_core::protocol::{decode_digit, has_odd_parity};
use newfor_core::{
    encode_packet, Color, Packet, PacketKind, PageNumber, ProtocolVariant, SubtitleStyle,
    VerticalPosition,
};

/// Concatenates the bytes of every write, in order.
fn flatten(variant: ProtocolVariant, lines: &[&str], style: &SubtitleStyle) -> Vec<u8> {
    variant
        .wire()
        .subtitle(&PageNumber::default(), lines, style)
        .expect("subtitle must encode")
        .writes
        .into_iter()
        .flat_map(|w| w.bytes)
        .collect()
}

#[test]
fn test_hello_on_page_888_produces_exact_stream() {
    // Arrange
    let style = SubtitleStyle::default(); // white, boxed, single height, lower

    // Act
    let bytes = flatten(ProtocolVariant::Newfor, &["HELLO"], &style);

    // Assert
    let mut expected = vec![
        0x0E, 0x00, 0xD0, 0xD0, 0xD0, // CONNECT 888
        0x98, // CLEAR
        0x8F, 0xC7, // BUILD, clear + 1 row
        0x02, 0x2F, // row 23
        0x20, 0x20, 0x20, 0x20, // margin
        0x0B, 0x0B, // start box
        0x07, 0x20, // white, space
        0xC8, 0x45, 0x4C, 0x4C, 0x4F, // HELLO
        0x8A, 0x8A, // end box
    ];
    expected.extend(std::iter::repeat(0x8A).take(40 - 15)); // padding
    expected.push(0x10); // REVEAL
    assert_eq!(bytes, expected);
}

#[test]
fn test_build_row_addresses_decode_to_row_number() {
    // Arrange
    let style = SubtitleStyle::default();

    // Act
    let burst = ProtocolVariant::Newfor
        .wire()
        .subtitle(&PageNumber::default(), &["ONE", "TWO"], &style)
        .unwrap();
    let build = &burst.writes[2].bytes;

    // Assert: row 22 = 0x16, row 23 = 0x17, high nibble then low nibble
    assert_eq!(&build[2..4], &[0x02, 0x38]);
    assert_eq!(&build[44..46], &[0x02, 0x2F]);
    let decoded: Vec<u8> = [&build[2..4], &build[44..46]]
        .iter()
        .map(|addr| decode_digit(addr[0]).unwrap() << 4 | decode_digit(addr[1]).unwrap())
        .collect();
    assert_eq!(decoded, burst.rows);
    assert_eq!(decoded, vec![22, 23]);
}

#[test]
fn test_page_888_connect_decodes_back_to_digits() {
    let page: PageNumber = "888".parse().unwrap();
    let bytes = encode_packet(&Packet::Connect(page)).unwrap();

    let digits: Vec<u8> = bytes[2..]
        .iter()
        .map(|&b| decode_digit(b).expect("valid Hamming byte"))
        .collect();

    assert_eq!(digits, vec![8, 8, 8]);
}

#[test]
fn test_top_three_lines_land_on_rows_2_3_4() {
    // Arrange
    let style = SubtitleStyle {
        color: Color::Cyan,
        boxed: false,
        double_height: false,
        position: VerticalPosition::Top,
    };

    // Act
    let burst = ProtocolVariant::Newfor
        .wire()
        .subtitle(&PageNumber::default(), &["A", "B", "C"], &style)
        .unwrap();

    // Assert
    assert_eq!(burst.rows, vec![2, 3, 4]);
    let build = burst
        .writes
        .iter()
        .find(|w| w.kind == PacketKind::Build)
        .expect("one BUILD");
    let row_numbers: Vec<u8> = build.bytes[2..]
        .chunks(42)
        .map(|c| (decode_digit(c[0]).unwrap() << 4) | decode_digit(c[1]).unwrap())
        .collect();
    assert_eq!(row_numbers, vec![2, 3, 4]);
}

#[test]
fn test_every_row_byte_carries_odd_parity() {
    let style = SubtitleStyle {
        color: Color::Magenta,
        boxed: true,
        double_height: true,
        position: VerticalPosition::Middle,
    };

    let burst = ProtocolVariant::Newfor
        .wire()
        .subtitle(&PageNumber::default(), &["Line one", "Line two"], &style)
        .unwrap();
    let build = &burst.writes[2];
    assert_eq!(build.kind, PacketKind::Build);

    for chunk in build.bytes[2..].chunks(42) {
        for &b in &chunk[2..] {
            assert!(has_odd_parity(b), "byte 0x{b:02X} lacks odd parity");
        }
    }
}

#[test]
fn test_variants_disagree_only_where_expected() {
    let style = SubtitleStyle::default();

    let newfor = flatten(ProtocolVariant::Newfor, &["X"], &style);
    let burst = flatten(ProtocolVariant::Burst, &["X"], &style);
    let ascii = flatten(ProtocolVariant::Ascii, &["X"], &style);

    // All three end the update in a distinct way.
    assert_eq!(newfor.last(), Some(&0x10));
    assert_eq!(burst.last(), Some(&0x10));
    assert_eq!(ascii.last(), Some(&0x14));
    assert_eq!(&burst[..2], &[0x0E, 0x15]);
    assert_eq!(&newfor[..2], &[0x0E, 0x00]);
}
