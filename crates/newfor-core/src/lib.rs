//! # newfor-core
//!
//! Shared library for the Newfor subtitle injector containing the digit/parity
//! codec, the packet encoder, the supported wire variants, and the domain
//! types (page numbers, subtitle styles, row layout).
//!
//! It has zero dependencies on OS APIs, terminals, or network sockets: every
//! function here turns values into bytes, so the whole crate can be tested
//! without a receiver.
//!
//! # Architecture overview (for beginners)
//!
//! A Newfor receiver sits between a subtitle workstation and a broadcast
//! teletext (WST) inserter.  The workstation opens a TCP connection and pushes
//! small binary packets that say "address page 888", "here are the rows",
//! "show them now", and so on.  The receiver turns those rows into teletext
//! lines on air.
//!
//! This crate (`newfor-core`) is the foundation.  It defines:
//!
//! - **`protocol`** – How bytes travel over the wire.  Page digits and row
//!   numbers are Hamming 8/4 protected, text bytes carry odd parity, and each
//!   row is a fixed 40-byte buffer.
//!
//! - **`domain`** – Pure values with no I/O: the page number, the subtitle
//!   style (color, box, height, position), and the layout engine that decides
//!   which display rows a block of lines lands on.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `newfor_core::SubtitleStyle` instead of `newfor_core::domain::style::SubtitleStyle`.
pub use domain::layout::{compute_layout, LayoutError, RowLayout};
pub use domain::page::{PageError, PageNumber};
pub use domain::style::{Color, SubtitleStyle, VerticalPosition};
pub use protocol::packet::{encode_packet, BuildRow, Packet, PacketKind, ProtocolError};
pub use protocol::row::{EncodedRow, EncodingOverflow, RowBuffer};
pub use protocol::variant::{
    EncodeError, ProtocolVariant, RowOverflow, SubtitleBurst, UnknownVariant, WireVariant,
    WireWrite,
};
