//! Protocol module containing the digit/parity codec, row buffers, packets,
//! and the wire variants built from them.

pub mod hamming;
pub mod legacy;
pub mod packet;
pub mod row;
pub mod variant;

pub use hamming::{add_odd_parity, decode_digit, encode_digit, has_odd_parity};
pub use legacy::{AsciiWire, BurstWire};
pub use packet::{encode_packet, BuildRow, Packet, PacketKind, ProtocolError};
pub use row::{EncodedRow, EncodingOverflow, RowBuffer};
pub use variant::{
    EncodeError, NewforWire, ProtocolVariant, RowOverflow, SubtitleBurst, UnknownVariant,
    WireVariant, WireWrite,
};
