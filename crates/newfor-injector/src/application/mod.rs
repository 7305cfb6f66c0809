//! Application layer use cases for the injector.
//!
//! # What use cases does the injector have?
//!
//! - **`session`** – The session client state machine.  It owns one
//!   [`crate::infrastructure::transport::PacketSink`] and turns "send these
//!   lines", "clear", and "disconnect" into ordered, flushed writes produced by
//!   the configured wire variant.
//!
//! - **`controls`** – Operator commands.  Maps a key (W, X, 1, C, ...) to a
//!   [`controls::Command`] and keeps the current style so the binary can render
//!   its dashboard and status line.

pub mod controls;
pub mod session;
