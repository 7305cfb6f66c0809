//! newfor-injector library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does newfor-injector do? (for beginners)
//!
//! A broadcast subtitle receiver listens on a TCP port and expects small
//! binary "Newfor" packets.  This program is the workstation side of that
//! link: it connects, and every time the operator asks for a subtitle it
//! sends the bytes that address the page, load the rows, and reveal them.
//!
//! The injector:
//!
//! 1. Reads the receiver address, page, protocol variant, and default style
//!    from the command line, the environment, or `config.toml`.
//! 2. Opens one TCP connection (a [`application::session::Session`]).
//! 3. Turns operator commands (colors, box, height, position, send, clear)
//!    into calls on the session.
//! 4. On quit, sends DISCONNECT and closes the socket.
//!
//! All byte-level encoding lives in `newfor_core`; this crate only owns the
//! socket, the configuration file, and the operator interface.

/// Application layer: the session state machine and operator commands.
pub mod application;

/// Infrastructure layer: TCP transport and configuration storage.
pub mod infrastructure;
