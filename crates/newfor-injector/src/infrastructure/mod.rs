//! Infrastructure layer for the injector.
//!
//! Contains the OS-facing adapters: the TCP socket and the config file.
//!
//! **Dependency rule**: this layer may depend on `newfor_core`, but MUST NOT
//! import from `application`.
//!
//! # Sub-modules
//!
//! - **`transport`** – The `PacketSink` trait, its blocking TCP
//!   implementation, and a recording `MockTransport` for tests.
//!
//! - **`storage`** – TOML configuration persistence in the platform config
//!   directory.

pub mod storage;
pub mod transport;
