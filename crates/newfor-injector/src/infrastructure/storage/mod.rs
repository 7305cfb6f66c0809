//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading `config.toml` from the platform config directory, or from an
//!   explicit `--config` path.
//! - Writing the current settings back to disk.
//! - Falling back to defaults when the file does not exist yet (first run).

pub mod config;
