//! Domain values for the Newfor subtitle injector.
//!
//! This module contains pure values and rules with no infrastructure
//! dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from OS APIs, network libraries, or terminal code.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Here that means: what a page number is, what a subtitle looks like, and
//! on which teletext rows a block of lines is placed.  The protocol layer
//! turns these values into bytes; the injector crate puts the bytes on a
//! socket.

/// Teletext page addressing.
pub mod page;

/// Row placement of a subtitle block on the 23-row teletext display.
pub mod layout;

/// Color, box, height and position of a subtitle.
pub mod style;
