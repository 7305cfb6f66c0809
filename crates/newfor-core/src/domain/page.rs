//! Teletext page number.
//!
//! A page is addressed by three decimal digits: the magazine (hundreds) and a
//! two-digit page within it.  Subtitles conventionally go to page 888.
//!
//! Each digit travels on the wire as its own Hamming-protected byte, so the
//! value is stored pre-split instead of as a single integer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Highest page number a caller may address.
pub const MAX_PAGE: u16 = 899;

/// Errors produced when parsing a page number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    /// The input was empty or longer than three characters.
    #[error("page number must be 1 to 3 digits, got {0:?}")]
    InvalidLength(String),

    /// The input contained something other than ASCII digits.
    #[error("page number must contain only digits, got {0:?}")]
    NotNumeric(String),

    /// The value is above [`MAX_PAGE`] (magazine 9 is reserved).
    #[error("page {0:03} is out of range (000-899)")]
    OutOfRange(u16),
}

/// A three-digit teletext page address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageNumber {
    magazine: u8,
    tens: u8,
    units: u8,
}

impl PageNumber {
    /// The reserved illegal page 999, used only to terminate a session.
    pub const ILLEGAL: PageNumber = PageNumber {
        magazine: 9,
        tens: 9,
        units: 9,
    };

    /// Builds a page number from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] if `value` is above [`MAX_PAGE`].
    pub fn new(value: u16) -> Result<Self, PageError> {
        if value > MAX_PAGE {
            return Err(PageError::OutOfRange(value));
        }
        Ok(Self {
            magazine: (value / 100) as u8,
            tens: ((value / 10) % 10) as u8,
            units: (value % 10) as u8,
        })
    }

    /// The hundreds digit.
    pub fn magazine(&self) -> u8 {
        self.magazine
    }

    /// The tens digit.
    pub fn tens(&self) -> u8 {
        self.tens
    }

    /// The units digit.
    pub fn units(&self) -> u8 {
        self.units
    }

    /// The three digits in wire order.
    pub fn digits(&self) -> [u8; 3] {
        [self.magazine, self.tens, self.units]
    }

    /// The numeric value (0–899, or 999 for [`PageNumber::ILLEGAL`]).
    pub fn value(&self) -> u16 {
        u16::from(self.magazine) * 100 + u16::from(self.tens) * 10 + u16::from(self.units)
    }
}

impl Default for PageNumber {
    /// Page 888, the conventional subtitle page.
    fn default() -> Self {
        Self {
            magazine: 8,
            tens: 8,
            units: 8,
        }
    }
}

impl FromStr for PageNumber {
    type Err = PageError;

    /// Parses 1 to 3 digits; shorter inputs are left-padded with zeros, so
    /// `"88"` addresses page 088.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.len() > 3 {
            return Err(PageError::InvalidLength(s.to_string()));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PageError::NotNumeric(s.to_string()));
        }
        let value = s
            .bytes()
            .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
        Self::new(value)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.magazine, self.tens, self.units)
    }
}
