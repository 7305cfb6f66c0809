//! Row layout engine.
//!
//! A teletext page has 24 rows.  Row 0 is the page header the inserter
//! generates itself and subtitles live in rows 1–23; the Top position still
//! leaves row 1 empty.
//! Given how many lines a subtitle has, where it should sit, and whether it is
//! double height, the engine picks the display row of every line.
//!
//! ```text
//! single height, 2 lines, Lower        double height, 2 lines, Lower
//!   row 22  LINE ONE                     row 21  LINE ONE   (+ row 22)
//!   row 23  LINE TWO                     row 23  LINE TWO   (+ row 24)
//! ```

use thiserror::Error;

use crate::domain::style::VerticalPosition;

/// First row a subtitle may occupy.
pub const FIRST_ROW: u8 = 1;
/// Last row a subtitle may occupy.
pub const LAST_ROW: u8 = 23;
/// Most lines one subtitle can carry.
pub const MAX_LINES: usize = 3;

/// Row the Top position starts on (row 1 is left for the header area).
const TOP_START_ROW: i32 = 2;
/// Row the Middle position centres on.
const MIDDLE_CENTRE_ROW: i32 = 12;

/// Errors produced by [`compute_layout`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The subtitle has no lines or more than [`MAX_LINES`].
    #[error("a subtitle must have 1 to 3 lines, got {0}")]
    LineCount(usize),

    /// A line would land outside rows 1–23.
    #[error("row {0} is outside the display range 1-23")]
    RowOutOfRange(i32),
}

/// The rows chosen for one subtitle block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// Display row of the first line.
    pub start_row: u8,
    /// Distance between consecutive lines (2 for double height).
    pub spacing: u8,
    /// Number of lines in the block.
    pub line_count: usize,
}

impl RowLayout {
    /// Display row of line `index` (0-based).
    pub fn row(&self, index: usize) -> u8 {
        self.start_row + index as u8 * self.spacing
    }

    /// Display rows of every line, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.line_count).map(move |i| self.row(i))
    }

    /// Display row of the last line.
    pub fn last_row(&self) -> u8 {
        self.row(self.line_count - 1)
    }
}

/// Computes the display rows for `line_count` lines.
///
/// # Errors
///
/// Returns [`LayoutError::LineCount`] if `line_count` is not 1–3, and
/// [`LayoutError::RowOutOfRange`] if any line would leave rows 1–23.
///
/// # Examples
///
/// ```rust
/// use newfor_core::{compute_layout, VerticalPosition};
///
/// let layout = compute_layout(3, VerticalPosition::Top, true).unwrap();
/// assert_eq!(layout.rows().collect::<Vec<_>>(), vec![2, 4, 6]);
/// ```
pub fn compute_layout(
    line_count: usize,
    position: VerticalPosition,
    double_height: bool,
) -> Result<RowLayout, LayoutError> {
    if line_count == 0 || line_count > MAX_LINES {
        return Err(LayoutError::LineCount(line_count));
    }

    let lines = line_count as i32;
    let spacing: i32 = if double_height { 2 } else { 1 };
    let total_height = lines + (lines - 1) * (spacing - 1);

    let start_row = match position {
        VerticalPosition::Top => TOP_START_ROW,
        VerticalPosition::Middle => MIDDLE_CENTRE_ROW - total_height / 2,
        VerticalPosition::Lower => i32::from(LAST_ROW) - (lines - 1) * spacing,
    };
    let last_row = start_row + (lines - 1) * spacing;

    for row in [start_row, last_row] {
        if row < i32::from(FIRST_ROW) || row > i32::from(LAST_ROW) {
            return Err(LayoutError::RowOutOfRange(row));
        }
    }

    Ok(RowLayout {
        start_row: start_row as u8,
        spacing: spacing as u8,
        line_count,
    })
}
