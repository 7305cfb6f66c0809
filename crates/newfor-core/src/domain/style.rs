//! Subtitle presentation style.
//!
//! The style is an immutable value passed explicitly with every send.  The
//! interactive controller keeps its own "current style" and hands a copy to
//! the session; nothing in the core reads ambient state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// WST alphanumeric foreground colors (spacing attributes 0x01–0x07).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Every color, in control-code order.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// The WST control code (before parity) that selects this color.
    pub const fn code(self) -> u8 {
        match self {
            Color::Red => 0x01,
            Color::Green => 0x02,
            Color::Yellow => 0x03,
            Color::Blue => 0x04,
            Color::Magenta => 0x05,
            Color::Cyan => 0x06,
            Color::White => 0x07,
        }
    }

    /// Human-readable name shown on the dashboard.
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
            Color::Magenta => "Magenta",
            Color::Cyan => "Cyan",
            Color::White => "White",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a block of subtitle lines sits on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalPosition {
    /// Starts at row 2, directly under the page header.
    Top,
    /// Centred on row 12.
    Middle,
    /// Last line on row 23, the usual subtitle position.
    #[default]
    Lower,
}

impl fmt::Display for VerticalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerticalPosition::Top => "Top",
            VerticalPosition::Middle => "Middle",
            VerticalPosition::Lower => "Lower",
        })
    }
}

/// How a subtitle is rendered: color, box, height and vertical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleStyle {
    #[serde(default = "default_color")]
    pub color: Color,
    /// Wraps the text in a teletext box so it is keyed over the picture.
    #[serde(default = "default_boxed")]
    pub boxed: bool,
    /// Double-height characters; each line then occupies two display rows.
    #[serde(default)]
    pub double_height: bool,
    #[serde(default)]
    pub position: VerticalPosition,
}

fn default_color() -> Color {
    Color::White
}
fn default_boxed() -> bool {
    true
}

impl Default for SubtitleStyle {
    /// White, boxed, single height, lower third.
    fn default() -> Self {
        Self {
            color: default_color(),
            boxed: default_boxed(),
            double_height: false,
            position: VerticalPosition::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_codes_are_one_through_seven() {
        let codes: Vec<u8> = Color::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_default_style_matches_start_up_state() {
        let style = SubtitleStyle::default();
        assert_eq!(style.color, Color::White);
        assert!(style.boxed);
        assert!(!style.double_height);
        assert_eq!(style.position, VerticalPosition::Lower);
    }

    #[test]
    fn test_style_deserializes_with_missing_fields() {
        let style: SubtitleStyle = toml::from_str("color = \"yellow\"").expect("deserialize");
        assert_eq!(style.color, Color::Yellow);
        assert!(style.boxed);
        assert_eq!(style.position, VerticalPosition::Lower);
    }

    #[test]
    fn test_position_serializes_lowercase() {
        let style = SubtitleStyle {
            position: VerticalPosition::Middle,
            ..SubtitleStyle::default()
        };
        let text = toml::to_string(&style).expect("serialize");
        assert!(text.contains("position = \"middle\""), "got {text}");
    }
}
