//! Operator commands and the dashboard they drive.
//!
//! Every command is a single key:
//!
//! | Key | Command |
//! |-----|---------|
//! | W Y G R B M A | color White, Yellow, Green, Red, Blue, Magenta, Cyan |
//! | X | toggle box |
//! | H | toggle double height |
//! | T N L | position Top, Middle, Lower |
//! | 1 2 3 | send the one, two or three line sample |
//! | C | clear the page |
//! | P | change page |
//! | Q | quit |
//!
//! Keys are case-insensitive.  Style commands only change [`ControlState`];
//! the binary turns send and clear commands into session calls.

use newfor_core::{Color, SubtitleStyle, VerticalPosition};

/// Sample subtitles sent by keys 1, 2 and 3.
pub const SAMPLE_LINES: [&[&str]; 3] = [
    &["THIS IS A SINGLE LINE"],
    &["THIS IS LINE ONE", "THIS IS LINE TWO"],
    &["TOP SUBTITLE LINE", "MIDDLE SUBTITLE LINE", "BOTTOM SUBTITLE LINE"],
];

/// One operator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetColor(Color),
    ToggleBox,
    ToggleDoubleHeight,
    SetPosition(VerticalPosition),
    /// Send [`SAMPLE_LINES`]`[n - 1]`; `n` is 1, 2 or 3.
    SendSample(usize),
    Clear,
    ChangePage,
    Quit,
}

impl Command {
    /// Maps a key to its command, or `None` for unbound keys.
    pub fn from_key(key: char) -> Option<Self> {
        let cmd = match key.to_ascii_uppercase() {
            'W' => Command::SetColor(Color::White),
            'Y' => Command::SetColor(Color::Yellow),
            'G' => Command::SetColor(Color::Green),
            'R' => Command::SetColor(Color::Red),
            'B' => Command::SetColor(Color::Blue),
            'M' => Command::SetColor(Color::Magenta),
            'A' => Command::SetColor(Color::Cyan),
            'X' => Command::ToggleBox,
            'H' => Command::ToggleDoubleHeight,
            'T' => Command::SetPosition(VerticalPosition::Top),
            'N' => Command::SetPosition(VerticalPosition::Middle),
            'L' => Command::SetPosition(VerticalPosition::Lower),
            '1' => Command::SendSample(1),
            '2' => Command::SendSample(2),
            '3' => Command::SendSample(3),
            'C' => Command::Clear,
            'P' => Command::ChangePage,
            'Q' => Command::Quit,
            _ => return None,
        };
        Some(cmd)
    }

    /// Parses every bound key in an input line, ignoring whitespace and
    /// unbound keys.
    pub fn parse_line(line: &str) -> Vec<Self> {
        line.chars().filter_map(Command::from_key).collect()
    }

    /// Lines of the sample this command sends, if it is a send command.
    pub fn sample_lines(&self) -> Option<&'static [&'static str]> {
        match self {
            Command::SendSample(n) => n.checked_sub(1).and_then(|i| SAMPLE_LINES.get(i)).copied(),
            _ => None,
        }
    }
}

/// Page and style the next subtitle is sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub page: String,
    pub style: SubtitleStyle,
}

impl ControlState {
    pub fn new(page: impl Into<String>, style: SubtitleStyle) -> Self {
        Self {
            page: page.into(),
            style,
        }
    }

    /// Applies a style command.  Returns `true` if the style changed shape
    /// (anything other than send, clear, page or quit).
    pub fn apply(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::SetColor(color) => self.style.color = color,
            Command::ToggleBox => self.style.boxed = !self.style.boxed,
            Command::ToggleDoubleHeight => self.style.double_height = !self.style.double_height,
            Command::SetPosition(position) => self.style.position = position,
            Command::SendSample(_) | Command::Clear | Command::ChangePage | Command::Quit => {
                return false
            }
        }
        true
    }

    /// One-line summary of the current style.
    pub fn status_line(&self) -> String {
        let boxed = if self.style.boxed { "[BOX ON]" } else { "[BOX OFF]" };
        let height = if self.style.double_height {
            "[DBL HIGH]"
        } else {
            "[NORMAL]"
        };
        let position = format!("[{}]", self.style.position.to_string().to_uppercase());
        format!(
            " CURRENT MODE: {:<8} {:<10} {:<12} {:<10}",
            self.style.color.name(),
            boxed,
            height,
            position
        )
    }
}

/// The key help banner printed at start-up and after a page change.
pub fn dashboard(target: &str, variant: &str, state: &ControlState) -> String {
    let rule = "=".repeat(63);
    let thin = "-".repeat(63);
    format!(
        "{rule}\n \
         NEWFOR INJECTOR v{version} | Target: {target} ({variant}) | Page: {page}\n\
         {rule}\n \
         [COLORS]   W:White Y:Yellow G:Green R:Red B:Blue A:Cyan M:Magenta\n \
         [ATTRS]    X:Toggle Box  H:Toggle Double-Height\n \
         [POSITION] T:Top  N:Middle  L:Lower\n \
         [SEND]     1:Single Line  2:Double Line  3:Triple Line\n \
         [ACTION]   C:Clear Page  P:Change Page  Q:Quit\n\
         {thin}\n\
         {status}",
        version = env!("CARGO_PKG_VERSION"),
        page = state.page,
        status = state.status_line(),
    )
}
