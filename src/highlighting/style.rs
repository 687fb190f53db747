use crate::error::ConfigError;
use crate::highlighting::visible_length::pad_visible;
use std::fmt;
use std::str::FromStr;

/// Introduces every escape run written by [`Style::decorate`].
pub const ESCAPE: char = '\x1b';
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
    Cyan,
    White,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Purple,
        Color::Cyan,
        Color::White,
    ];

    /// SGR foreground code, 30 to 37.
    pub fn code(self) -> u8 {
        match self {
            Color::Black => 30,
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Purple => 35,
            Color::Cyan => 36,
            Color::White => 37,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Cyan => "cyan",
            Color::White => "white",
        }
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .iter()
            .copied()
            .find(|color| color.name() == s)
            .ok_or_else(|| ConfigError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a completed match is rendered: a foreground color, optionally bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub color: Color,
    pub bold: bool,
}

impl Style {
    pub fn new(color: Color, bold: bool) -> Self {
        Self { color, bold }
    }

    /// Wrap `s` in a start escape and a reset escape.
    ///
    /// The decoration adds eleven characters to `s`, all of them inside
    /// escape runs.
    pub fn decorate(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 11);
        self.decorate_into(s, &mut out);
        out
    }

    /// Same as [`Style::decorate`] but appends to an existing buffer.
    pub fn decorate_into(&self, s: &str, out: &mut String) {
        out.push(ESCAPE);
        out.push_str(&format!("[{};{}m", u8::from(self.bold), self.color.code()));
        out.push_str(s);
        out.push_str(RESET);
    }
}

/// Parses a style token: a color name with an optional leading `+` for bold.
impl FromStr for Style {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (bold, name) = match s.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let color = name
            .parse::<Color>()
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))?;
        Ok(Style::new(color, bold))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bold {
            f.write_str("+")?;
        }
        f.write_str(self.color.name())
    }
}

/// One line per color, showing the normal and bold renderings side by side.
pub fn palette() -> String {
    let mut out = String::new();
    for color in Color::ALL {
        let normal = Style::new(color, false).decorate(color.name());
        let bold = Style::new(color, true).decorate(&format!("+{}", color.name()));
        out.push_str(&pad_visible(&normal, 20));
        out.push_str("  ");
        out.push_str(&pad_visible(&bold, 20));
        out.push('\n');
    }
    out
}
