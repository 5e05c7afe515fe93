//! Named terminal colors.
//!
//! This module provides the closed set of colors a printer can apply to its
//! prefix or text, and the lookups that turn a color name into the ANSI
//! control sequence for the foreground or background category.
//!
//! # Examples
//!
//! ```
//! use confprint::color::{Color, resolve_background, resolve_foreground};
//!
//! let red = Color::parse("red").unwrap();
//! assert_eq!(red.foreground_code(), "\x1b[31m");
//!
//! // Lookups by name never fail: unknown names resolve to nothing.
//! assert_eq!(resolve_foreground("lightblue"), "\x1b[94m");
//! assert_eq!(resolve_background("reset"), "\x1b[49m");
//! assert_eq!(resolve_foreground("chartreuse"), "");
//! ```

use std::fmt;
use std::str::FromStr;

/// Reserved name that resolves to the reset code of a category.
pub const RESET: &str = "reset";

/// Foreground reset (SGR 39).
pub const FOREGROUND_RESET: &str = "\x1b[39m";

/// Background reset (SGR 49).
pub const BACKGROUND_RESET: &str = "\x1b[49m";

/// A named 4-bit ANSI color.
///
/// The eight standard colors map to SGR 30–37 (foreground) and 40–47
/// (background); the `Light*` variants map to the bright range 90–97 and
/// 100–107.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    LightBlack = 8,
    LightRed = 9,
    LightGreen = 10,
    LightYellow = 11,
    LightBlue = 12,
    LightMagenta = 13,
    LightCyan = 14,
    LightWhite = 15,
}

impl Color {
    /// All colors in palette order.
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::LightBlack,
        Self::LightRed,
        Self::LightGreen,
        Self::LightYellow,
        Self::LightBlue,
        Self::LightMagenta,
        Self::LightCyan,
        Self::LightWhite,
    ];

    const FOREGROUND_CODES: [&'static str; 16] = [
        "\x1b[30m", "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m", "\x1b[35m", "\x1b[36m",
        "\x1b[37m", "\x1b[90m", "\x1b[91m", "\x1b[92m", "\x1b[93m", "\x1b[94m", "\x1b[95m",
        "\x1b[96m", "\x1b[97m",
    ];

    const BACKGROUND_CODES: [&'static str; 16] = [
        "\x1b[40m", "\x1b[41m", "\x1b[42m", "\x1b[43m", "\x1b[44m", "\x1b[45m", "\x1b[46m",
        "\x1b[47m", "\x1b[100m", "\x1b[101m", "\x1b[102m", "\x1b[103m", "\x1b[104m",
        "\x1b[105m", "\x1b[106m", "\x1b[107m",
    ];

    /// The canonical lowercase name of this color.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::LightBlack => "lightblack",
            Self::LightRed => "lightred",
            Self::LightGreen => "lightgreen",
            Self::LightYellow => "lightyellow",
            Self::LightBlue => "lightblue",
            Self::LightMagenta => "lightmagenta",
            Self::LightCyan => "lightcyan",
            Self::LightWhite => "lightwhite",
        }
    }

    /// Palette number (0-15).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Control sequence selecting this color as foreground.
    #[must_use]
    pub const fn foreground_code(self) -> &'static str {
        Self::FOREGROUND_CODES[self as usize]
    }

    /// Control sequence selecting this color as background.
    #[must_use]
    pub const fn background_code(self) -> &'static str {
        Self::BACKGROUND_CODES[self as usize]
    }

    /// Look up a color by name, returning `None` for unknown names.
    ///
    /// Matching ignores case and surrounding whitespace. `bright_<color>`
    /// is accepted as an alias of `light<color>`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        let normalized = normalized
            .strip_prefix("bright_")
            .map_or(normalized.clone(), |base| format!("light{base}"));
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.name() == normalized)
    }

    /// Parse a color name strictly.
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError::Empty` for a blank name and
    /// `ColorParseError::UnknownColor` for a name outside the palette.
    pub fn parse(name: &str) -> Result<Self, ColorParseError> {
        if name.trim().is_empty() {
            return Err(ColorParseError::Empty);
        }
        Self::from_name(name).ok_or_else(|| ColorParseError::UnknownColor(name.to_string()))
    }
}

impl AsRef<str> for Color {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Error type for strict color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Resolve a foreground color name to its control sequence.
///
/// `"reset"` yields the foreground reset; unknown names yield `""`.
#[must_use]
pub fn resolve_foreground(name: &str) -> &'static str {
    if is_reset(name) {
        return FOREGROUND_RESET;
    }
    Color::from_name(name).map_or("", Color::foreground_code)
}

/// Resolve a background color name to its control sequence.
///
/// `"reset"` yields the background reset; unknown names yield `""`.
#[must_use]
pub fn resolve_background(name: &str) -> &'static str {
    if is_reset(name) {
        return BACKGROUND_RESET;
    }
    Color::from_name(name).map_or("", Color::background_code)
}

pub(crate) fn is_reset(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_foreground_codes() {
        assert_eq!(Color::Black.foreground_code(), "\x1b[30m");
        assert_eq!(Color::Red.foreground_code(), "\x1b[31m");
        assert_eq!(Color::White.foreground_code(), "\x1b[37m");
    }

    #[test]
    fn test_light_codes_use_bright_range() {
        assert_eq!(Color::LightBlack.foreground_code(), "\x1b[90m");
        assert_eq!(Color::LightWhite.foreground_code(), "\x1b[97m");
        assert_eq!(Color::LightRed.background_code(), "\x1b[101m");
        assert_eq!(Color::LightWhite.background_code(), "\x1b[107m");
    }

    #[test]
    fn test_every_name_round_trips() {
        for color in Color::ALL {
            assert_eq!(Color::from_name(color.name()), Some(color));
        }
    }

    #[test]
    fn test_palette_numbers_match_order() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(usize::from(color.number()), i);
        }
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Color::from_name("RED"), Some(Color::Red));
        assert_eq!(Color::from_name("  LightCyan "), Some(Color::LightCyan));
    }

    #[test]
    fn test_bright_alias() {
        assert_eq!(Color::from_name("bright_green"), Some(Color::LightGreen));
        assert_eq!(Color::from_name("bright_nothing"), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Color::parse(""), Err(ColorParseError::Empty));
        assert_eq!(Color::parse("   "), Err(ColorParseError::Empty));
        assert_eq!(
            Color::parse("orange"),
            Err(ColorParseError::UnknownColor("orange".to_string()))
        );
        assert_eq!("blue".parse::<Color>(), Ok(Color::Blue));
    }

    #[test]
    fn test_resolve_reset() {
        assert_eq!(resolve_foreground("reset"), FOREGROUND_RESET);
        assert_eq!(resolve_background("RESET"), BACKGROUND_RESET);
    }

    #[test]
    fn test_resolve_unknown_is_empty() {
        assert_eq!(resolve_foreground("orange"), "");
        assert_eq!(resolve_background(""), "");
    }

    #[test]
    fn test_resolve_known() {
        assert_eq!(resolve_foreground("magenta"), "\x1b[35m");
        assert_eq!(resolve_background("cyan"), "\x1b[46m");
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Color::LightYellow.to_string(), "lightyellow");
    }
}
