//! Font styles and style wraps.
//!
//! A [`Style`] groups the three style categories a printer can apply to a
//! segment: foreground color, background color and font attributes. It
//! renders into a [`StyleWrap`], the pair of control sequences placed
//! before and after the segment.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::color::{self, BACKGROUND_RESET, Color, FOREGROUND_RESET};

/// Font reset (SGR 0). Fonts have no category-specific reset.
pub const FONT_RESET: &str = "\x1b[0m";

bitflags! {
    /// Font attribute flags.
    ///
    /// Each flag corresponds to an ANSI SGR (Select Graphic Rendition) code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u16 {
        /// Bold/bright text (SGR 1).
        const BOLD      = 1 << 0;
        /// Dim/faint text (SGR 2).
        const DIM       = 1 << 1;
        /// Normal intensity (SGR 22).
        const NORMAL    = 1 << 2;
        /// Italic text (SGR 3).
        const ITALIC    = 1 << 3;
        /// Single underline (SGR 4).
        const UNDERLINE = 1 << 4;
        /// Slow blinking text (SGR 5).
        const BLINK     = 1 << 5;
        /// Reverse video (SGR 7).
        const REVERSE   = 1 << 6;
        /// Strikethrough text (SGR 9).
        const STRIKE    = 1 << 7;
    }
}

impl Attributes {
    const SGR_CODES: [(Self, &'static str); 8] = [
        (Self::BOLD, "\x1b[1m"),
        (Self::DIM, "\x1b[2m"),
        (Self::NORMAL, "\x1b[22m"),
        (Self::ITALIC, "\x1b[3m"),
        (Self::UNDERLINE, "\x1b[4m"),
        (Self::BLINK, "\x1b[5m"),
        (Self::REVERSE, "\x1b[7m"),
        (Self::STRIKE, "\x1b[9m"),
    ];

    /// Control sequences for the enabled attributes, in SGR table order.
    #[must_use]
    pub fn codes(&self) -> SmallVec<[&'static str; 4]> {
        Self::SGR_CODES
            .iter()
            .filter(|(attr, _)| self.contains(*attr))
            .map(|(_, code)| *code)
            .collect()
    }

    /// Build attributes from a whitespace separated list of font names.
    ///
    /// Unknown words are skipped, so `"bold sparkly"` is just bold.
    #[must_use]
    pub fn from_names(names: &str) -> Self {
        names
            .split_whitespace()
            .filter_map(Font::from_name)
            .fold(Self::empty(), |acc, font| acc | font.attribute())
    }
}

/// A single named font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Bold,
    Dim,
    Normal,
    Italic,
    Underline,
    Blink,
    Reverse,
    Strike,
}

impl Font {
    /// All font styles.
    pub const ALL: [Self; 8] = [
        Self::Bold,
        Self::Dim,
        Self::Normal,
        Self::Italic,
        Self::Underline,
        Self::Blink,
        Self::Reverse,
        Self::Strike,
    ];

    /// The canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Dim => "dim",
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Blink => "blink",
            Self::Reverse => "reverse",
            Self::Strike => "strike",
        }
    }

    /// The attribute flag for this font style.
    #[must_use]
    pub const fn attribute(self) -> Attributes {
        match self {
            Self::Bold => Attributes::BOLD,
            Self::Dim => Attributes::DIM,
            Self::Normal => Attributes::NORMAL,
            Self::Italic => Attributes::ITALIC,
            Self::Underline => Attributes::UNDERLINE,
            Self::Blink => Attributes::BLINK,
            Self::Reverse => Attributes::REVERSE,
            Self::Strike => Attributes::STRIKE,
        }
    }

    /// Control sequence for this font style.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.attribute().codes().first().copied().unwrap_or("")
    }

    /// Look up a font style by name, ignoring case and whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        Self::ALL.iter().copied().find(|font| font.name() == normalized)
    }
}

impl AsRef<str> for Font {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Font {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(StyleParseError::Empty);
        }
        Self::from_name(s).ok_or_else(|| StyleParseError::UnknownFont(s.to_string()))
    }
}

/// Error type for strict font style parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    Empty,
    UnknownFont(String),
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty font style"),
            Self::UnknownFont(s) => write!(f, "Unknown font style: {s}"),
        }
    }
}

impl std::error::Error for StyleParseError {}

impl From<Font> for Attributes {
    fn from(font: Font) -> Self {
        font.attribute()
    }
}

/// Resolve a font style name to its control sequence.
///
/// `"reset"` yields the full SGR reset; unknown names yield `""`.
#[must_use]
pub fn resolve_font_style(name: &str) -> &'static str {
    if color::is_reset(name) {
        return FONT_RESET;
    }
    Font::from_name(name).map_or("", Font::code)
}

/// Foreground, background and font selection for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub bgcolor: Option<Color>,
    /// Font attributes.
    pub attributes: Attributes,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.bgcolor.is_none() && self.attributes.is_empty()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    /// Add font attributes.
    #[must_use]
    pub fn attributes(mut self, attributes: impl Into<Attributes>) -> Self {
        self.attributes |= attributes.into();
        self
    }

    /// Build the control sequences around a styled segment.
    ///
    /// Codes are applied foreground, font, background; each applied
    /// category contributes its reset to the end sequence in that order.
    #[must_use]
    pub fn wrap(&self) -> StyleWrap {
        let mut wrap = StyleWrap::default();

        if let Some(color) = self.color {
            wrap.start.push_str(color.foreground_code());
            wrap.end.push_str(FOREGROUND_RESET);
        }

        if !self.attributes.is_empty() {
            for code in self.attributes.codes() {
                wrap.start.push_str(code);
            }
            wrap.end.push_str(FONT_RESET);
        }

        if let Some(bgcolor) = self.bgcolor {
            wrap.start.push_str(bgcolor.background_code());
            wrap.end.push_str(BACKGROUND_RESET);
        }

        wrap
    }
}

/// Control sequences surrounding a styled segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleWrap {
    /// Emitted before the segment.
    pub start: String,
    /// Emitted after the segment.
    pub end: String,
}

impl StyleWrap {
    /// Returns true if the wrap adds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// Surround `text` with this wrap.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(self.start.len() + text.len() + self.end.len());
        out.push_str(&self.start);
        out.push_str(text);
        out.push_str(&self.end);
        out
    }
}
