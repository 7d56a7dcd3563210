//! Style system for formatted note text.
//!
//! This module provides [`StyleType`], the closed set of styles a span can
//! carry, [`StyleSet`] for combinations of them, and [`ResolvedStyle`], the
//! single visual style a rendered segment ends up with.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// A style that can be applied to a span of text.
///
/// The discriminants are the ordinals written to the persisted form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize_repr, Deserialize_repr,
)]
#[repr(u8)]
pub enum StyleType {
    Bold = 0,
    Italic = 1,
    Underline = 2,
    Header1 = 3,
    Header2 = 4,
}

impl StyleType {
    /// Every style type, in ordinal order.
    pub const ALL: [Self; 5] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Header1,
        Self::Header2,
    ];

    /// The persisted ordinal of this style.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look a style up by its persisted ordinal.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Bold),
            1 => Some(Self::Italic),
            2 => Some(Self::Underline),
            3 => Some(Self::Header1),
            4 => Some(Self::Header2),
            _ => None,
        }
    }

    /// The flag for this style in a [`StyleSet`].
    #[must_use]
    pub const fn flag(self) -> StyleSet {
        match self {
            Self::Bold => StyleSet::BOLD,
            Self::Italic => StyleSet::ITALIC,
            Self::Underline => StyleSet::UNDERLINE,
            Self::Header1 => StyleSet::HEADER1,
            Self::Header2 => StyleSet::HEADER2,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Header1 => "header1",
            Self::Header2 => "header2",
        }
    }

    #[must_use]
    pub const fn is_header(self) -> bool {
        matches!(self, Self::Header1 | Self::Header2)
    }
}

impl fmt::Display for StyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleType {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        parse_style_type(&normalized).ok_or(StyleParseError::UnknownStyle(normalized))
    }
}

/// Parse a style name to its type.
fn parse_style_type(name: &str) -> Option<StyleType> {
    match name {
        "bold" | "b" => Some(StyleType::Bold),
        "italic" | "i" => Some(StyleType::Italic),
        "underline" | "u" => Some(StyleType::Underline),
        "header1" | "h1" => Some(StyleType::Header1),
        "header2" | "h2" => Some(StyleType::Header2),
        _ => None,
    }
}

bitflags! {
    /// A set of style types.
    ///
    /// Used for toolbar state and for the styles covering a rendered segment.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleSet: u8 {
        const BOLD      = 1 << 0;
        const ITALIC    = 1 << 1;
        const UNDERLINE = 1 << 2;
        const HEADER1   = 1 << 3;
        const HEADER2   = 1 << 4;
    }
}

impl StyleSet {
    /// Flags that combine freely with each other and with headers.
    pub const INLINE: Self = Self::BOLD.union(Self::ITALIC).union(Self::UNDERLINE);

    /// Check whether a style type is in the set.
    #[must_use]
    pub const fn has(&self, style: StyleType) -> bool {
        self.contains(style.flag())
    }

    /// Iterate the style types in the set, in ordinal order.
    pub fn types(&self) -> impl Iterator<Item = StyleType> + '_ {
        StyleType::ALL.into_iter().filter(|style| self.has(*style))
    }

    /// Collapse the set into the single style a segment is drawn with.
    ///
    /// Header1 takes precedence over header2; bold, italic and underline are
    /// additive regardless of header.
    #[must_use]
    pub fn resolve(&self) -> ResolvedStyle {
        let header = if self.contains(Self::HEADER1) {
            Some(HeaderLevel::H1)
        } else if self.contains(Self::HEADER2) {
            Some(HeaderLevel::H2)
        } else {
            None
        };
        ResolvedStyle {
            header,
            attributes: self.intersection(Self::INLINE),
        }
    }
}

impl From<StyleType> for StyleSet {
    fn from(style: StyleType) -> Self {
        style.flag()
    }
}

impl FromIterator<StyleType> for StyleSet {
    fn from_iter<I: IntoIterator<Item = StyleType>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, style| set | style.flag())
    }
}

impl fmt::Display for StyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = self.types().map(StyleType::name).collect();
        write!(f, "{}", names.join(" "))
    }
}

/// Header level of a resolved style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderLevel {
    H1,
    H2,
}

impl HeaderLevel {
    /// Font size multiplier relative to body text.
    #[must_use]
    pub const fn font_scale(self) -> f32 {
        match self {
            Self::H1 => 2.0,
            Self::H2 => 1.5,
        }
    }
}

/// The visual style of one rendered segment.
///
/// Unlike a [`StyleSet`], at most one header level survives resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResolvedStyle {
    /// Header level, if any header style covers the segment.
    pub header: Option<HeaderLevel>,
    /// Inline attributes (bold, italic, underline only).
    pub attributes: StyleSet,
}

impl ResolvedStyle {
    /// Unformatted body text.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.header.is_none() && self.attributes.is_empty()
    }

    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.attributes.contains(StyleSet::BOLD)
    }

    #[must_use]
    pub const fn is_italic(&self) -> bool {
        self.attributes.contains(StyleSet::ITALIC)
    }

    #[must_use]
    pub const fn is_underline(&self) -> bool {
        self.attributes.contains(StyleSet::UNDERLINE)
    }

    /// Whether the text is drawn with a heavy font weight.
    ///
    /// Headers are always heavy.
    #[must_use]
    pub const fn is_heavy(&self) -> bool {
        self.is_bold() || self.header.is_some()
    }

    /// Font size multiplier relative to body text.
    #[must_use]
    pub fn font_scale(&self) -> f32 {
        self.header.map_or(1.0, HeaderLevel::font_scale)
    }
}

impl fmt::Display for ResolvedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        match self.header {
            Some(HeaderLevel::H1) => parts.push("header1".to_string()),
            Some(HeaderLevel::H2) => parts.push("header2".to_string()),
            None => {}
        }
        if !self.attributes.is_empty() {
            parts.push(self.attributes.to_string());
        }
        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

/// Error type for style parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    UnknownStyle(String),
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStyle(s) => write!(f, "Unknown style: {s}"),
        }
    }
}

impl std::error::Error for StyleParseError {}
