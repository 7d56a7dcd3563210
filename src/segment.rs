//! Segment - the atomic rendering unit.
//!
//! A `Segment` is a slice of note text with a single resolved style. The
//! host draws a note by drawing its segments in order; together they cover
//! the whole buffer with no gaps or overlaps.
//!
//! Segments are rebuilt from scratch after every mutation rather than
//! maintained incrementally; notes are small.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use crossterm::style::{Attribute, Color, ContentStyle, StyledContent};
use smallvec::SmallVec;
use unicode_width::UnicodeWidthStr;

use crate::span::FormattingSpan;
use crate::style::{HeaderLevel, ResolvedStyle, StyleSet};

/// A run of text drawn with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The text content.
    pub text: Cow<'a, str>,
    /// Style types covering the whole run.
    pub styles: StyleSet,
    /// The style the run is drawn with.
    pub style: ResolvedStyle,
    /// Character offset of the run in the buffer.
    pub start: usize,
}

impl<'a> Segment<'a> {
    /// Create a segment covered by `styles`, starting at character `start`.
    #[must_use]
    pub fn new(text: impl Into<Cow<'a, str>>, start: usize, styles: StyleSet) -> Self {
        Self {
            text: text.into(),
            styles,
            style: styles.resolve(),
            start,
        }
    }

    /// Create an unformatted segment.
    #[must_use]
    pub fn plain(text: impl Into<Cow<'a, str>>, start: usize) -> Self {
        Self::new(text, start, StyleSet::empty())
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Exclusive end character offset.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len()
    }

    /// Get the terminal cell width of this segment.
    #[must_use]
    pub fn cell_length(&self) -> usize {
        self.text.width()
    }

    /// Detach the segment from the buffer it borrows.
    #[must_use]
    pub fn into_owned(self) -> Segment<'static> {
        Segment {
            text: Cow::Owned(self.text.into_owned()),
            styles: self.styles,
            style: self.style,
            start: self.start,
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Flatten possibly overlapping spans into ordered, non-overlapping segments.
///
/// Boundaries are `0`, the text length, and every span start and end clamped
/// into the text. Each non-empty interval between neighbouring boundaries
/// becomes a segment styled by the spans that fully cover it.
#[must_use]
pub fn build_segments<'a>(text: &'a str, spans: &[FormattingSpan]) -> Vec<Segment<'a>> {
    // Map character indices to byte indices for slicing
    let mut byte_indices: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    byte_indices.push(text.len());
    let length = byte_indices.len() - 1;

    let mut boundaries: SmallVec<[usize; 16]> = SmallVec::with_capacity(spans.len() * 2 + 2);
    boundaries.push(0);
    boundaries.push(length);
    for span in spans {
        boundaries.push(span.start.min(length));
        boundaries.push(span.end.min(length));
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut result = Vec::with_capacity(boundaries.len());
    for window in boundaries.windows(2) {
        let (from, to) = (window[0], window[1]);
        if from >= to {
            continue;
        }
        let styles: StyleSet = spans
            .iter()
            .filter(|span| span.start <= from && span.end >= to)
            .map(|span| span.style)
            .collect();
        let slice = &text[byte_indices[from]..byte_indices[to]];
        result.push(Segment::new(slice, from, styles));
    }
    result
}

/// Terminal style used to preview a resolved style.
///
/// Headers are drawn bold and cyan; header1 is also underlined.
#[must_use]
pub fn terminal_style(style: &ResolvedStyle) -> ContentStyle {
    let mut content = ContentStyle::new();
    match style.header {
        Some(HeaderLevel::H1) => {
            content.foreground_color = Some(Color::Cyan);
            content.attributes.set(Attribute::Bold);
            content.attributes.set(Attribute::Underlined);
        }
        Some(HeaderLevel::H2) => {
            content.foreground_color = Some(Color::Cyan);
            content.attributes.set(Attribute::Bold);
        }
        None => {}
    }
    if style.is_bold() {
        content.attributes.set(Attribute::Bold);
    }
    if style.is_italic() {
        content.attributes.set(Attribute::Italic);
    }
    if style.is_underline() {
        content.attributes.set(Attribute::Underlined);
    }
    content
}

/// Render segments to a string with ANSI escape codes.
///
/// Plain segments are written without escape codes.
#[must_use]
pub fn to_ansi(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.style.is_plain() {
            out.push_str(&segment.text);
        } else {
            let styled = StyledContent::new(terminal_style(&segment.style), segment.text.as_ref());
            let _ = write!(out, "{styled}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleType;

    fn span(start: usize, end: usize, style: StyleType) -> FormattingSpan {
        FormattingSpan::new(start, end, style)
    }

    fn texts<'a>(segments: &'a [Segment<'a>]) -> Vec<&'a str> {
        segments.iter().map(|s| s.text.as_ref()).collect()
    }

    #[test]
    fn test_render_empty() {
        assert!(build_segments("", &[]).is_empty());
        assert!(build_segments("", &[span(0, 3, StyleType::Bold)]).is_empty());
    }

    #[test]
    fn test_render_plain() {
        let segments = build_segments("hello", &[]);
        assert_eq!(segments, vec![Segment::plain("hello", 0)]);
    }

    #[test]
    fn test_overlapping_spans() {
        let spans = [span(0, 7, StyleType::Bold), span(4, 11, StyleType::Italic)];
        let segments = build_segments("Hello World", &spans);
        assert_eq!(texts(&segments), vec!["Hell", "o W", "orld"]);
        assert_eq!(segments[0].styles, StyleSet::BOLD);
        assert_eq!(segments[1].styles, StyleSet::BOLD | StyleSet::ITALIC);
        assert_eq!(segments[2].styles, StyleSet::ITALIC);
        assert_eq!(segments[2].start, 7);
    }

    #[test]
    fn test_gaps_become_plain_segments() {
        let segments = build_segments("Hello World", &[span(2, 5, StyleType::Underline)]);
        assert_eq!(texts(&segments), vec!["He", "llo", " World"]);
        assert!(segments[0].style.is_plain());
        assert!(segments[1].style.is_underline());
        assert!(segments[2].style.is_plain());
    }

    #[test]
    fn test_header_resolution() {
        let spans = [
            span(0, 5, StyleType::Header2),
            span(0, 3, StyleType::Header1),
            span(1, 2, StyleType::Bold),
        ];
        let segments = build_segments("Title", &spans);
        assert_eq!(texts(&segments), vec!["T", "i", "t", "le"]);
        assert_eq!(segments[0].style.header, Some(HeaderLevel::H1));
        assert_eq!(segments[1].style.header, Some(HeaderLevel::H1));
        assert!(segments[1].style.is_bold());
        assert_eq!(segments[3].style.header, Some(HeaderLevel::H2));
    }

    #[test]
    fn test_out_of_range_spans_are_clamped() {
        let segments = build_segments("abc", &[span(1, 99, StyleType::Bold)]);
        assert_eq!(texts(&segments), vec!["a", "bc"]);
        assert_eq!(segments[1].end(), 3);
    }

    #[test]
    fn test_caret_spans_do_not_split_styles() {
        let segments = build_segments("abcd", &[FormattingSpan::caret(2, StyleType::Bold)]);
        assert_eq!(texts(&segments), vec!["ab", "cd"]);
        assert!(segments.iter().all(|s| s.style.is_plain()));
    }

    #[test]
    fn test_multibyte_slicing() {
        let segments = build_segments("日本語テキスト", &[span(1, 3, StyleType::Bold)]);
        assert_eq!(texts(&segments), vec!["日", "本語", "テキスト"]);
        assert_eq!(segments[1].cell_length(), 4);
        assert_eq!(segments[1].len(), 2);
    }

    #[test]
    fn test_segments_cover_buffer() {
        let text = "The quick brown fox";
        let spans = [
            span(4, 9, StyleType::Bold),
            span(6, 15, StyleType::Italic),
            span(10, 19, StyleType::Underline),
        ];
        let segments = build_segments(text, &spans);
        let joined: String = segments.iter().map(ToString::to_string).collect();
        assert_eq!(joined, text);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start);
        }
    }

    #[test]
    fn test_to_ansi_plain_has_no_escapes() {
        let segments = build_segments("plain", &[]);
        assert_eq!(to_ansi(&segments), "plain");
    }

    #[test]
    fn test_to_ansi_styles_text() {
        let segments = build_segments("ab", &[span(0, 1, StyleType::Bold)]);
        let ansi = to_ansi(&segments);
        assert!(ansi.contains('\u{1b}'));
        assert!(ansi.ends_with('b'));
    }

    #[test]
    fn test_terminal_style_for_headers() {
        let h1 = terminal_style(&StyleSet::HEADER1.resolve());
        assert_eq!(h1.foreground_color, Some(Color::Cyan));
        assert!(h1.attributes.has(Attribute::Underlined));
        let h2 = terminal_style(&StyleSet::HEADER2.resolve());
        assert!(h2.attributes.has(Attribute::Bold));
        assert!(!h2.attributes.has(Attribute::Underlined));
    }

    #[test]
    fn test_into_owned_keeps_fields() {
        let text = String::from("abc");
        let owned = build_segments(&text, &[span(0, 3, StyleType::Italic)])
            .remove(0)
            .into_owned();
        drop(text);
        assert_eq!(owned.text, "abc");
        assert!(owned.style.is_italic());
    }
}
