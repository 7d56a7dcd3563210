//! Formatting spans.
//!
//! A [`FormattingSpan`] tags the half-open character range `[start, end)` of
//! a note's text with one [`StyleType`]. Spans use character indices (not
//! byte indices). Spans of different types may overlap freely.

use serde::{Deserialize, Serialize};

use crate::style::StyleType;

/// A half-open character range carrying one style.
///
/// Spans have no identity beyond their `(start, end, style)` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormattingSpan {
    /// Start character index (inclusive).
    pub start: usize,
    /// End character index (exclusive).
    pub end: usize,
    /// Style applied over the range.
    #[serde(rename = "type")]
    pub style: StyleType,
}

impl FormattingSpan {
    /// Create a new span, swapping the bounds if they are reversed.
    #[must_use]
    pub fn new(start: usize, end: usize, style: StyleType) -> Self {
        Self {
            start: start.min(end),
            end: end.max(start),
            style,
        }
    }

    /// A zero-width span anchored at `offset`.
    #[must_use]
    pub fn caret(offset: usize, style: StyleType) -> Self {
        Self {
            start: offset,
            end: offset,
            style,
        }
    }

    /// Check if this span is empty (zero length).
    ///
    /// Degenerate spans carry no visible text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Get the length of this span in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check whether the span covers all of `[start, end)`.
    #[must_use]
    pub fn encloses(&self, start: usize, end: usize) -> bool {
        self.start <= start && self.end >= end
    }

    /// Check whether the span shares at least one character with `[start, end)`.
    #[must_use]
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        self.start < end && self.end > start
    }

    /// Check whether `offset` lies in `[start, end)`.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check whether `offset` lies in `[start, end]`.
    #[must_use]
    pub fn touches(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// The parts of this span left over once `[start, end)` is cut out.
    ///
    /// Returns (left, right); either side is `None` when nothing remains.
    #[must_use]
    pub fn cut(&self, start: usize, end: usize) -> (Option<Self>, Option<Self>) {
        let left = (self.start < start).then(|| Self {
            start: self.start,
            end: start.min(self.end),
            style: self.style,
        });
        let right = (self.end > end).then(|| Self {
            start: end.max(self.start),
            end: self.end,
            style: self.style,
        });
        (left, right)
    }

    /// Clamp both bounds into `[0, max]`.
    #[must_use]
    pub fn clamped(&self, max: usize) -> Self {
        Self {
            start: self.start.min(max),
            end: self.end.min(max),
            style: self.style,
        }
    }
}
