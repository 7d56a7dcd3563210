//! The editable body of one note.
//!
//! A [`Document`] is the full persisted state of a note: its text and the
//! spans over it. The text is authoritative; every span stays within
//! `[0, len]` where `len` is the text length in characters.

use crate::diff::{EditRegion, diff};
use crate::persist;
use crate::segment::{Segment, build_segments};
use crate::span::FormattingSpan;
use crate::store::{ActiveStyleRule, PartialToggle, SpanStore, ToggleOutcome};
use crate::style::{StyleSet, StyleType};

/// A selection in character offsets.
///
/// [`Selection::new`] orders the bounds; a hand-built reversed selection
/// counts as collapsed and has zero length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, swapping the bounds if they are reversed.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: end.max(start),
        }
    }

    /// A collapsed selection at `offset`.
    #[must_use]
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.end <= self.start
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Clamp both bounds into `[0, max]`.
    #[must_use]
    pub fn clamp(&self, max: usize) -> Self {
        Self::new(self.start.min(max), self.end.min(max))
    }
}

/// Note text plus its formatting spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Plain text content.
    text: String,
    /// Cached character length.
    length: usize,
    store: SpanStore,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unformatted document.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        let text: String = text.into();
        let length = text.chars().count();
        Self {
            text,
            length,
            store: SpanStore::new(),
        }
    }

    /// Create a document from text and untrusted spans.
    ///
    /// Spans are clamped into the text, empty ones dropped and same-style
    /// ones merged.
    #[must_use]
    pub fn from_parts(text: impl Into<String>, spans: Vec<FormattingSpan>) -> Self {
        let mut document = Self::with_text(text);
        document.store = SpanStore::normalized(spans, document.length);
        document
    }

    /// Load a persisted note. Never fails; see [`persist::deserialize`].
    #[must_use]
    pub fn load(blob: &str) -> Self {
        persist::deserialize(blob)
    }

    /// Encode to the persisted form.
    #[must_use]
    pub fn serialize(&self) -> String {
        persist::serialize(self)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub fn spans(&self) -> &[FormattingSpan] {
        self.store.spans()
    }

    #[must_use]
    pub fn store(&self) -> &SpanStore {
        &self.store
    }

    /// Replace the whole text, moving spans across the single changed region.
    pub fn apply_text_change(&mut self, new_text: impl Into<String>) -> EditRegion {
        let new_text: String = new_text.into();
        let region = diff(&self.text, &new_text);
        if region.is_empty() {
            return region;
        }
        self.store.apply_edit(&region);
        self.length = new_text.chars().count();
        self.text = new_text;
        debug_assert!(self.spans().iter().all(|span| span.end <= self.length));
        region
    }

    /// Replace the characters in `[start, end)` with `replacement`.
    ///
    /// Offsets past the end are clamped.
    pub fn replace_range(&mut self, start: usize, end: usize, replacement: &str) -> EditRegion {
        let range = Selection::new(start, end).clamp(self.length);
        let from = byte_offset(&self.text, range.start);
        let to = byte_offset(&self.text, range.end);

        let mut new_text = String::with_capacity(self.text.len() - (to - from) + replacement.len());
        new_text.push_str(&self.text[..from]);
        new_text.push_str(replacement);
        new_text.push_str(&self.text[to..]);
        self.apply_text_change(new_text)
    }

    /// Insert `text` at character offset `at`.
    pub fn insert(&mut self, at: usize, text: &str) -> EditRegion {
        self.replace_range(at, at, text)
    }

    /// Delete the characters in `[start, end)`.
    pub fn delete(&mut self, start: usize, end: usize) -> EditRegion {
        self.replace_range(start, end, "")
    }

    /// Toggle `style` over a selection.
    ///
    /// Collapsed selections and selections reaching past the text are ignored.
    pub fn toggle_style(
        &mut self,
        selection: Selection,
        style: StyleType,
        mode: PartialToggle,
    ) -> ToggleOutcome {
        if selection.is_collapsed() || selection.end > self.length {
            log::debug!(
                "ignoring {style} toggle over [{}, {}) in a {}-character note",
                selection.start,
                selection.end,
                self.length
            );
            return ToggleOutcome::Ignored;
        }
        self.store
            .toggle_style(selection.start, selection.end, style, mode)
    }

    /// Arm `style` at a caret so the next text typed there carries it.
    pub fn arm_style(&mut self, offset: usize, style: StyleType) -> ToggleOutcome {
        if offset > self.length {
            return ToggleOutcome::Ignored;
        }
        self.store.arm_style(offset, style)
    }

    /// Remove all formatting from a selection.
    ///
    /// Returns whether anything changed.
    pub fn clear_formatting(&mut self, selection: Selection) -> bool {
        if selection.is_collapsed() || selection.end > self.length {
            return false;
        }
        self.store.clear_formatting(selection.start, selection.end)
    }

    /// Styles active for a selection, for toolbar state.
    #[must_use]
    pub fn current_styles(&self, selection: Selection, rule: ActiveStyleRule) -> StyleSet {
        let selection = selection.clamp(self.length);
        self.store
            .current_styles(selection.start, selection.end, rule)
    }

    /// Flatten the spans into drawable segments.
    #[must_use]
    pub fn build_segments(&self) -> Vec<Segment<'_>> {
        build_segments(&self.text, self.store.spans())
    }
}

/// Byte offset of character `index`, or the text length past the end.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}
