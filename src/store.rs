//! The span collection of a document and the operations that edit it.
//!
//! [`SpanStore`] owns the spans of one note. Besides shifting spans across
//! text edits it implements the user-facing style actions: toggling a style
//! over a selection, clearing formatting, arming a style at the caret, and
//! reporting which styles are active for toolbar state.
//!
//! # Partial overlap
//!
//! A style is toggled *off* only when a single span of that style encloses the
//! whole selection. A selection that merely crosses into a styled run is not
//! enclosed, so the style is turned *on* over it and merged with the run:
//! toggling across a boundary always extends the style to the union. Use
//! [`PartialToggle::Subtract`] to turn it off instead.

use crate::diff::EditRegion;
use crate::merge::{merge_all, merge_spans};
use crate::shift::shift_spans;
use crate::span::FormattingSpan;
use crate::style::{StyleSet, StyleType};

/// What toggling does when the selection is not enclosed by one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PartialToggle {
    /// Turn the style on over the selection and merge with any overlap.
    #[default]
    Union,
    /// Turn the style off over the selection if its start is styled.
    Subtract,
}

/// How a non-collapsed selection decides whether a style is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActiveStyleRule {
    /// Active when the character at the selection start carries the style.
    #[default]
    SelectionStart,
    /// Active only when one span covers the whole selection.
    FullCoverage,
}

/// Result of a toggle or arm action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleOutcome {
    /// The style now applies to the selection.
    Applied,
    /// The style was removed from the selection.
    Removed,
    /// Invalid or collapsed selection; nothing changed.
    Ignored,
}

impl ToggleOutcome {
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// The spans of one document.
///
/// Order inside the store is not meaningful; equality compares span sets.
/// Armed carets are session state: they are left out of [`sorted`](Self::sorted),
/// equality and the persisted form.
#[derive(Debug, Clone, Default)]
pub struct SpanStore {
    spans: Vec<FormattingSpan>,
}

impl SpanStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap spans as they are, without clamping or merging.
    #[must_use]
    pub fn from_spans(spans: Vec<FormattingSpan>) -> Self {
        Self { spans }
    }

    /// Build a store from untrusted spans over a buffer of `len` characters.
    ///
    /// Bounds are clamped into `[0, len]`, empty spans dropped and same-style
    /// spans merged.
    #[must_use]
    pub fn normalized(spans: Vec<FormattingSpan>, len: usize) -> Self {
        let mut spans: Vec<FormattingSpan> = spans
            .into_iter()
            .map(|span| span.clamped(len))
            .filter(|span| !span.is_empty())
            .collect();
        merge_all(&mut spans);
        Self { spans }
    }

    #[must_use]
    pub fn spans(&self) -> &[FormattingSpan] {
        &self.spans
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormattingSpan> {
        self.spans.iter()
    }

    /// Spans of one style.
    pub fn of_style(&self, style: StyleType) -> impl Iterator<Item = &FormattingSpan> {
        self.spans.iter().filter(move |span| span.style == style)
    }

    /// Non-empty spans sorted by `(start, end, style)`.
    #[must_use]
    pub fn sorted(&self) -> Vec<FormattingSpan> {
        let mut spans: Vec<FormattingSpan> =
            self.spans.iter().filter(|span| !span.is_empty()).copied().collect();
        spans.sort();
        spans
    }

    /// Carets armed by [`arm_style`](Self::arm_style) and not yet typed over.
    pub fn armed(&self) -> impl Iterator<Item = &FormattingSpan> {
        self.spans.iter().filter(|span| span.is_empty())
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<FormattingSpan> {
        self.spans
    }

    /// Move spans across a text edit.
    ///
    /// Empty spans are dropped and touching same-style runs merged, so a
    /// deletion that joins two bold runs leaves one.
    pub fn apply_edit(&mut self, region: &EditRegion) {
        if region.is_empty() {
            return;
        }
        shift_spans(&mut self.spans, region);
        merge_all(&mut self.spans);
    }

    /// Toggle `style` over `[start, end)`.
    ///
    /// An enclosing span of the style is split around the selection. Otherwise
    /// the style is added and merged, unless `mode` is
    /// [`PartialToggle::Subtract`] and the selection start is already styled.
    pub fn toggle_style(
        &mut self,
        start: usize,
        end: usize,
        style: StyleType,
        mode: PartialToggle,
    ) -> ToggleOutcome {
        if start >= end {
            return ToggleOutcome::Ignored;
        }

        let enclosing = self
            .spans
            .iter()
            .position(|span| span.style == style && span.encloses(start, end));

        if let Some(index) = enclosing {
            let span = self.spans.swap_remove(index);
            let (left, right) = span.cut(start, end);
            self.spans.extend(left);
            self.spans.extend(right);
            log::debug!("toggled {style} off over [{start}, {end})");
            return ToggleOutcome::Removed;
        }

        if mode == PartialToggle::Subtract && self.of_style(style).any(|span| span.contains(start)) {
            self.remove_range(start, end, Some(style));
            log::debug!("subtracted {style} over [{start}, {end})");
            return ToggleOutcome::Removed;
        }

        self.spans.push(FormattingSpan::new(start, end, style));
        merge_spans(&mut self.spans, style);
        log::debug!("toggled {style} on over [{start}, {end})");
        ToggleOutcome::Applied
    }

    /// Remove every style from `[start, end)`, keeping the parts of spans
    /// outside it.
    ///
    /// Returns whether anything changed.
    pub fn clear_formatting(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        let changed = self.remove_range(start, end, None);
        if changed {
            log::debug!("cleared formatting over [{start}, {end})");
        }
        changed
    }

    /// Arm `style` at a caret offset so the next text typed there carries it.
    ///
    /// Arming the same style twice at one offset disarms it. Arming inside or
    /// at the end of a run of the same style is ignored: typing there already
    /// extends the run.
    pub fn arm_style(&mut self, offset: usize, style: StyleType) -> ToggleOutcome {
        let caret = FormattingSpan::caret(offset, style);
        if let Some(index) = self.spans.iter().position(|span| *span == caret) {
            self.spans.swap_remove(index);
            log::debug!("disarmed {style} at {offset}");
            return ToggleOutcome::Removed;
        }
        if self
            .of_style(style)
            .any(|span| span.start < offset && offset <= span.end)
        {
            log::trace!("{style} already extends over typing at {offset}");
            return ToggleOutcome::Ignored;
        }
        self.spans.push(caret);
        log::debug!("armed {style} at {offset}");
        ToggleOutcome::Applied
    }

    /// Styles active for a selection, for toolbar state.
    ///
    /// For a caret at `c` a style is active if some span of it has
    /// `start <= c <= end`. For a range the result depends on `rule`; with
    /// [`ActiveStyleRule::SelectionStart`] only the first selected character
    /// is consulted.
    #[must_use]
    pub fn current_styles(&self, start: usize, end: usize, rule: ActiveStyleRule) -> StyleSet {
        let active = |span: &&FormattingSpan| {
            if start == end {
                span.touches(start)
            } else {
                match rule {
                    ActiveStyleRule::SelectionStart => span.contains(start),
                    ActiveStyleRule::FullCoverage => span.encloses(start, end),
                }
            }
        };
        self.spans.iter().filter(active).map(|span| span.style).collect()
    }

    /// Cut `[start, end)` out of spans, optionally only those of one style.
    fn remove_range(&mut self, start: usize, end: usize, only: Option<StyleType>) -> bool {
        let mut changed = false;
        let mut kept = Vec::with_capacity(self.spans.len() + 1);
        for span in self.spans.drain(..) {
            let selected = only.is_none_or(|style| span.style == style);
            if selected && span.intersects(start, end) {
                let (left, right) = span.cut(start, end);
                kept.extend(left);
                kept.extend(right);
                changed = true;
            } else {
                kept.push(span);
            }
        }
        self.spans = kept;
        changed
    }
}

impl PartialEq for SpanStore {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for SpanStore {}

impl From<Vec<FormattingSpan>> for SpanStore {
    fn from(spans: Vec<FormattingSpan>) -> Self {
        Self::from_spans(spans)
    }
}
