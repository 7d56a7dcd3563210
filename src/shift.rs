//! Keeping spans anchored to their text across edits.
//!
//! Given the [`EditRegion`] of an edit, [`shift_spans`] moves every span so it
//! still covers the same logical text in the new buffer. Rules are tried in
//! order for each span:
//!
//! 1. Edit starts after the span's end: unchanged.
//! 2. Edit ends before the span's start: both bounds move by the delta.
//! 3. Pure insertion at `p` with `start <= p <= end`:
//!    - at `start` of a degenerate span the span grows (sticky caret style);
//!    - at `start` of a non-empty span the span moves (typing just before a
//!      run is not formatted);
//!    - anywhere else, including `end`, the span grows.
//! 4. Otherwise each bound is remapped on its own; bounds strictly inside the
//!    replaced region collapse to its start.
//!
//! Spans left empty afterwards are dropped.

use crate::diff::EditRegion;
use crate::span::FormattingSpan;

/// Shift every span across an edit, then drop spans left empty.
///
/// An empty region (identical texts) leaves the spans untouched, including
/// degenerate caret spans.
pub fn shift_spans(spans: &mut Vec<FormattingSpan>, region: &EditRegion) {
    if region.is_empty() {
        return;
    }

    for span in spans.iter_mut() {
        shift_span(span, region);
    }

    let before = spans.len();
    spans.retain(|span| !span.is_empty());
    let dropped = before - spans.len();
    if dropped > 0 {
        log::trace!("dropped {dropped} empty span(s) after edit");
    }
}

/// Shift a single span across an edit. The span may be left empty.
pub fn shift_span(span: &mut FormattingSpan, region: &EditRegion) {
    let delta = region.delta();
    let p = region.prefix;

    if p > span.end {
        return;
    }

    if region.old_end() < span.start {
        span.start = offset(span.start, delta);
        span.end = offset(span.end, delta);
        return;
    }

    if region.is_pure_insertion() && span.touches(p) {
        if p == span.start && !span.is_empty() {
            span.start = offset(span.start, delta);
        }
        span.end = offset(span.end, delta);
        return;
    }

    span.start = map_offset(span.start, region);
    span.end = map_offset(span.end, region).max(span.start);
}

/// Map an offset in the old text to the new text.
///
/// Offsets inside the replaced region collapse to its start.
#[must_use]
pub fn map_offset(idx: usize, region: &EditRegion) -> usize {
    if idx <= region.prefix {
        idx
    } else if idx >= region.old_end() {
        offset(idx, region.delta())
    } else {
        region.prefix
    }
}

fn offset(idx: usize, delta: isize) -> usize {
    idx.saturating_add_signed(delta)
}
