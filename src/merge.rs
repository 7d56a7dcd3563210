//! Coalescing same-type spans.
//!
//! After any mutation no two spans of one style may overlap or touch.
//! [`merge_spans`] restores that for one style, [`merge_all`] for every style.

use crate::span::FormattingSpan;
use crate::style::StyleType;

/// Merge overlapping or touching spans of `style` into single spans.
///
/// Spans of other styles are left as they are. Merged spans are appended
/// after them in start order.
pub fn merge_spans(spans: &mut Vec<FormattingSpan>, style: StyleType) {
    let mut matching: Vec<FormattingSpan> = Vec::new();
    spans.retain(|span| {
        if span.style == style {
            matching.push(*span);
            false
        } else {
            true
        }
    });

    if matching.len() > 1 {
        log::trace!("merging {} {style} span(s)", matching.len());
    }
    spans.extend(coalesce(matching));
}

/// Merge every style in turn.
pub fn merge_all(spans: &mut Vec<FormattingSpan>) {
    for style in StyleType::ALL {
        merge_spans(spans, style);
    }
}

/// Coalesce spans that are assumed to share one style.
fn coalesce(mut spans: Vec<FormattingSpan>) -> Vec<FormattingSpan> {
    spans.sort_by_key(|span| (span.start, span.end));

    let mut merged: Vec<FormattingSpan> = Vec::with_capacity(spans.len());
    let mut iter = spans.into_iter();
    let Some(mut current) = iter.next() else {
        return merged;
    };

    for next in iter {
        if next.start <= current.end {
            current.end = current.end.max(next.end);
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}
