//! Common test utilities and logging infrastructure
//!
//! Sets up structured logging for integration tests with `tracing`. The
//! library logs through the `log` facade; the subscriber installed here also
//! captures those records, so engine decisions show up next to test
//! breadcrumbs when a test fails.
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=rich_note::store=trace` - Module-specific tracing
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use std::sync::Once;

use rich_note::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Idempotent; output goes to the test writer so it is captured by
/// `cargo test` unless `--nocapture` is passed.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rich_note=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_file(true)
                        .with_line_number(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// Type `text` one character at a time at the caret, reporting each
/// keystroke to the editor the way a host text field does.
pub fn type_text(editor: &mut Editor, text: &str) {
    for ch in text.chars() {
        let old = editor.text().to_string();
        let caret = editor.selection().start;
        let mut new: String = old.chars().take(caret).collect();
        new.push(ch);
        new.extend(old.chars().skip(caret));
        editor.on_text_changed(&old, &new);
    }
}

/// Press backspace `count` times at the caret.
pub fn backspace(editor: &mut Editor, count: usize) {
    for _ in 0..count {
        let caret = editor.selection().start;
        if caret == 0 {
            return;
        }
        let old = editor.text().to_string();
        let new: String = old
            .chars()
            .enumerate()
            .filter(|(i, _)| *i != caret - 1)
            .map(|(_, c)| c)
            .collect();
        editor.on_text_changed(&old, &new);
        editor.set_selection(caret - 1, caret - 1);
    }
}

/// Select the first occurrence of `needle`, in character offsets.
pub fn select(editor: &mut Editor, needle: &str) {
    let byte = editor
        .text()
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in {:?}", editor.text()));
    let start = editor.text()[..byte].chars().count();
    editor.set_selection(start, start + needle.chars().count());
}

/// Text covered by each span, sorted, for readable assertions.
pub fn styled_texts(document: &Document) -> Vec<(StyleType, String)> {
    let mut out: Vec<(StyleType, String)> = document
        .store()
        .sorted()
        .into_iter()
        .map(|span| {
            let text: String = document
                .text()
                .chars()
                .skip(span.start)
                .take(span.len())
                .collect();
            (span.style, text)
        })
        .collect();
    out.sort();
    out
}

/// Assert the structural invariants every document must satisfy.
pub fn assert_invariants(document: &Document) {
    let len = document.len();
    for span in document.spans() {
        assert!(span.start <= span.end, "inverted span {span:?}");
        assert!(span.end <= len, "span {span:?} past end of {len}-char text");
    }
    for style in StyleType::ALL {
        let spans: Vec<_> = document
            .store()
            .sorted()
            .into_iter()
            .filter(|span| span.style == style)
            .collect();
        for pair in spans.windows(2) {
            assert!(
                pair[0].end < pair[1].start,
                "{style} spans {:?} and {:?} overlap or touch",
                pair[0],
                pair[1]
            );
        }
    }
}
