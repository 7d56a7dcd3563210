//! End-to-end tests for the persisted note form.
//!
//! These tests verify:
//! - The canonical encoding of documents
//! - Loading legacy plain-text notes
//! - Recovery from malformed or corrupted blobs
//! - Editing sessions surviving a save/load cycle
//!
//! Run with: RUST_LOG=debug cargo test --test e2e_persistence -- --nocapture

mod common;

use common::{init_test_logging, select, styled_texts, type_text};
use rich_note::persist::{self, PersistError};
use rich_note::prelude::*;

#[test]
fn e2e_canonical_encoding() {
    init_test_logging();
    let document = Document::from_parts(
        "Hello World",
        vec![
            FormattingSpan::new(6, 11, StyleType::Underline),
            FormattingSpan::new(0, 5, StyleType::Header2),
            FormattingSpan::new(0, 11, StyleType::Bold),
        ],
    );
    insta::assert_snapshot!(
        document.serialize(),
        @r#"{"text":"Hello World","spans":[{"start":0,"end":5,"type":4},{"start":0,"end":11,"type":0},{"start":6,"end":11,"type":2}]}"#
    );
}

#[test]
fn e2e_encoding_escapes_text() {
    init_test_logging();
    let document = Document::with_text("line one\n\"two\"");
    insta::assert_snapshot!(
        document.serialize(),
        @r#"{"text":"line one\n\"two\"","spans":[]}"#
    );
}

#[test]
fn e2e_legacy_plain_text_note() {
    init_test_logging();
    let document = Document::load("plain text note");

    assert_eq!(document.text(), "plain text note");
    assert!(document.spans().is_empty());
}

#[test]
fn e2e_legacy_note_that_mentions_braces() {
    init_test_logging();
    let blob = "{todo} remember \"text\": call back }";
    let document = Document::load(blob);

    assert_eq!(document.text(), blob);
    assert!(document.spans().is_empty());
}

#[test]
fn e2e_malformed_structured_note_is_plain_text() {
    init_test_logging();
    let blob = r#"{"text": 42, "spans": []}"#;
    assert!(matches!(persist::try_deserialize(blob), Err(PersistError::Json(_))));

    let document = Document::load(blob);
    tracing::debug!(text = %document.text(), "fallback document");
    assert_eq!(document.text(), blob);
    assert!(document.build_segments().iter().all(|s| s.style.is_plain()));
}

#[test]
fn e2e_corrupted_spans_are_repaired() {
    init_test_logging();
    let blob = r#"{"text":"abcdef","spans":[
        {"start":4,"end":1,"type":0},
        {"start":3,"end":5,"type":0},
        {"start":-2,"end":100,"type":2},
        {"start":6,"end":6,"type":1}
    ]}"#;
    let document = Document::load(blob);

    assert_eq!(document.text(), "abcdef");
    assert_eq!(
        document.store().sorted(),
        vec![
            FormattingSpan::new(0, 6, StyleType::Underline),
            FormattingSpan::new(1, 5, StyleType::Bold),
        ]
    );
}

#[test]
fn e2e_session_survives_save_and_load() {
    init_test_logging();
    let mut editor = Editor::new();
    type_text(&mut editor, "Plan\nship the release");
    select(&mut editor, "Plan");
    editor.toggle_style(StyleType::Header1);
    select(&mut editor, "release");
    editor.toggle_style(StyleType::Italic);

    let blob = editor.serialize();
    tracing::debug!(%blob, "saved note");

    let mut restored = Editor::from_blob(&blob);
    assert_eq!(restored.document(), editor.document());

    type_text(&mut restored, " today");
    assert_eq!(
        styled_texts(restored.document()),
        vec![
            (StyleType::Italic, "release today".to_string()),
            (StyleType::Header1, "Plan".to_string()),
        ]
    );
}

#[test]
fn e2e_armed_style_is_not_saved() {
    init_test_logging();
    let mut editor =
        Editor::with_options(EditorOptions::new().arm_on_collapsed_toggle(true));
    type_text(&mut editor, "Done: ");
    editor.toggle_style(StyleType::Bold);
    assert!(editor.current_styles().has(StyleType::Bold));

    let blob = editor.serialize();
    assert_eq!(blob, r#"{"text":"Done: ","spans":[]}"#);
    assert_eq!(Editor::from_blob(&blob).document(), editor.document());
}

#[test]
fn e2e_reserialize_is_stable() {
    init_test_logging();
    let blob = r#"{"text":"abc","spans":[{"start":0,"end":2,"type":1}]}"#;
    assert_eq!(Document::load(blob).serialize(), blob);
}
