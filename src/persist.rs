//! Persisted form of a document.
//!
//! A note is stored as one opaque string:
//!
//! ```text
//! {"text":"Hello","spans":[{"start":0,"end":5,"type":0}]}
//! ```
//!
//! where `type` is the style's ordinal. Notes written before formatting
//! existed are stored as bare text; anything that does not look like the
//! structured form, or fails to parse as it, loads as plain text with no
//! spans. Loading never fails.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::span::FormattingSpan;
use crate::style::StyleType;

/// Shape check run before attempting to parse a blob as structured.
static STRUCTURED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\A\s*\{.*"text"\s*:.*\}\s*\z"#).expect("invalid structured note regex")
});

#[derive(Serialize)]
struct StoredDocumentRef<'a> {
    text: &'a str,
    spans: &'a [FormattingSpan],
}

#[derive(Deserialize)]
struct StoredDocument {
    text: String,
    #[serde(default)]
    spans: Vec<StoredSpan>,
}

/// Span as read from storage. Offsets are signed so corrupt negative values
/// can be clamped instead of failing the whole note.
#[derive(Deserialize)]
struct StoredSpan {
    start: i64,
    end: i64,
    #[serde(rename = "type")]
    style: StyleType,
}

/// Error type for reading a persisted note.
#[derive(Debug)]
pub enum PersistError {
    /// The blob is not in the structured form (a legacy plain-text note).
    NotStructured,
    /// The blob looks structured but is not valid.
    Json(serde_json::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStructured => write!(f, "note is not in the structured form"),
            Self::Json(e) => write!(f, "structured note parse error: {e}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotStructured => None,
            Self::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Whether `blob` has the outer shape of the structured form.
#[must_use]
pub fn looks_structured(blob: &str) -> bool {
    STRUCTURED_RE.is_match(blob)
}

/// Encode a document to its canonical persisted string.
///
/// Spans are written in `(start, end, type)` order so equal documents encode
/// identically.
#[must_use]
pub fn serialize(document: &Document) -> String {
    let spans = document.store().sorted();
    let stored = StoredDocumentRef {
        text: document.text(),
        spans: &spans,
    };
    match serde_json::to_string(&stored) {
        Ok(blob) => blob,
        Err(err) => {
            log::warn!("failed to encode note, storing plain text: {err}");
            document.text().to_string()
        }
    }
}

/// Decode a structured note.
///
/// Span offsets are clamped into the text and the spans normalized; an
/// unknown style ordinal is an error.
pub fn try_deserialize(blob: &str) -> Result<Document, PersistError> {
    if !looks_structured(blob) {
        return Err(PersistError::NotStructured);
    }
    let stored: StoredDocument = serde_json::from_str(blob)?;
    let length = stored.text.chars().count();

    let mut clamped = 0usize;
    let spans: Vec<FormattingSpan> = stored
        .spans
        .into_iter()
        .map(|span| {
            let start = clamp_offset(span.start, length);
            let end = clamp_offset(span.end, length);
            if i64::try_from(start).ok() != Some(span.start)
                || i64::try_from(end).ok() != Some(span.end)
            {
                clamped += 1;
            }
            FormattingSpan::new(start, end, span.style)
        })
        .collect();
    if clamped > 0 {
        log::debug!("clamped {clamped} out-of-range span(s) into a {length}-character note");
    }

    Ok(Document::from_parts(stored.text, spans))
}

/// Decode a persisted note, falling back to plain text.
#[must_use]
pub fn deserialize(blob: &str) -> Document {
    match try_deserialize(blob) {
        Ok(document) => document,
        Err(PersistError::NotStructured) => {
            log::debug!("loading legacy plain-text note");
            Document::with_text(blob)
        }
        Err(err) => {
            log::warn!("malformed note, loading as plain text: {err}");
            Document::with_text(blob)
        }
    }
}

fn clamp_offset(offset: i64, length: usize) -> usize {
    usize::try_from(offset).map_or(0, |offset| offset.min(length))
}
