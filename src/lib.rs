//! # rich_note
//!
//! A span-based rich-text formatting engine for editable notes.
//!
//! The engine tracks which ranges of a mutable text buffer carry which styles
//! (bold, italic, underline, two header levels) and keeps those ranges
//! anchored to their text as the host editor inserts and deletes characters.
//!
//! ## Quick Start
//!
//! ```rust
//! use rich_note::prelude::*;
//!
//! let mut doc = Document::with_text("Hello World");
//! doc.toggle_style(Selection::new(6, 11), StyleType::Bold, PartialToggle::Union);
//! doc.insert(0, "Big ");
//! assert_eq!(doc.spans(), &[FormattingSpan::new(10, 15, StyleType::Bold)]);
//!
//! let restored = Document::load(&doc.serialize());
//! assert_eq!(restored, doc);
//! ```
//!
//! ## Core Concepts
//!
//! - **Span**: a half-open character range tagged with one style
//! - **Document**: note text plus its spans; the persisted unit
//! - **Editor**: a host session forwarding keystrokes and toolbar actions
//! - **Segment**: a run of text with one resolved style, for drawing
//!
//! All operations are synchronous and single-threaded. The library logs
//! through the `log` facade and never installs a logger.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod style;
pub mod span;
pub mod diff;
pub mod shift;
pub mod merge;
pub mod store;
pub mod segment;
pub mod document;
pub mod persist;
pub mod editor;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::diff::EditRegion;
    pub use crate::document::{Document, Selection};
    pub use crate::editor::{Editor, EditorOptions};
    pub use crate::segment::Segment;
    pub use crate::span::FormattingSpan;
    pub use crate::store::{ActiveStyleRule, PartialToggle, SpanStore, ToggleOutcome};
    pub use crate::style::{HeaderLevel, ResolvedStyle, StyleSet, StyleType};
}

// Re-export key types at crate root
pub use document::{Document, Selection};
pub use editor::{Editor, EditorOptions};
pub use segment::Segment;
pub use span::FormattingSpan;
pub use style::{ResolvedStyle, StyleSet, StyleType};
