//! Host-facing editing session.
//!
//! An [`Editor`] wraps one [`Document`] with the current selection and
//! forwards the host's events to it: a text change on every keystroke,
//! selection updates, and explicit style actions. Listeners run synchronously
//! after every call that changed the document, so the host can re-render
//! before it accepts the next edit.
//!
//! ```rust
//! use rich_note::prelude::*;
//!
//! let mut editor = Editor::new();
//! editor.on_text_changed("", "Hello World");
//! editor.set_selection(0, 5);
//! editor.toggle_style(StyleType::Bold);
//! assert!(editor.current_styles().has(StyleType::Bold));
//! ```

use std::fmt;

use crate::diff::EditRegion;
use crate::document::{Document, Selection};
use crate::segment::Segment;
use crate::store::{ActiveStyleRule, PartialToggle, ToggleOutcome};
use crate::style::{StyleSet, StyleType};

/// Configuration for an [`Editor`].
///
/// Defaults toggle on over the union and report styles at the selection start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorOptions {
    /// Toggle behaviour for selections that cross a styled run's boundary.
    pub partial_toggle: PartialToggle,
    /// How a range selection reports active styles.
    pub active_styles: ActiveStyleRule,
    /// Arm the style at the caret when toggling with a collapsed selection.
    pub arm_on_collapsed_toggle: bool,
}

impl EditorOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn partial_toggle(mut self, mode: PartialToggle) -> Self {
        self.partial_toggle = mode;
        self
    }

    #[must_use]
    pub fn active_styles(mut self, rule: ActiveStyleRule) -> Self {
        self.active_styles = rule;
        self
    }

    #[must_use]
    pub fn arm_on_collapsed_toggle(mut self, arm: bool) -> Self {
        self.arm_on_collapsed_toggle = arm;
        self
    }
}

type Listener = Box<dyn FnMut(&Document)>;

/// One editing session over one note.
#[derive(Default)]
pub struct Editor {
    document: Document,
    selection: Selection,
    options: EditorOptions,
    listeners: Vec<Listener>,
}

impl Editor {
    /// Create a session over an empty note.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with explicit options.
    #[must_use]
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Create a session over a persisted note.
    #[must_use]
    pub fn from_blob(blob: &str) -> Self {
        let document = Document::load(blob);
        let selection = Selection::caret(document.len());
        Self {
            document,
            selection,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.document.text()
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Register a listener called after every change to the document.
    pub fn subscribe(&mut self, listener: impl FnMut(&Document) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Record the host's current selection, clamped into the text.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end).clamp(self.document.len());
    }

    /// Apply a text change reported by the host.
    ///
    /// The document's own text is authoritative; a mismatching `old` is
    /// logged and otherwise ignored. The caret moves to the end of the
    /// inserted text until the host reports a selection.
    pub fn on_text_changed(&mut self, old: &str, new: &str) -> EditRegion {
        if old != self.document.text() {
            log::warn!(
                "host reported stale text ({} chars, document has {}); diffing against the document",
                old.chars().count(),
                self.document.len()
            );
        }
        let region = self.document.apply_text_change(new);
        if !region.is_empty() {
            self.selection = Selection::caret(region.new_end());
            self.notify();
        }
        region
    }

    /// Toggle `style` over the current selection.
    pub fn toggle_style(&mut self, style: StyleType) -> ToggleOutcome {
        let outcome = if self.selection.is_collapsed() && self.options.arm_on_collapsed_toggle {
            self.document.arm_style(self.selection.start, style)
        } else {
            self.document
                .toggle_style(self.selection, style, self.options.partial_toggle)
        };
        if outcome.changed() {
            self.notify();
        }
        outcome
    }

    /// Remove all formatting from the current selection.
    pub fn clear_formatting(&mut self) -> bool {
        let changed = self.document.clear_formatting(self.selection);
        if changed {
            self.notify();
        }
        changed
    }

    /// Styles to highlight in the toolbar.
    #[must_use]
    pub fn current_styles(&self) -> StyleSet {
        self.document
            .current_styles(self.selection, self.options.active_styles)
    }

    #[must_use]
    pub fn build_segments(&self) -> Vec<Segment<'_>> {
        self.document.build_segments()
    }

    #[must_use]
    pub fn serialize(&self) -> String {
        self.document.serialize()
    }

    /// Replace the note with a persisted one. The caret moves to its end.
    pub fn load(&mut self, blob: &str) {
        self.document = Document::load(blob);
        self.selection = Selection::caret(self.document.len());
        self.notify();
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.document);
        }
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("document", &self.document)
            .field("selection", &self.selection)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
