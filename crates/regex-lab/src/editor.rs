//! Cursor-aware pattern editing.
//!
//! [`PatternEditor`] owns the pattern text, its undo history, and the last
//! caret range reported by the input surface. Token insertion splices at
//! that remembered range, so a token lands where the user last was even
//! after the insert button took focus away from the input.

mod caret;
mod history;
pub mod tokens;

pub use caret::{CaretEvent, CaretRange};
pub use history::EditHistory;
pub use tokens::{PALETTE, Token, TokenGroup};

use tracing::trace;

use crate::config::EditorConfig;

/// Pattern text with history and a remembered caret.
#[derive(Debug, Clone, Default)]
pub struct PatternEditor {
    history: EditHistory,
    caret: Option<CaretRange>,
}

impl PatternEditor {
    /// Create an editor holding `initial`.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: EditHistory::new(initial),
            caret: None,
        }
    }

    /// Create an editor holding `initial` with settings from `config`.
    #[must_use]
    pub fn with_config(initial: impl Into<String>, config: &EditorConfig) -> Self {
        Self {
            history: EditHistory::new(initial).with_limit(config.history_limit),
            caret: None,
        }
    }

    /// The current pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.history.current()
    }

    /// The undo history.
    #[must_use]
    pub const fn history(&self) -> &EditHistory {
        &self.history
    }

    /// The remembered caret range, if the surface has reported one.
    #[must_use]
    pub const fn caret(&self) -> Option<CaretRange> {
        self.caret
    }

    /// Record a new pattern value. Returns `false` if nothing changed.
    pub fn set_pattern(&mut self, value: impl Into<String>) -> bool {
        self.history.record(value)
    }

    /// Apply a raw edit from the input surface: the new text and where the caret ended up.
    pub fn edit(&mut self, value: impl Into<String>, caret: CaretRange) -> bool {
        let changed = self.set_pattern(value);
        self.observe_caret(CaretEvent::Edit, caret);
        changed
    }

    /// Refresh the remembered caret after a surface event.
    pub fn observe_caret(&mut self, event: CaretEvent, range: CaretRange) {
        let range = range.clamp_to(self.pattern());
        trace!(?event, start = range.start, end = range.end, "Caret observed");
        self.caret = Some(range);
    }

    /// Forget the remembered caret; the next insertion goes to the end.
    pub const fn clear_caret(&mut self) {
        self.caret = None;
    }

    /// Splice `token` over the remembered selection, or append it if none is known.
    ///
    /// The caret is left just after the inserted token, so repeated
    /// insertions read left to right. Returns the new pattern.
    pub fn insert_token(&mut self, token: &str) -> &str {
        let pattern = self.pattern();
        let range = self
            .caret
            .map_or_else(|| CaretRange::at(pattern.len()), |c| c.clamp_to(pattern));

        let mut next = String::with_capacity(pattern.len() + token.len());
        next.push_str(&pattern[..range.start]);
        next.push_str(token);
        next.push_str(&pattern[range.end..]);

        self.history.record(next);
        self.caret = Some(CaretRange::at(range.start + token.len()));
        self.pattern()
    }

    /// Replace the whole pattern, e.g. when a library entry is picked.
    ///
    /// The replacement goes through history and the caret moves to the end.
    pub fn replace_pattern(&mut self, value: impl Into<String>) -> bool {
        let changed = self.history.record(value);
        self.caret = Some(CaretRange::at(self.pattern().len()));
        changed
    }

    /// Step back in history. Returns the restored pattern, or `None` at the start.
    pub fn undo(&mut self) -> Option<&str> {
        self.history.undo()?;
        self.refit_caret();
        Some(self.pattern())
    }

    /// Step forward in history. Returns the restored pattern, or `None` at the end.
    pub fn redo(&mut self) -> Option<&str> {
        self.history.redo()?;
        self.refit_caret();
        Some(self.pattern())
    }

    /// Check if undo is available.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn refit_caret(&mut self) {
        if let Some(caret) = self.caret {
            self.caret = Some(caret.clamp_to(self.history.current()));
        }
    }
}
