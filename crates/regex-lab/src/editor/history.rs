//! Linear undo history for the pattern text.

/// Undo/redo timeline for the pattern.
///
/// The history is a log of pattern strings plus a cursor. `entries[cursor]`
/// is always the displayed pattern. Recording a value that differs from the
/// current entry drops everything after the cursor, so the timeline never
/// branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHistory {
    entries: Vec<String>,
    cursor: usize,
    limit: Option<usize>,
}

impl EditHistory {
    /// Start a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            limit: None,
        }
    }

    /// Keep at most `limit` entries, dropping the oldest first. `None` is unbounded.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|n| n.max(1));
        self.enforce_limit();
        self
    }

    /// The current pattern.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Record a new value. Returns `false` if it equals the current entry.
    pub fn record(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.entries[self.cursor] {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(value);
        self.cursor = self.entries.len() - 1;
        self.enforce_limit();
        true
    }

    /// Step back one entry. Returns the new current value, or `None` at the start.
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one entry. Returns the new current value, or `None` at the end.
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Check if there is an entry before the cursor.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if there is an entry after the cursor.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Position of the current entry.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history holds at least its initial entry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.entries.len() > limit {
            let excess = self.entries.len() - limit;
            let excess = excess.min(self.cursor);
            self.entries.drain(..excess);
            self.cursor -= excess;
        }
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(String::new())
    }
}
