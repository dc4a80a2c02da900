//! Remembered caret and selection within the pattern text.

use std::ops::Range;

/// A caret position or selection, as byte offsets into the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CaretRange {
    /// Selection start.
    pub start: usize,
    /// Selection end; equal to `start` for a bare caret.
    pub end: usize,
}

impl CaretRange {
    /// A selection between two offsets, in either order.
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A bare caret at `offset`.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Check if nothing is selected.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Fit the range inside `text`, snapping each end back to a char boundary.
    ///
    /// The result is always ordered, even if the fields were set directly
    /// with `start > end`.
    #[must_use]
    pub fn clamp_to(self, text: &str) -> Self {
        Self::new(
            floor_char_boundary(text, self.start),
            floor_char_boundary(text, self.end),
        )
    }

    /// The range as a `Range<usize>`.
    #[must_use]
    pub const fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Surface events after which the caret is re-read.
///
/// Token buttons steal focus from the pattern input when pressed, so the
/// caret must already be captured by the time a click lands. Pointer hover
/// and press are the earliest signals available for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaretEvent {
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,
    /// The selection changed.
    SelectionChange,
    /// The text was edited.
    Edit,
    /// The pointer moved over an insertion control.
    PointerHover,
    /// The pointer was pressed on an insertion control.
    PointerPress,
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
