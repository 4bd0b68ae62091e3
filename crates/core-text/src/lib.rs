//! Single-line input buffer.
//!
//! The buffer owns the current filter text plus a selection range expressed in
//! char offsets. Nothing here talks to the engine or the undo stack; editing
//! operations either mutate in place (typed text, backspace) or come back from
//! the `boundary` module as pure `Replacement` values that the caller applies.
//! Keeping replacement a value type is what makes the word-boundary operations
//! composable with undo history and testable without a live text field.

use unicode_segmentation::UnicodeSegmentation;

pub mod boundary;

pub use boundary::Replacement;

/// Which end of the selection range the cursor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionDirection {
    #[default]
    Forward,
    Backward,
}

/// Single-line text plus selection state.
///
/// Invariant: `selection_start` and `selection_end` are char offsets clamped
/// to `0..=len_chars()`. The cursor is `selection_start` when the direction is
/// `Backward`, else `selection_end`.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    text: String,
    selection_start: usize,
    selection_end: usize,
    direction: SelectionDirection,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position in char offsets.
    pub fn cursor(&self) -> usize {
        match self.direction {
            SelectionDirection::Backward => self.selection_start,
            SelectionDirection::Forward => self.selection_end,
        }
    }

    /// Replace the whole text, placing the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let end = self.len_chars();
        self.selection_start = end;
        self.selection_end = end;
        self.direction = SelectionDirection::Forward;
    }

    /// Collapse the selection to a single cursor position.
    pub fn set_cursor(&mut self, pos: usize) {
        let pos = pos.min(self.len_chars());
        self.selection_start = pos;
        self.selection_end = pos;
        self.direction = SelectionDirection::Forward;
    }

    /// Set an explicit selection range. Offsets are clamped and swapped into
    /// `start <= end` order.
    pub fn set_selection(&mut self, start: usize, end: usize, direction: SelectionDirection) {
        let len = self.len_chars();
        let (mut start, mut end) = (start.min(len), end.min(len));
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }
        self.selection_start = start;
        self.selection_end = end;
        self.direction = direction;
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Insert text at the cursor, replacing the selection when one is active.
    pub fn insert_str(&mut self, insert: &str) {
        if insert.is_empty() {
            return;
        }
        let start = self.byte_offset(self.selection_start);
        let end = self.byte_offset(self.selection_end);
        let new_cursor = self.selection_start + insert.chars().count();
        self.text.replace_range(start..end, insert);
        self.set_cursor(new_cursor);
    }

    /// Delete the selection, or the grapheme cluster before the cursor.
    /// Returns `false` when there is nothing to delete.
    pub fn backspace(&mut self) -> bool {
        if self.selection_start != self.selection_end {
            let start = self.byte_offset(self.selection_start);
            let end = self.byte_offset(self.selection_end);
            let cursor = self.selection_start;
            self.text.replace_range(start..end, "");
            self.set_cursor(cursor);
            return true;
        }
        if self.selection_start == 0 {
            return false;
        }
        let cursor_byte = self.byte_offset(self.selection_start);
        let before = &self.text[..cursor_byte];
        let Some(cluster) = before.graphemes(true).next_back() else {
            return false;
        };
        let removed_chars = cluster.chars().count();
        let start_byte = cursor_byte - cluster.len();
        let new_cursor = self.selection_start - removed_chars;
        self.text.replace_range(start_byte..cursor_byte, "");
        self.set_cursor(new_cursor);
        true
    }

    /// Move the cursor one grapheme cluster left.
    pub fn move_left(&mut self) {
        let cursor = self.cursor();
        if cursor == 0 {
            self.set_cursor(0);
            return;
        }
        let cursor_byte = self.byte_offset(cursor);
        let step = self.text[..cursor_byte]
            .graphemes(true)
            .next_back()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        self.set_cursor(cursor.saturating_sub(step));
    }

    /// Move the cursor one grapheme cluster right.
    pub fn move_right(&mut self) {
        let cursor = self.cursor();
        let cursor_byte = self.byte_offset(cursor);
        let step = self.text[cursor_byte..]
            .graphemes(true)
            .next()
            .map(|g| g.chars().count())
            .unwrap_or(0);
        self.set_cursor(cursor + step);
    }

    pub fn move_line_start(&mut self) {
        self.set_cursor(0);
    }

    pub fn move_line_end(&mut self) {
        self.set_cursor(self.len_chars());
    }

    /// Apply a replacement produced by the `boundary` module.
    pub fn apply(&mut self, replacement: &Replacement) {
        self.text = replacement.text.clone();
        self.set_cursor(replacement.cursor);
    }
}
