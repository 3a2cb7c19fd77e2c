//! Single-line input buffer with a read-only history stack.
//!
//! Layout: `values[0]` is the live draft; `values[1..=N]` are externally
//! supplied history entries (newest first). `selected` names the value on
//! display and `cursor` is a rune offset into it.
//!
//! Invariants (hold after every public call):
//! * `0 <= cursor <= len(values[selected])`.
//! * `0 <= selected <= N`.
//! * History entries are never mutated. Any edit while `selected != 0`
//!   first copies the displayed entry into the draft and resets
//!   `selected = 0`, so the edit lands on the draft.
//! * `char_limit`, when set, bounds the draft length; inserts are
//!   truncated to the remaining room rather than rejected.
//!
//! Boundary conditions (cursor at 0 / end, empty buffer) are silent no-ops.

use core_text::words::{word_end_after, word_start_before};
use core_text::{rune_len, runes_to_string, to_runes};
use std::fmt;
use tracing::trace;

/// Optional validation hook. Returning `Some(message)` attaches a non-fatal
/// error to the buffer; the edit itself always stands.
pub type Validator = Box<dyn Fn(&str) -> Option<String> + Send>;

pub struct InputBuffer {
    values: Vec<Vec<char>>,
    selected: usize,
    cursor: usize,
    char_limit: Option<usize>,
    validator: Option<Validator>,
    error: Option<String>,
}

impl fmt::Debug for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBuffer")
            .field("draft_len", &self.values[0].len())
            .field("history_len", &(self.values.len() - 1))
            .field("selected", &self.selected)
            .field("cursor", &self.cursor)
            .field("char_limit", &self.char_limit)
            .field("has_validator", &self.validator.is_some())
            .field("error", &self.error)
            .finish()
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            values: vec![Vec::new()],
            selected: 0,
            cursor: 0,
            char_limit: None,
            validator: None,
            error: None,
        }
    }

    pub fn with_char_limit(limit: Option<usize>) -> Self {
        Self {
            char_limit: limit,
            ..Self::new()
        }
    }

    pub fn set_char_limit(&mut self, limit: Option<usize>) {
        self.char_limit = limit;
    }

    pub fn set_validator(&mut self, validator: Option<Validator>) {
        self.validator = validator;
        self.validate();
    }

    /// Replace the history stack (`values[1..]`, newest first). Navigation resets to the draft.
    pub fn set_history<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.values.truncate(1);
        self.values
            .extend(entries.into_iter().map(|s| to_runes(s.as_ref())));
        self.selected = 0;
        self.cursor = self.cursor.min(self.values[0].len());
    }

    /// Number of history entries (N).
    pub fn history_len(&self) -> usize {
        self.values.len() - 1
    }

    /// History entry `i` (0 = newest), if present.
    pub fn history_entry(&self, i: usize) -> Option<String> {
        self.values.get(i + 1).map(|v| runes_to_string(v))
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Runes of the value currently displayed.
    pub fn runes(&self) -> &[char] {
        &self.values[self.selected]
    }

    /// The value currently displayed (draft or recalled history entry).
    pub fn value(&self) -> String {
        runes_to_string(self.runes())
    }

    /// Rune length of the displayed value.
    pub fn len(&self) -> usize {
        self.runes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.runes().is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Place the cursor, clamped to the displayed value.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len());
    }

    /// Overwrite the draft (truncated to the char limit) and move the cursor to its end.
    pub fn set_value(&mut self, text: &str) {
        let mut runes = to_runes(text);
        if let Some(limit) = self.char_limit {
            runes.truncate(limit);
        }
        self.values[0] = runes;
        self.selected = 0;
        self.cursor = self.values[0].len();
        self.validate();
    }

    /// Clear the draft for the next command. History entries are kept.
    pub fn reset(&mut self) {
        self.values[0].clear();
        self.selected = 0;
        self.cursor = 0;
        self.error = None;
    }

    // Copy-on-write: edits always target the draft.
    fn draft_mut(&mut self) -> &mut Vec<char> {
        if self.selected != 0 {
            trace!(target: "state.buffer", from = self.selected, "history_write_through");
            self.values[0] = self.values[self.selected].clone();
            self.selected = 0;
        }
        &mut self.values[0]
    }

    fn room(&self, removed: usize) -> usize {
        match self.char_limit {
            Some(limit) => limit.saturating_sub(self.len().saturating_sub(removed)),
            None => usize::MAX,
        }
    }

    fn validate(&mut self) {
        self.error = match &self.validator {
            Some(v) => v(&runes_to_string(&self.values[0])),
            None => None,
        };
    }

    /// Insert runes at the cursor, truncated to the remaining room. Returns the
    /// number of runes actually inserted.
    pub fn insert_runes(&mut self, runes: &[char]) -> usize {
        let take = runes.len().min(self.room(0));
        if take == 0 {
            return 0;
        }
        let at = self.cursor;
        self.draft_mut().splice(at..at, runes[..take].iter().copied());
        self.cursor = at + take;
        self.validate();
        take
    }

    pub fn insert_str(&mut self, text: &str) -> usize {
        self.insert_runes(&to_runes(text))
    }

    /// Text in rune range `[start, end)` of the displayed value (clamped).
    pub fn slice(&self, start: usize, end: usize) -> String {
        let len = self.len();
        let (s, e) = (start.min(len), end.min(len));
        if s >= e {
            return String::new();
        }
        runes_to_string(&self.runes()[s..e])
    }

    /// Remove rune range `[start, end)` and return the removed text. The cursor
    /// moves to `start` when it sat inside or after the removed span.
    pub fn remove_range(&mut self, start: usize, end: usize) -> String {
        let len = self.len();
        let (s, e) = (start.min(len), end.min(len));
        if s >= e {
            return String::new();
        }
        let removed: String = self.draft_mut().drain(s..e).collect();
        if self.cursor >= e {
            self.cursor -= e - s;
        } else if self.cursor > s {
            self.cursor = s;
        }
        self.validate();
        removed
    }

    /// Replace rune range `[start, end)` with `text` (truncated to the char limit)
    /// and leave the cursor at the end of the inserted text. Returns that end offset.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) -> usize {
        let len = self.len();
        let s = start.min(len);
        let e = end.clamp(s, len);
        let mut runes = to_runes(text);
        runes.truncate(self.room(e - s));
        let inserted = runes.len();
        self.draft_mut().splice(s..e, runes);
        self.cursor = s + inserted;
        self.validate();
        s + inserted
    }

    pub fn delete_char_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.cursor;
        self.remove_range(at - 1, at);
        true
    }

    pub fn delete_char_after(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.cursor;
        self.remove_range(at, at + 1);
        true
    }

    /// Delete back to the start of the previous word; returns the removed span.
    pub fn delete_word_before(&mut self) -> Option<String> {
        let start = word_start_before(self.runes(), self.cursor);
        self.kill_span(start, self.cursor)
    }

    /// Delete forward to the end of the next word; returns the removed span.
    pub fn delete_word_after(&mut self) -> Option<String> {
        let end = word_end_after(self.runes(), self.cursor);
        self.kill_span(self.cursor, end)
    }

    pub fn delete_to_line_start(&mut self) -> Option<String> {
        self.kill_span(0, self.cursor)
    }

    pub fn delete_to_line_end(&mut self) -> Option<String> {
        let end = self.len();
        self.kill_span(self.cursor, end)
    }

    fn kill_span(&mut self, start: usize, end: usize) -> Option<String> {
        if start >= end {
            return None;
        }
        let removed = self.remove_range(start, end);
        trace!(target: "state.buffer", start, end, removed_len = rune_len(&removed), "kill_span");
        Some(removed)
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_word_left(&mut self) -> bool {
        let to = word_start_before(self.runes(), self.cursor);
        let moved = to != self.cursor;
        self.cursor = to;
        moved
    }

    pub fn move_word_right(&mut self) -> bool {
        let to = word_end_after(self.runes(), self.cursor);
        let moved = to != self.cursor;
        self.cursor = to;
        moved
    }

    pub fn move_to_line_start(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_to_line_end(&mut self) -> bool {
        let end = self.len();
        let moved = self.cursor != end;
        self.cursor = end;
        moved
    }

    /// Show the next older history entry; the cursor snaps to its end.
    pub fn history_older(&mut self) -> bool {
        if self.selected >= self.history_len() {
            return false;
        }
        self.selected += 1;
        self.cursor = self.len();
        true
    }

    /// Show the next newer entry (or the draft); the cursor snaps to its end.
    pub fn history_newer(&mut self) -> bool {
        if self.selected == 0 {
            return false;
        }
        self.selected -= 1;
        self.cursor = self.len();
        true
    }
}
