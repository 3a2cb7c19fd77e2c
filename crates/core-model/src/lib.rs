//! The editor instance: every piece of mutable line-editing state in one
//! owned struct, passed by `&mut` through the event loop.
//!
//! There are no process-wide singletons. The runtime loop delivers one event
//! at a time to `core-actions`, which mutates the model; `core-render` reads
//! it back through the accessors here. Nothing in this crate performs I/O.
//!
//! Invariants (hold after every public call):
//! * The buffer's history stack mirrors `history` (commands, newest first).
//! * At most one of completion / history search is active. Entering search
//!   drops any completion session.
//! * `suppress_suggestion` is set by kills that remove text and cleared by
//!   the next keystroke that is not itself a kill (see `core-actions`).
//!
//! Ghost suggestion: shown only with the cursor at the end of a non-empty
//! draft, suggestions enabled, nothing suppressing it, and neither completion
//! nor search active. Ranking lives in [`suggestion`].

use core_complete::CompletionEngine;
use core_history::{FilterMode, HistoryItem, HistorySearch, SortMode};
use core_state::{InputBuffer, KILL_RING_DEFAULT_CAPACITY, KillRing};
use tracing::debug;

mod layout;
pub mod suggestion;

pub use layout::{Layout, LayoutRegion};

/// Construction-time knobs (mapped from `oxline.toml` by the binary).
#[derive(Debug, Clone)]
pub struct ModelOptions {
    pub char_limit: Option<usize>,
    pub kill_ring_capacity: usize,
    pub suggestions_enabled: bool,
    pub completion_box_height: u16,
    pub min_item_width: u16,
    pub history_box_height: u16,
    pub history_filter: FilterMode,
    pub history_sort: SortMode,
    pub prompt: String,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            char_limit: None,
            kill_ring_capacity: KILL_RING_DEFAULT_CAPACITY,
            suggestions_enabled: true,
            completion_box_height: 8,
            min_item_width: 12,
            history_box_height: 10,
            history_filter: FilterMode::default(),
            history_sort: SortMode::default(),
            prompt: "> ".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct EditorModel {
    pub buffer: InputBuffer,
    pub kill_ring: KillRing,
    pub completion: CompletionEngine,
    pub search: HistorySearch,
    history: Vec<HistoryItem>,
    current_directory: String,
    suppress_suggestion: bool,
    layout: Layout,
    options: ModelOptions,
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::new(ModelOptions::default())
    }
}

impl EditorModel {
    pub fn new(options: ModelOptions) -> Self {
        Self {
            buffer: InputBuffer::with_char_limit(options.char_limit),
            kill_ring: KillRing::new(options.kill_ring_capacity),
            completion: CompletionEngine::new(),
            search: HistorySearch::new(options.history_filter, options.history_sort),
            history: Vec::new(),
            current_directory: String::new(),
            suppress_suggestion: false,
            layout: Layout::default(),
            options,
        }
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn prompt(&self) -> &str {
        &self.options.prompt
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.layout = Layout::new(cols, rows);
    }

    pub fn current_directory(&self) -> &str {
        &self.current_directory
    }

    pub fn set_current_directory(&mut self, dir: impl Into<String>) {
        self.current_directory = dir.into();
    }

    /// Newest-first history snapshot.
    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    /// Replace the history snapshot (newest first).
    pub fn set_history(&mut self, items: Vec<HistoryItem>) {
        self.history = items;
        self.sync_buffer_history();
    }

    /// Record a submitted command as the newest history entry.
    pub fn push_history(&mut self, item: HistoryItem) {
        self.history.insert(0, item);
        self.sync_buffer_history();
    }

    fn sync_buffer_history(&mut self) {
        self.buffer
            .set_history(self.history.iter().map(|h| h.command.as_str()));
        debug!(target: "state.buffer", entries = self.history.len(), "history_synced");
    }

    /// Enter reverse search over the current snapshot.
    pub fn enter_search(&mut self) {
        self.completion.reset();
        self.search
            .enter(self.history.clone(), self.current_directory.clone());
    }

    pub fn suggestion_suppressed(&self) -> bool {
        self.suppress_suggestion
    }

    pub fn set_suggestion_suppressed(&mut self, suppressed: bool) {
        self.suppress_suggestion = suppressed;
    }

    /// Remainder of the ranked history suggestion, when one may be shown.
    pub fn ghost_suggestion(&self) -> Option<&str> {
        if !self.options.suggestions_enabled
            || self.suppress_suggestion
            || self.completion.is_active()
            || self.search.is_active()
            || self.buffer.is_empty()
            || self.buffer.cursor() != self.buffer.len()
        {
            return None;
        }
        suggestion::rank_suggestion(&self.buffer.value(), &self.history)
    }

    /// Insert the ghost suggestion. Returns false when none is showing.
    pub fn accept_ghost(&mut self) -> bool {
        let Some(rest) = self.ghost_suggestion().map(str::to_string) else {
            return false;
        };
        self.buffer.insert_str(&rest);
        true
    }

    /// Reset per-command state after a submit. The kill ring persists.
    pub fn reset_line(&mut self) {
        self.buffer.reset();
        self.completion.reset();
        if self.search.is_active() {
            self.search.cancel();
        }
        self.kill_ring.break_chain();
        self.kill_ring.clear_yank();
        self.suppress_suggestion = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(history: &[&str]) -> EditorModel {
        let mut m = EditorModel::default();
        m.set_history(history.iter().map(|c| HistoryItem::new(*c, "/")).collect());
        m
    }

    #[test]
    fn history_is_mirrored_into_buffer() {
        let mut m = model_with(&["b", "a"]);
        m.push_history(HistoryItem::new("c", "/"));
        assert_eq!(m.buffer.history_len(), 3);
        assert_eq!(m.buffer.history_entry(0).as_deref(), Some("c"));
    }

    #[test]
    fn ghost_only_at_end_of_line() {
        let mut m = model_with(&["git status"]);
        m.buffer.insert_str("git s");
        assert_eq!(m.ghost_suggestion(), Some("tatus"));
        m.buffer.move_left();
        assert_eq!(m.ghost_suggestion(), None);
    }

    #[test]
    fn ghost_suppressed_and_disabled() {
        let mut m = model_with(&["git status"]);
        m.buffer.insert_str("git");
        m.set_suggestion_suppressed(true);
        assert_eq!(m.ghost_suggestion(), None);

        let mut off = EditorModel::new(ModelOptions {
            suggestions_enabled: false,
            ..ModelOptions::default()
        });
        off.set_history(vec![HistoryItem::new("git status", "/")]);
        off.buffer.insert_str("git");
        assert_eq!(off.ghost_suggestion(), None);
    }

    #[test]
    fn accept_ghost_inserts_remainder() {
        let mut m = model_with(&["cargo test --all"]);
        m.buffer.insert_str("cargo t");
        assert!(m.accept_ghost());
        assert_eq!(m.buffer.value(), "cargo test --all");
        assert!(!m.accept_ghost());
    }

    #[test]
    fn entering_search_hides_ghost_and_completion() {
        let mut m = model_with(&["make all"]);
        m.buffer.insert_str("ma");
        m.enter_search();
        assert!(m.search.is_active());
        assert_eq!(m.ghost_suggestion(), None);
    }

    #[test]
    fn reset_line_keeps_kill_ring() {
        let mut m = EditorModel::default();
        m.buffer.insert_str("abc def");
        let killed = m.buffer.delete_word_before().unwrap();
        m.kill_ring.record(&killed, core_state::KillDirection::Backward);
        m.reset_line();
        assert!(m.buffer.is_empty());
        assert_eq!(m.kill_ring.len(), 1);
        assert!(!m.kill_ring.last_command_was_kill());
    }
}
