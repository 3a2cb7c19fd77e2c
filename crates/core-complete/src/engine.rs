//! Completion engine: a two-state machine (inactive / active) driving
//! Tab / Shift-Tab cycling over candidates from a [`CompletionSource`].
//!
//! Activation (first Tab):
//! 1. Default span = the non-whitespace token touching the cursor.
//! 2. Query the source; an empty result leaves the engine inactive and the
//!    buffer untouched.
//! 3. A configured whole-line sigil at column 0 forces `start = 0`.
//! 4. A candidate containing a space widens `start` back across one
//!    whitespace run and one word when the first candidate starts with that
//!    combined phrase.
//! 5. One candidate: applied immediately. Several: the buffer is extended to
//!    the longest common prefix when that is strictly longer than the typed
//!    prefix (selection stays ambiguous); otherwise the first candidate is
//!    selected and applied.
//!
//! Cycling replaces `[start, end)` where `start` is fixed for the whole
//! session and `end` always tracks the text the engine itself inserted last,
//! so switching from a long candidate to a shorter one never leaves a tail
//! of the longer one behind.

use crate::{CompletionCandidate, CompletionSource};
use core_state::InputBuffer;
use core_text::words::{preceding_word_start, token_bounds};
use core_text::{common_prefix, rune_len, runes_to_string};
use tracing::{debug, trace};

/// Snapshot of an active completion session. Default = inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionState {
    pub active: bool,
    pub suggestions: Vec<CompletionCandidate>,
    /// `None` while ambiguous (no specific candidate applied yet).
    pub selected: Option<usize>,
    pub start: usize,
    pub end: usize,
    pub original_text: String,
    pub original_cursor: usize,
    pub info_box_visible: bool,
    pub help_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// No candidates; nothing changed.
    NoCandidates,
    /// Single candidate inserted; session holds it as selected.
    Completed,
    /// Buffer extended to the shared prefix; selection ambiguous.
    Extended,
    /// Shared prefix already typed; session active with no buffer change.
    Ambiguous,
    /// A specific candidate was applied (first selection or cycling).
    Selected(usize),
}

impl TabOutcome {
    pub fn changed_buffer(self) -> bool {
        !matches!(self, TabOutcome::NoCandidates | TabOutcome::Ambiguous)
    }
}

#[derive(Debug)]
pub struct CompletionEngine {
    state: CompletionState,
    // Select the first candidate immediately when the shared prefix equals the
    // typed text (bash `menu-complete` style). When false the session stays
    // ambiguous until the next Tab.
    eager_select: bool,
}

/// Longest common prefix of the candidates' values, if strictly longer (in
/// runes) than `typed`. Re-applying with `typed` set to the result yields
/// `None`, which makes the extension idempotent.
pub fn extend_common_prefix(typed: &str, candidates: &[CompletionCandidate]) -> Option<String> {
    let lcp = common_prefix(candidates.iter().map(|c| c.value.as_str()));
    (rune_len(&lcp) > rune_len(typed)).then_some(lcp)
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionEngine {
    pub fn new() -> Self {
        Self {
            state: CompletionState::default(),
            eager_select: true,
        }
    }

    /// Keep the session ambiguous after a no-op prefix extension instead of
    /// selecting the first candidate.
    pub fn with_eager_select(mut self, eager: bool) -> Self {
        self.eager_select = eager;
        self
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected
    }

    pub fn suggestions(&self) -> &[CompletionCandidate] {
        &self.state.suggestions
    }

    pub fn info_box_visible(&self) -> bool {
        self.state.active && self.state.info_box_visible
    }

    pub fn help_text(&self) -> &str {
        &self.state.help_text
    }

    /// Decorative suffix of the highlighted candidate, if any.
    pub fn current_suffix(&self) -> Option<&str> {
        let i = self.state.selected?;
        self.state.suggestions.get(i)?.suffix.as_deref()
    }

    /// Drop the session without touching the buffer.
    pub fn reset(&mut self) {
        if self.state.active {
            trace!(target: "complete.engine", "reset");
        }
        self.state = CompletionState::default();
    }

    /// Tab: activate, or advance to the next candidate (wrapping).
    pub fn tab(&mut self, buf: &mut InputBuffer, source: &dyn CompletionSource) -> TabOutcome {
        if self.state.active && self.state.suggestions.len() > 1 {
            let n = self.state.suggestions.len();
            let next = self.state.selected.map_or(0, |i| (i + 1) % n);
            return self.select(buf, next);
        }
        self.activate(buf, source)
    }

    /// Shift-Tab: previous candidate (wrapping to the last). Inactive, it
    /// activates exactly like Tab.
    pub fn back_tab(&mut self, buf: &mut InputBuffer, source: &dyn CompletionSource) -> TabOutcome {
        if self.state.active && self.state.suggestions.len() > 1 {
            let n = self.state.suggestions.len();
            let prev = self.state.selected.map_or(n - 1, |i| (i + n - 1) % n);
            return self.select(buf, prev);
        }
        self.activate(buf, source)
    }

    /// Escape: restore the text and cursor captured at activation. Returns
    /// false when no session was active.
    pub fn cancel(&mut self, buf: &mut InputBuffer) -> bool {
        if !self.state.active {
            return false;
        }
        buf.set_value(&self.state.original_text);
        buf.set_cursor(self.state.original_cursor);
        debug!(target: "complete.engine", "cancel_restored_original");
        self.reset();
        true
    }

    /// Enter: when the info box shows a specific highlighted candidate the
    /// keystroke is consumed (the value is already in the buffer) and `true`
    /// is returned. Otherwise the session is dropped and Enter proceeds
    /// normally, so a single-candidate completion submits on the first Enter.
    pub fn accept(&mut self) -> bool {
        let consumed =
            self.state.active && self.state.info_box_visible && self.state.selected.is_some();
        if consumed {
            debug!(target: "complete.engine", selected = ?self.state.selected, "accept");
        }
        self.reset();
        consumed
    }

    fn activate(&mut self, buf: &mut InputBuffer, source: &dyn CompletionSource) -> TabOutcome {
        self.reset();
        let line = buf.value();
        let cursor = buf.cursor();
        let runes = buf.runes().to_vec();
        let (mut start, end) = token_bounds(&runes, cursor);

        let suggestions = source.get_completions(&line, cursor);
        if suggestions.is_empty() {
            debug!(target: "complete.engine", cursor, "no_candidates");
            return TabOutcome::NoCandidates;
        }

        if source
            .whole_line_prefixes()
            .iter()
            .any(|p| !p.is_empty() && line.starts_with(p.as_str()))
        {
            start = 0;
        } else if suggestions.iter().any(|c| c.value.contains(' '))
            && let Some(wider) = preceding_word_start(&runes, start)
        {
            let phrase = runes_to_string(&runes[wider..cursor.max(wider)]);
            if suggestions[0].value.starts_with(&phrase) {
                trace!(target: "complete.engine", from = start, to = wider, "phrase_widened");
                start = wider;
            }
        }

        let prefix = runes_to_string(&runes[start..cursor.max(start)]);
        self.state = CompletionState {
            active: true,
            help_text: source.get_help(&line, cursor),
            suggestions,
            selected: None,
            start,
            end,
            original_text: line,
            original_cursor: cursor,
            info_box_visible: false,
        };
        debug!(
            target: "complete.engine",
            candidates = self.state.suggestions.len(),
            start,
            end,
            "activated"
        );

        if self.state.suggestions.len() == 1 {
            self.apply(buf, 0);
            return TabOutcome::Completed;
        }

        self.state.info_box_visible = true;
        if let Some(lcp) = extend_common_prefix(&prefix, &self.state.suggestions) {
            self.state.end = buf.replace_range(start, end, &lcp);
            trace!(target: "complete.engine", prefix_len = rune_len(&lcp), "extended_common_prefix");
            return TabOutcome::Extended;
        }
        if self.eager_select {
            return self.select(buf, 0);
        }
        TabOutcome::Ambiguous
    }

    fn select(&mut self, buf: &mut InputBuffer, index: usize) -> TabOutcome {
        self.apply(buf, index);
        TabOutcome::Selected(index)
    }

    fn apply(&mut self, buf: &mut InputBuffer, index: usize) {
        let Some(candidate) = self.state.suggestions.get(index) else {
            return;
        };
        self.state.end = buf.replace_range(self.state.start, self.state.end, &candidate.value);
        self.state.selected = Some(index);
        trace!(
            target: "complete.engine",
            index,
            start = self.state.start,
            end = self.state.end,
            "candidate_applied"
        );
    }
}
