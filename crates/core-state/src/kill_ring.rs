//! Emacs-style kill ring.
//!
//! Entries are stored newest-first (`entries[0]` is what `yank` inserts),
//! mirroring the numbered-register rotation: a fresh kill is inserted at the
//! front and the oldest entry falls off once `capacity` is exceeded.
//!
//! Consecutive kills in the same direction coalesce into the front entry:
//! forward kills (M-D, C-K) append, backward kills (C-W, C-U) prepend, so the
//! entry reads in buffer order. Any non-kill command breaks the chain.
//!
//! Yank-pop is only meaningful right after a yank (or another yank-pop); the
//! ring remembers the span of the last inserted text so the editor can replace
//! it with the next older entry.

use std::ops::Range;
use tracing::trace;

pub const KILL_RING_DEFAULT_CAPACITY: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillDirection {
    /// Text after the cursor (kill-word, kill-line).
    Forward,
    /// Text before the cursor (backward-kill-word, unix-line-discard).
    Backward,
}

#[derive(Debug, Clone)]
pub struct KillRing {
    entries: Vec<String>,
    capacity: usize,
    ring_index: usize,
    last_direction: Option<KillDirection>,
    last_command_was_kill: bool,
    last_yank: Option<Range<usize>>,
}

impl Default for KillRing {
    fn default() -> Self {
        Self::new(KILL_RING_DEFAULT_CAPACITY)
    }
}

impl KillRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            ring_index: 0,
            last_direction: None,
            last_command_was_kill: false,
            last_yank: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest-first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last_command_was_kill(&self) -> bool {
        self.last_command_was_kill
    }

    /// Record killed text. Empty spans are ignored and leave the chain untouched.
    pub fn record(&mut self, text: &str, direction: KillDirection) {
        if text.is_empty() {
            return;
        }
        let coalesce = self.last_command_was_kill
            && self.last_direction == Some(direction)
            && !self.entries.is_empty();
        if coalesce {
            let front = &mut self.entries[0];
            match direction {
                KillDirection::Forward => front.push_str(text),
                KillDirection::Backward => front.insert_str(0, text),
            }
            trace!(target: "state.kill", ?direction, entry_len = front.len(), "kill_coalesced");
        } else {
            self.entries.insert(0, text.to_string());
            if self.entries.len() > self.capacity {
                self.entries.truncate(self.capacity);
                trace!(target: "state.kill", capacity = self.capacity, "kill_ring_trimmed");
            }
            trace!(target: "state.kill", ?direction, entries = self.entries.len(), "kill_pushed");
        }
        self.ring_index = 0;
        self.last_direction = Some(direction);
        self.last_command_was_kill = true;
        self.last_yank = None;
    }

    /// Mark that a non-kill command ran; the next kill starts a new entry.
    pub fn break_chain(&mut self) {
        self.last_command_was_kill = false;
        self.last_direction = None;
    }

    /// Text to insert for a yank (the newest entry). Resets the rotation.
    pub fn yank(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.ring_index = 0;
        Some(&self.entries[0])
    }

    /// Remember where the last yank (or yank-pop) put its text.
    pub fn set_yank_span(&mut self, span: Range<usize>) {
        self.last_yank = Some(span);
    }

    /// Span of the most recent yank, if the previous command was a yank.
    pub fn yank_span(&self) -> Option<Range<usize>> {
        self.last_yank.clone()
    }

    /// Forget the yank span; any command other than yank/yank-pop calls this.
    pub fn clear_yank(&mut self) {
        self.last_yank = None;
    }

    /// Rotate to the next older entry. Returns the span to replace and the
    /// replacement text, or `None` when not directly after a yank or when the
    /// ring holds fewer than two entries.
    pub fn yank_pop(&mut self) -> Option<(Range<usize>, &str)> {
        let span = self.last_yank.clone()?;
        if self.entries.len() <= 1 {
            return None;
        }
        self.ring_index = (self.ring_index + 1) % self.entries.len();
        trace!(target: "state.kill", ring_index = self.ring_index, "yank_pop");
        Some((span, &self.entries[self.ring_index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn consecutive_forward_kills_append() {
        let mut r = KillRing::default();
        r.record("foo", KillDirection::Forward);
        r.record(" bar", KillDirection::Forward);
        assert_eq!(r.entries(), &["foo bar".to_string()]);
    }

    #[test]
    fn consecutive_backward_kills_prepend() {
        let mut r = KillRing::default();
        r.record("bar", KillDirection::Backward);
        r.record("foo ", KillDirection::Backward);
        assert_eq!(r.entries(), &["foo bar".to_string()]);
    }

    #[test]
    fn direction_change_or_break_starts_new_entry() {
        let mut r = KillRing::default();
        r.record("a", KillDirection::Forward);
        r.record("b", KillDirection::Backward);
        r.break_chain();
        r.record("c", KillDirection::Backward);
        assert_eq!(r.entries(), &["c".to_string(), "b".to_string(), "a".to_string()]);
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut r = KillRing::new(2);
        for t in ["one", "two", "three"] {
            r.record(t, KillDirection::Forward);
            r.break_chain();
        }
        assert_eq!(r.entries(), &["three".to_string(), "two".to_string()]);
    }

    #[test]
    fn yank_pop_requires_prior_yank_and_two_entries() {
        let mut r = KillRing::default();
        r.record("only", KillDirection::Forward);
        r.break_chain();
        assert!(r.yank_pop().is_none());
        assert_eq!(r.yank(), Some("only"));
        r.set_yank_span(0..4);
        assert!(r.yank_pop().is_none(), "single entry ring leaves yank in place");
    }

    #[test]
    fn yank_pop_cycles_and_wraps() {
        let mut r = KillRing::default();
        for t in ["old", "mid", "new"] {
            r.record(t, KillDirection::Forward);
            r.break_chain();
        }
        assert_eq!(r.yank(), Some("new"));
        r.set_yank_span(0..3);
        let (span, text) = r.yank_pop().unwrap();
        assert_eq!((span, text), (0..3, "mid"));
        r.set_yank_span(0..3);
        assert_eq!(r.yank_pop().unwrap().1, "old");
        r.set_yank_span(0..3);
        assert_eq!(r.yank_pop().unwrap().1, "new");
    }

    #[test]
    fn empty_kill_is_ignored() {
        let mut r = KillRing::default();
        r.record("", KillDirection::Forward);
        assert!(r.is_empty());
        assert!(!r.last_command_was_kill());
    }

    proptest! {
        #[test]
        fn forward_chain_concatenates_in_order(parts in proptest::collection::vec("[a-z ]{1,6}", 1..8)) {
            let mut r = KillRing::default();
            for p in &parts {
                r.record(p, KillDirection::Forward);
            }
            prop_assert_eq!(r.len(), 1);
            prop_assert_eq!(&r.entries()[0], &parts.concat());
        }

        #[test]
        fn backward_chain_reads_in_buffer_order(parts in proptest::collection::vec("[a-z ]{1,6}", 1..8)) {
            let mut r = KillRing::default();
            for p in &parts {
                r.record(p, KillDirection::Backward);
            }
            let expected: String = parts.iter().rev().map(String::as_str).collect();
            prop_assert_eq!(&r.entries()[0], &expected);
        }

        #[test]
        fn ring_never_exceeds_capacity(cap in 1usize..6, n in 0usize..20) {
            let mut r = KillRing::new(cap);
            for i in 0..n {
                r.record(&i.to_string(), KillDirection::Forward);
                r.break_chain();
            }
            prop_assert!(r.len() <= cap);
        }
    }
}
