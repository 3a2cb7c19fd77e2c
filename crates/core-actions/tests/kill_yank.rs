mod common;

use common::{editor, key, type_str, value};
use core_events::KeyEvent;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn successive_backward_kills_accumulate_in_one_entry() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "echo foo bar");
    key(&mut ed, KeyEvent::ctrl('w'));
    key(&mut ed, KeyEvent::ctrl('w'));
    assert_eq!(value(&ed), "echo ");
    assert_eq!(ed.model().kill_ring.entries(), ["foo bar".to_string()]);
}

#[test]
fn non_kill_command_starts_a_new_entry() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "one two");
    key(&mut ed, KeyEvent::ctrl('w'));
    key(&mut ed, KeyEvent::ctrl('a'));
    key(&mut ed, KeyEvent::ctrl('k'));
    assert_eq!(value(&ed), "");
    assert_eq!(
        ed.model().kill_ring.entries(),
        ["one ".to_string(), "two".to_string()]
    );
}

#[test]
fn forward_kills_append() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "alpha beta gamma");
    key(&mut ed, KeyEvent::ctrl('a'));
    key(&mut ed, KeyEvent::alt('d'));
    key(&mut ed, KeyEvent::alt('d'));
    assert_eq!(ed.model().kill_ring.len(), 1);
    assert_eq!(ed.model().kill_ring.entries()[0], "alpha beta");
    assert_eq!(value(&ed), " gamma");
}

#[test]
fn yank_then_yank_pop_rotates() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "one two");
    key(&mut ed, KeyEvent::ctrl('w'));
    key(&mut ed, KeyEvent::ctrl('a'));
    key(&mut ed, KeyEvent::ctrl('k'));

    key(&mut ed, KeyEvent::ctrl('y'));
    assert_eq!(value(&ed), "one ");
    key(&mut ed, KeyEvent::alt('y'));
    assert_eq!(value(&ed), "two");
    key(&mut ed, KeyEvent::alt('y'));
    assert_eq!(value(&ed), "one ");
}

#[test]
fn yank_pop_without_yank_is_noop() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "a b");
    key(&mut ed, KeyEvent::ctrl('w'));
    type_str(&mut ed, "x");
    key(&mut ed, KeyEvent::ctrl('w'));
    key(&mut ed, KeyEvent::ctrl('y'));
    type_str(&mut ed, "!");
    let before = value(&ed);
    let fx = key(&mut ed, KeyEvent::alt('y'));
    assert!(!fx.dirty);
    assert_eq!(value(&ed), before);
}

#[test]
fn kill_hides_ghost_until_next_keystroke() {
    let mut ed = editor(&["git status --short"]);
    type_str(&mut ed, "git status x");
    key(&mut ed, KeyEvent::ctrl('w'));
    assert_eq!(value(&ed), "git status ");
    assert_eq!(ed.model().ghost_suggestion(), None);
    type_str(&mut ed, "-");
    assert_eq!(ed.model().ghost_suggestion(), Some("-short"));
}

#[test]
fn empty_kill_keeps_ghost_and_stays_clean() {
    let mut ed = editor(&["git status --short"]);
    type_str(&mut ed, "git st");
    let fx = key(&mut ed, KeyEvent::ctrl('k'));
    assert!(!fx.dirty);
    assert_eq!(ed.model().ghost_suggestion(), Some("atus --short"));
    assert!(ed.model().kill_ring.is_empty());

    let mut ed = editor(&[]);
    assert!(!key(&mut ed, KeyEvent::ctrl('k')).dirty);
    assert!(!key(&mut ed, KeyEvent::ctrl('y')).dirty);
}

#[test]
fn lifting_suppression_repaints_only_when_ghost_returns() {
    let mut ed = editor(&["git status --short"]);
    type_str(&mut ed, "git status x");
    key(&mut ed, KeyEvent::ctrl('w'));
    assert_eq!(ed.model().ghost_suggestion(), None);
    // Ctrl-E is a no-op at the end but brings the ghost back.
    assert!(key(&mut ed, KeyEvent::ctrl('e')).dirty);
    assert_eq!(ed.model().ghost_suggestion(), Some("--short"));

    let mut ed = editor(&[]);
    type_str(&mut ed, "a b");
    key(&mut ed, KeyEvent::ctrl('w'));
    assert!(!key(&mut ed, KeyEvent::ctrl('e')).dirty);
}

proptest! {
    #[test]
    fn consecutive_word_kills_reassemble_the_line(
        words in prop::collection::vec("[a-z]{1,6}", 1..6)
    ) {
        let line = words.join(" ");
        let mut ed = editor(&[]);
        type_str(&mut ed, &line);
        for _ in 0..words.len() {
            key(&mut ed, KeyEvent::ctrl('w'));
        }
        prop_assert_eq!(value(&ed), "");
        prop_assert_eq!(ed.model().kill_ring.entries(), [line]);
    }

    #[test]
    fn yank_pop_neither_loses_nor_duplicates(
        kills in prop::collection::vec("[a-z]{1,8}", 2..6),
        prefix in "[a-z ]{0,10}",
    ) {
        let mut ed = editor(&[]);
        for k in &kills {
            type_str(&mut ed, k);
            key(&mut ed, KeyEvent::ctrl('u'));
        }
        type_str(&mut ed, &prefix);
        let before = ed.model().buffer.len();
        let entries = ed.model().kill_ring.entries().to_vec();

        key(&mut ed, KeyEvent::ctrl('y'));
        prop_assert_eq!(ed.model().buffer.len(), before + entries[0].chars().count());
        key(&mut ed, KeyEvent::alt('y'));
        prop_assert_eq!(ed.model().buffer.len(), before + entries[1].chars().count());
        prop_assert_eq!(value(&ed), format!("{prefix}{}", entries[1]));
    }
}
