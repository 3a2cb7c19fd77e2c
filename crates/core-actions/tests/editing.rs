mod common;

use common::{editor, key, press, type_str, value};
use core_events::{InputEvent, KeyCode, KeyEvent};
use pretty_assertions::assert_eq;

#[test]
fn basic_motion_and_deletion() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "héllo wörld");
    key(&mut ed, KeyEvent::alt('b'));
    assert_eq!(ed.model().buffer.cursor(), 6);
    press(&mut ed, KeyCode::Backspace);
    assert_eq!(value(&ed), "héllowörld");
    key(&mut ed, KeyEvent::ctrl('a'));
    press(&mut ed, KeyCode::Delete);
    assert_eq!(value(&ed), "éllowörld");
    key(&mut ed, KeyEvent::ctrl('e'));
    assert_eq!(ed.model().buffer.cursor(), 9);
}

#[test]
fn boundaries_are_clean_noops() {
    let mut ed = editor(&[]);
    assert!(!press(&mut ed, KeyCode::Backspace).dirty);
    assert!(!press(&mut ed, KeyCode::Left).dirty);
    assert!(!key(&mut ed, KeyEvent::ctrl('w')).dirty);
    assert!(!key(&mut ed, KeyEvent::ctrl('y')).dirty);
    assert!(ed.model().kill_ring.is_empty());
}

#[test]
fn ctrl_d_deletes_or_signals_eof() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "ab");
    key(&mut ed, KeyEvent::ctrl('a'));
    let fx = key(&mut ed, KeyEvent::ctrl('d'));
    assert!(!fx.eof);
    assert_eq!(value(&ed), "b");
    key(&mut ed, KeyEvent::ctrl('d'));
    let fx = key(&mut ed, KeyEvent::ctrl('d'));
    assert!(fx.eof);
}

#[test]
fn ctrl_c_abandons_line_but_keeps_kill_ring() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "rm -rf x");
    key(&mut ed, KeyEvent::ctrl('w'));
    let fx = key(&mut ed, KeyEvent::ctrl('c'));
    assert!(fx.interrupted);
    assert_eq!(fx.submitted, None);
    assert_eq!(value(&ed), "");
    assert_eq!(ed.model().kill_ring.len(), 1);
}

#[test]
fn submit_resets_for_next_command() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "ls -la");
    let fx = press(&mut ed, KeyCode::Enter);
    assert_eq!(fx.submitted.as_deref(), Some("ls -la"));
    assert_eq!(value(&ed), "");
    assert_eq!(ed.model().buffer.cursor(), 0);
}

#[test]
fn history_navigation_writes_through_on_edit() {
    let mut ed = editor(&["make test", "make build"]);
    press(&mut ed, KeyCode::Up);
    assert_eq!(value(&ed), "make test");
    press(&mut ed, KeyCode::Up);
    assert_eq!(value(&ed), "make build");
    type_str(&mut ed, "!");
    assert_eq!(ed.model().buffer.selected_index(), 0);
    assert_eq!(value(&ed), "make build!");
    assert_eq!(ed.model().buffer.history_entry(1).as_deref(), Some("make build"));
}

#[test]
fn right_at_end_accepts_ghost() {
    let mut ed = editor(&["cargo test --workspace"]);
    type_str(&mut ed, "cargo t");
    assert_eq!(ed.model().ghost_suggestion(), Some("est --workspace"));
    let fx = press(&mut ed, KeyCode::Right);
    assert!(fx.dirty);
    assert_eq!(value(&ed), "cargo test --workspace");
    assert_eq!(ed.model().ghost_suggestion(), None);
}

#[test]
fn paste_is_single_line() {
    let mut ed = editor(&[]);
    type_str(&mut ed, "echo ");
    let fx = ed.apply_event(InputEvent::Paste("a\nb\tc".into()));
    assert!(fx.dirty);
    assert_eq!(value(&ed), "echo a b c");
}

#[test]
fn resize_updates_layout() {
    let mut ed = editor(&[]);
    let fx = ed.apply_event(InputEvent::Resize(120, 40));
    assert!(fx.dirty);
    assert_eq!(ed.model().layout().cols(), 120);
    assert_eq!(ed.model().layout().rows(), 40);
}

#[test]
fn clear_screen_request() {
    let mut ed = editor(&[]);
    let fx = key(&mut ed, KeyEvent::ctrl('l'));
    assert!(fx.clear_screen);
}
