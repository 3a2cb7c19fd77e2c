//! Key -> Action translation.
//!
//! Stateless: the only context needed is whether reverse search is active,
//! passed in as [`InputMode`]. Unbound keys yield `None` and are ignored by
//! the editor (no redraw).
//!
//! Edit mode uses the emacs/readline table. Alt-Backspace is treated as
//! Ctrl-W. A `Tab` carrying SHIFT is the same as `BackTab`.

use crate::{Action, EditKind, KillKind, MotionKind, SearchAction};
use core_events::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Edit,
    Search,
}

pub fn translate_key(mode: InputMode, key: &KeyEvent) -> Option<Action> {
    let action = match mode {
        InputMode::Edit => translate_edit(key),
        InputMode::Search => translate_search(key),
    };
    tracing::trace!(target: "actions.dispatch", ?mode, key = %key, ?action, "translate");
    action
}

fn translate_edit(key: &KeyEvent) -> Option<Action> {
    use Action::*;
    if key.is_ctrl() {
        let KeyCode::Char(c) = key.code else {
            return None;
        };
        return Some(match c.to_ascii_lowercase() {
            'a' => Motion(MotionKind::LineStart),
            'e' => Motion(MotionKind::LineEnd),
            'b' => Motion(MotionKind::Left),
            'f' => Motion(MotionKind::Right),
            'h' => Edit(EditKind::DeleteBefore),
            'd' => Edit(EditKind::DeleteOrEof),
            'w' => Kill(KillKind::WordBefore),
            'u' => Kill(KillKind::ToLineStart),
            'k' => Kill(KillKind::ToLineEnd),
            'y' => Yank,
            'p' => HistoryOlder,
            'n' => HistoryNewer,
            'r' => SearchStart,
            'c' => Interrupt,
            'l' => ClearScreen,
            _ => return None,
        });
    }
    if key.is_alt() {
        return match key.code {
            KeyCode::Char('b') => Some(Motion(MotionKind::WordLeft)),
            KeyCode::Char('f') => Some(Motion(MotionKind::WordRight)),
            KeyCode::Char('d') => Some(Kill(KillKind::WordAfter)),
            KeyCode::Char('y') => Some(YankPop),
            KeyCode::Backspace => Some(Kill(KillKind::WordBefore)),
            _ => None,
        };
    }
    Some(match key.code {
        KeyCode::Char(c) if !c.is_control() => Edit(EditKind::Insert(c)),
        KeyCode::Char(_) => return None,
        KeyCode::Enter => Submit,
        KeyCode::Esc => Escape,
        KeyCode::Backspace => Edit(EditKind::DeleteBefore),
        KeyCode::Delete => Edit(EditKind::DeleteAfter),
        KeyCode::Tab if key.mods.contains(KeyModifiers::SHIFT) => CompleteBack,
        KeyCode::Tab => Complete,
        KeyCode::BackTab => CompleteBack,
        KeyCode::Up => HistoryOlder,
        KeyCode::Down => HistoryNewer,
        KeyCode::Left => Motion(MotionKind::Left),
        KeyCode::Right => Motion(MotionKind::Right),
        KeyCode::Home => Motion(MotionKind::LineStart),
        KeyCode::End => Motion(MotionKind::LineEnd),
    })
}

fn translate_search(key: &KeyEvent) -> Option<Action> {
    use SearchAction::*;
    if key.is_ctrl() {
        let KeyCode::Char(c) = key.code else {
            return None;
        };
        return match c.to_ascii_lowercase() {
            'r' | 'g' | 'c' => Some(Action::Search(Cancel)),
            'p' => Some(Action::Search(Up)),
            'n' => Some(Action::Search(Down)),
            's' => Some(Action::Search(CycleSort)),
            'h' => Some(Action::Search(Backspace)),
            _ => None,
        };
    }
    if key.is_alt() {
        return None;
    }
    let action = match key.code {
        KeyCode::Char(c) if !c.is_control() => Char(c),
        KeyCode::Backspace => Backspace,
        KeyCode::Up => Up,
        KeyCode::Down => Down,
        KeyCode::Tab | KeyCode::BackTab => CycleFilter,
        KeyCode::Enter => Accept,
        KeyCode::Esc => Cancel,
        _ => return None,
    };
    Some(Action::Search(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edit(k: KeyEvent) -> Option<Action> {
        translate_key(InputMode::Edit, &k)
    }

    fn search(k: KeyEvent) -> Option<Action> {
        translate_key(InputMode::Search, &k)
    }

    #[test]
    fn emacs_bindings() {
        assert_eq!(edit(KeyEvent::ctrl('w')), Some(Action::Kill(KillKind::WordBefore)));
        assert_eq!(edit(KeyEvent::alt('d')), Some(Action::Kill(KillKind::WordAfter)));
        assert_eq!(edit(KeyEvent::ctrl('k')), Some(Action::Kill(KillKind::ToLineEnd)));
        assert_eq!(edit(KeyEvent::ctrl('u')), Some(Action::Kill(KillKind::ToLineStart)));
        assert_eq!(edit(KeyEvent::ctrl('y')), Some(Action::Yank));
        assert_eq!(edit(KeyEvent::alt('y')), Some(Action::YankPop));
        assert_eq!(edit(KeyEvent::ctrl('r')), Some(Action::SearchStart));
        assert_eq!(
            edit(KeyEvent::new(KeyCode::Backspace, KeyModifiers::ALT)),
            Some(Action::Kill(KillKind::WordBefore))
        );
    }

    #[test]
    fn printable_and_shift() {
        assert_eq!(edit(KeyEvent::char('x')), Some(Action::Edit(EditKind::Insert('x'))));
        assert_eq!(
            edit(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(Action::Edit(EditKind::Insert('X')))
        );
        assert_eq!(
            edit(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            Some(Action::CompleteBack)
        );
        assert_eq!(edit(KeyEvent::ctrl('q')), None);
    }

    #[test]
    fn search_table() {
        assert_eq!(search(KeyEvent::char('g')), Some(Action::Search(SearchAction::Char('g'))));
        assert_eq!(search(KeyEvent::ctrl('r')), Some(Action::Search(SearchAction::Cancel)));
        assert_eq!(search(KeyEvent::ctrl('g')), Some(Action::Search(SearchAction::Cancel)));
        assert_eq!(search(KeyEvent::ctrl('s')), Some(Action::Search(SearchAction::CycleSort)));
        assert_eq!(
            search(KeyEvent::plain(KeyCode::Tab)),
            Some(Action::Search(SearchAction::CycleFilter))
        );
        assert_eq!(
            search(KeyEvent::plain(KeyCode::Enter)),
            Some(Action::Search(SearchAction::Accept))
        );
        assert_eq!(search(KeyEvent::plain(KeyCode::Left)), None);
    }
}
