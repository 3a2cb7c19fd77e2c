//! Key translation and action dispatch for the line editor.
//!
//! Flow per event: `LineEditor::apply_event` receives an `InputEvent`, the
//! translator maps keys to an [`Action`] (emacs bindings, or the search-mode
//! table while reverse search is active), and the dispatcher mutates the
//! `EditorModel`. The returned [`RenderEffects`] tells the host whether to
//! redraw and whether a line was submitted.

mod dispatcher;
mod editor;
mod key_translator;

pub use dispatcher::{RenderEffects, dispatch};
pub use editor::LineEditor;
pub use key_translator::{InputMode, translate_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert(char),
    DeleteBefore,
    DeleteAfter,
    /// Ctrl-D: delete under the cursor, or end-of-input on an empty line.
    DeleteOrEof,
}

/// Commands that feed the kill ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillKind {
    WordBefore,
    WordAfter,
    ToLineStart,
    ToLineEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    Char(char),
    Backspace,
    Up,
    Down,
    CycleFilter,
    CycleSort,
    Accept,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Kill(KillKind),
    Yank,
    YankPop,
    HistoryOlder,
    HistoryNewer,
    Complete,
    CompleteBack,
    Escape,
    Submit,
    Interrupt,
    ClearScreen,
    SearchStart,
    Search(SearchAction),
}

impl Action {
    pub fn is_kill(&self) -> bool {
        matches!(self, Action::Kill(_))
    }

    pub fn is_yank(&self) -> bool {
        matches!(self, Action::Yank | Action::YankPop)
    }

    /// Keys that leave an active completion session alone (they drive it).
    pub fn drives_completion(&self) -> bool {
        matches!(
            self,
            Action::Complete | Action::CompleteBack | Action::Escape | Action::Submit
        )
    }
}
