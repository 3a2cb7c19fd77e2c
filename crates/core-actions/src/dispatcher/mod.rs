//! Dispatcher applying `Action` to the `EditorModel`.
//!
//! Sub-modules:
//! * `motion`   - cursor movement, ghost-suggestion accept
//! * `edit`     - insert / delete / paste
//! * `kill`     - kill commands, yank, yank-pop
//! * `complete` - Tab / Shift-Tab / Escape / Enter against the completion engine
//! * `search`   - reverse history search
//!
//! Cross-cutting bookkeeping lives here so every handler sees the same rules:
//! * Before the action: an active completion session is dropped unless the
//!   action drives it (Tab, Shift-Tab, Escape, Enter). Any non-yank action
//!   forgets the yank span. Any non-kill action breaks the kill chain.
//! * After the action: a kill that changed the buffer suppresses the ghost
//!   suggestion; anything else lifts the suppression. Lifting only repaints
//!   when a ghost actually reappears.

use crate::Action;
use core_complete::CompletionSource;
use core_model::EditorModel;

mod complete;
mod edit;
mod kill;
mod motion;
mod search;

pub(crate) use edit::handle_paste;

/// Outcome of one action (and of one `apply_event`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderEffects {
    pub dirty: bool,
    /// Text of a submitted line; the buffer has already been reset.
    pub submitted: Option<String>,
    /// Ctrl-C: the line was abandoned.
    pub interrupted: bool,
    /// Ctrl-D on an empty line.
    pub eof: bool,
    pub clear_screen: bool,
}

impl RenderEffects {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    pub fn clean() -> Self {
        Self::default()
    }

    /// `dirty()` when `changed`, `clean()` otherwise.
    pub fn dirty_if(changed: bool) -> Self {
        if changed { Self::dirty() } else { Self::clean() }
    }

    pub fn submitted(line: String) -> Self {
        Self {
            dirty: true,
            submitted: Some(line),
            ..Self::default()
        }
    }

    pub fn interrupted() -> Self {
        Self {
            dirty: true,
            interrupted: true,
            ..Self::default()
        }
    }

    pub fn eof() -> Self {
        Self {
            eof: true,
            ..Self::default()
        }
    }

    pub fn clear_screen() -> Self {
        Self {
            dirty: true,
            clear_screen: true,
            ..Self::default()
        }
    }
}

/// Apply an action to the model. `source` feeds the completion engine.
pub fn dispatch(
    action: Action,
    model: &mut EditorModel,
    source: &dyn CompletionSource,
) -> RenderEffects {
    let mut dropped_completion = false;
    if model.completion.is_active() && !action.drives_completion() {
        model.completion.reset();
        dropped_completion = true;
    }
    if !action.is_yank() {
        model.kill_ring.clear_yank();
    }
    if !action.is_kill() {
        model.kill_ring.break_chain();
    }
    let was_suppressed = model.suggestion_suppressed();

    let mut effects = match action {
        Action::Motion(kind) => motion::handle_motion(kind, model),
        Action::Edit(kind) => edit::handle_edit(kind, model),
        Action::HistoryOlder => RenderEffects::dirty_if(model.buffer.history_older()),
        Action::HistoryNewer => RenderEffects::dirty_if(model.buffer.history_newer()),
        Action::Kill(kind) => kill::handle_kill(kind, model),
        Action::Yank => kill::handle_yank(model),
        Action::YankPop => kill::handle_yank_pop(model),
        Action::Complete | Action::CompleteBack | Action::Escape | Action::Submit => {
            complete::handle_completion_key(action, model, source)
        }
        Action::Interrupt => {
            model.reset_line();
            RenderEffects::interrupted()
        }
        Action::ClearScreen => RenderEffects::clear_screen(),
        Action::SearchStart => {
            model.enter_search();
            RenderEffects::dirty()
        }
        Action::Search(sa) => search::handle_search(sa, model),
    };

    // A kill that removed nothing leaves the suppression as it was.
    let suppressed = if action.is_kill() {
        was_suppressed || effects.dirty
    } else {
        false
    };
    model.set_suggestion_suppressed(suppressed);
    let revealed = was_suppressed && !suppressed && model.ghost_suggestion().is_some();
    if dropped_completion || revealed {
        effects.dirty = true;
    }
    tracing::trace!(target: "actions.dispatch", ?action, dirty = effects.dirty, "dispatched");
    effects
}
