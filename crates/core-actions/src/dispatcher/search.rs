//! Reverse history search mode.
//!
//! Accept replaces the draft with the selected command (cursor at end);
//! cancel leaves the draft exactly as it was before Ctrl-R.

use super::RenderEffects;
use crate::SearchAction;
use core_model::EditorModel;

pub(crate) fn handle_search(action: SearchAction, model: &mut EditorModel) -> RenderEffects {
    let search = &mut model.search;
    if !search.is_active() {
        return RenderEffects::clean();
    }
    match action {
        SearchAction::Char(c) => {
            search.push_char(c);
            RenderEffects::dirty()
        }
        SearchAction::Backspace => RenderEffects::dirty_if(search.pop_char()),
        SearchAction::Up => RenderEffects::dirty_if(search.move_up()),
        SearchAction::Down => RenderEffects::dirty_if(search.move_down()),
        SearchAction::CycleFilter => {
            search.cycle_filter();
            RenderEffects::dirty()
        }
        SearchAction::CycleSort => {
            search.cycle_sort();
            RenderEffects::dirty()
        }
        SearchAction::Accept => {
            if let Some(command) = search.accept() {
                model.buffer.set_value(&command);
            }
            RenderEffects::dirty()
        }
        SearchAction::Cancel => {
            search.cancel();
            RenderEffects::dirty()
        }
    }
}
