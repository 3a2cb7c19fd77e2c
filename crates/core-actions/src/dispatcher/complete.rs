//! Keys that drive the completion engine: Tab, Shift-Tab, Escape, Enter.
//!
//! Enter is consumed when the info box highlights a specific candidate (its
//! value is already in the buffer); otherwise it submits the line.

use super::RenderEffects;
use crate::Action;
use core_complete::{CompletionSource, TabOutcome};
use core_model::EditorModel;

pub(crate) fn handle_completion_key(
    action: Action,
    model: &mut EditorModel,
    source: &dyn CompletionSource,
) -> RenderEffects {
    match action {
        Action::Complete | Action::CompleteBack => {
            let outcome = if action == Action::Complete {
                model.completion.tab(&mut model.buffer, source)
            } else {
                model.completion.back_tab(&mut model.buffer, source)
            };
            tracing::debug!(
                target: "actions.dispatch",
                ?outcome,
                candidates = model.completion.suggestions().len(),
                "completion_key"
            );
            RenderEffects::dirty_if(outcome != TabOutcome::NoCandidates)
        }
        Action::Escape => RenderEffects::dirty_if(model.completion.cancel(&mut model.buffer)),
        Action::Submit => {
            if model.completion.accept() {
                return RenderEffects::dirty();
            }
            submit(model)
        }
        _ => RenderEffects::clean(),
    }
}

fn submit(model: &mut EditorModel) -> RenderEffects {
    let line = model.buffer.value();
    tracing::info!(target: "actions.dispatch", line_len = line.chars().count(), "submit");
    model.reset_line();
    RenderEffects::submitted(line)
}
