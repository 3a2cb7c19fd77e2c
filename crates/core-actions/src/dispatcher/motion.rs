//! Cursor motion on the single-line buffer.
//!
//! Right / Ctrl-F / End with the cursor already at end-of-line accept the
//! ghost suggestion instead (no-op when none is showing).

use super::RenderEffects;
use crate::MotionKind;
use core_model::EditorModel;

pub(crate) fn handle_motion(kind: MotionKind, model: &mut EditorModel) -> RenderEffects {
    let at_end = model.buffer.cursor() == model.buffer.len();
    if at_end && matches!(kind, MotionKind::Right | MotionKind::LineEnd) && model.accept_ghost() {
        tracing::debug!(target: "actions.dispatch", cursor = model.buffer.cursor(), "ghost_accepted");
        return RenderEffects::dirty();
    }
    let buf = &mut model.buffer;
    let moved = match kind {
        MotionKind::Left => buf.move_left(),
        MotionKind::Right => buf.move_right(),
        MotionKind::WordLeft => buf.move_word_left(),
        MotionKind::WordRight => buf.move_word_right(),
        MotionKind::LineStart => buf.move_to_line_start(),
        MotionKind::LineEnd => buf.move_to_line_end(),
    };
    RenderEffects::dirty_if(moved)
}
