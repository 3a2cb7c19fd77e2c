//! Kill / yank / yank-pop.
//!
//! Every kill records its removed span in the ring with the direction of the
//! kill: text before the cursor is a backward kill, text after it forward.
//! A kill that removes nothing leaves the ring (and the chain) untouched.

use super::RenderEffects;
use crate::KillKind;
use core_model::EditorModel;
use core_state::KillDirection;

pub(crate) fn handle_kill(kind: KillKind, model: &mut EditorModel) -> RenderEffects {
    let buf = &mut model.buffer;
    let (removed, direction) = match kind {
        KillKind::WordBefore => (buf.delete_word_before(), KillDirection::Backward),
        KillKind::WordAfter => (buf.delete_word_after(), KillDirection::Forward),
        KillKind::ToLineStart => (buf.delete_to_line_start(), KillDirection::Backward),
        KillKind::ToLineEnd => (buf.delete_to_line_end(), KillDirection::Forward),
    };
    let Some(text) = removed else {
        return RenderEffects::clean();
    };
    model.kill_ring.record(&text, direction);
    tracing::debug!(
        target: "state.kill",
        ?kind,
        removed_len = text.chars().count(),
        entries = model.kill_ring.len(),
        "kill"
    );
    RenderEffects::dirty()
}

pub(crate) fn handle_yank(model: &mut EditorModel) -> RenderEffects {
    let Some(text) = model.kill_ring.yank() else {
        return RenderEffects::clean();
    };
    let start = model.buffer.cursor();
    let inserted = model.buffer.insert_str(text);
    model.kill_ring.set_yank_span(start..start + inserted);
    tracing::debug!(target: "state.kill", start, inserted, "yank");
    RenderEffects::dirty()
}

pub(crate) fn handle_yank_pop(model: &mut EditorModel) -> RenderEffects {
    let Some((span, text)) = model.kill_ring.yank_pop() else {
        return RenderEffects::clean();
    };
    let start = span.start;
    let end = model.buffer.replace_range(span.start, span.end, text);
    model.kill_ring.set_yank_span(start..end);
    tracing::debug!(target: "state.kill", start, end, "yank_pop");
    RenderEffects::dirty()
}
