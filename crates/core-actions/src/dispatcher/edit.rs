//! Text edits that do not touch the kill ring.

use super::RenderEffects;
use crate::EditKind;
use core_model::EditorModel;

pub(crate) fn handle_edit(kind: EditKind, model: &mut EditorModel) -> RenderEffects {
    let buf = &mut model.buffer;
    match kind {
        EditKind::Insert(c) => RenderEffects::dirty_if(buf.insert_runes(&[c]) > 0),
        EditKind::DeleteBefore => RenderEffects::dirty_if(buf.delete_char_before()),
        EditKind::DeleteAfter => RenderEffects::dirty_if(buf.delete_char_after()),
        EditKind::DeleteOrEof => {
            if buf.is_empty() {
                tracing::debug!(target: "actions.dispatch", "eof");
                return RenderEffects::eof();
            }
            RenderEffects::dirty_if(buf.delete_char_after())
        }
    }
}

/// Insert pasted text as one edit. Newlines and tabs become spaces.
pub(crate) fn handle_paste(text: &str, model: &mut EditorModel) -> RenderEffects {
    let line = core_text::segment::normalize_single_line(text);
    let inserted = model.buffer.insert_str(&line);
    tracing::debug!(target: "actions.dispatch", paste_len = text.len(), inserted, "paste");
    RenderEffects::dirty_if(inserted > 0)
}
