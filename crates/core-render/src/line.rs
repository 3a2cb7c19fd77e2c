//! Input line view: prompt, draft, and the non-inserted tails drawn dimmed
//! after it (ghost suggestion, or the highlighted candidate's suffix).
//!
//! At most one tail is present: the suffix only exists while a completion
//! session has a highlighted candidate, and the ghost is hidden during any
//! completion session. The ghost always trails the draft; the suffix sits
//! right after the inserted candidate, which may be mid-line.

use core_model::EditorModel;
use core_text::display_width;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub prompt: String,
    pub text: String,
    /// Display column of the cursor, measured from the start of `text`.
    pub cursor_col: usize,
    pub ghost: Option<String>,
    /// Rune offset into `text` where the suffix is drawn, and the suffix.
    pub suffix: Option<(usize, String)>,
    /// Non-fatal validator message attached to the draft.
    pub error: Option<String>,
}

impl LineView {
    /// Display column of the cursor including the prompt.
    pub fn absolute_cursor_col(&self) -> usize {
        display_width(&self.prompt) + self.cursor_col
    }
}

pub fn line_view(model: &EditorModel) -> LineView {
    let buf = &model.buffer;
    let before: String = buf.runes()[..buf.cursor()].iter().collect();
    let suffix = model.completion.current_suffix().and_then(|tail| {
        let at = model.completion.state().end;
        (at <= buf.len()).then(|| (at, tail.to_string()))
    });
    let mut cursor_col = display_width(&before);
    if let Some((at, tail)) = &suffix
        && *at < buf.cursor()
    {
        cursor_col += display_width(tail);
    }
    LineView {
        prompt: model.prompt().to_string(),
        text: buf.value(),
        cursor_col,
        ghost: model.ghost_suggestion().map(str::to_string),
        suffix,
        error: buf.error().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_complete::CompletionCandidate;
    use core_history::HistoryItem;

    #[test]
    fn cursor_column_counts_wide_runes() {
        let mut m = EditorModel::default();
        m.buffer.insert_str("漢字ab");
        m.buffer.move_left();
        let v = line_view(&m);
        assert_eq!(v.text, "漢字ab");
        assert_eq!(v.cursor_col, 5);
        assert_eq!(v.absolute_cursor_col(), 7);
    }

    #[test]
    fn ghost_tail_present_at_end() {
        let mut m = EditorModel::default();
        m.set_history(vec![HistoryItem::new("ls -la", "/")]);
        m.buffer.insert_str("ls");
        assert_eq!(line_view(&m).ghost.as_deref(), Some(" -la"));
        assert_eq!(line_view(&m).suffix, None);
    }

    #[test]
    fn suffix_follows_candidate_inserted_mid_line() {
        let mut m = EditorModel::default();
        m.buffer.insert_str("cd s x");
        m.buffer.move_left();
        m.buffer.move_left();
        let source = |_: &str, _: usize| {
            vec![
                CompletionCandidate::new("src").with_suffix("/"),
                CompletionCandidate::new("scripts").with_suffix("/"),
            ]
        };
        m.completion.tab(&mut m.buffer, &source);
        assert_eq!(m.buffer.value(), "cd src x");
        let v = line_view(&m);
        assert_eq!(v.suffix, Some((6, "/".to_string())));
        assert_eq!(v.cursor_col, 6);
        assert_eq!(v.ghost, None);
    }
}
