#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{LineEditor, RenderEffects};
use core_complete::CompletionCandidate;
use core_events::{InputEvent, KeyCode, KeyEvent};
use core_history::HistoryItem;
use core_model::EditorModel;

/// Editor with no completions and the given newest-first history.
pub fn editor(history: &[&str]) -> LineEditor {
    editor_with(history, &[])
}

/// Editor whose completion source always answers `candidates`.
pub fn editor_with(history: &[&str], candidates: &[&str]) -> LineEditor {
    let cands: Vec<CompletionCandidate> =
        candidates.iter().map(|c| CompletionCandidate::new(*c)).collect();
    let source = move |_: &str, _: usize| cands.clone();
    let mut model = EditorModel::default();
    model.set_current_directory("/work");
    model.set_history(
        history
            .iter()
            .map(|c| HistoryItem::new(*c, "/work"))
            .collect(),
    );
    LineEditor::new(model, Box::new(source))
}

pub fn key(ed: &mut LineEditor, k: KeyEvent) -> RenderEffects {
    ed.apply_event(InputEvent::Key(k))
}

pub fn press(ed: &mut LineEditor, code: KeyCode) -> RenderEffects {
    key(ed, KeyEvent::plain(code))
}

pub fn type_str(ed: &mut LineEditor, s: &str) {
    for c in s.chars() {
        key(ed, KeyEvent::char(c));
    }
}

pub fn value(ed: &LineEditor) -> String {
    ed.model().buffer.value()
}
