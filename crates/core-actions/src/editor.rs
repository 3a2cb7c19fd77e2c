//! `LineEditor`: the editor instance plus its injected completion source.
//!
//! Single-threaded by contract. The host loop calls `apply_event` once per
//! input event, in arrival order, and redraws when the returned effects are
//! dirty. External completers run synchronously inside Tab handling under
//! their own timeout, so the loop is never blocked indefinitely.

use crate::dispatcher::{self, RenderEffects};
use crate::key_translator::{InputMode, translate_key};
use core_complete::CompletionSource;
use core_events::InputEvent;
use core_model::EditorModel;

pub struct LineEditor {
    model: EditorModel,
    source: Box<dyn CompletionSource>,
}

impl std::fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl LineEditor {
    pub fn new(model: EditorModel, source: Box<dyn CompletionSource>) -> Self {
        Self { model, source }
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut EditorModel {
        &mut self.model
    }

    pub fn source(&self) -> &dyn CompletionSource {
        self.source.as_ref()
    }

    pub fn mode(&self) -> InputMode {
        if self.model.search.is_active() {
            InputMode::Search
        } else {
            InputMode::Edit
        }
    }

    pub fn apply_event(&mut self, event: InputEvent) -> RenderEffects {
        match event {
            InputEvent::Key(key) => match translate_key(self.mode(), &key) {
                Some(action) => dispatcher::dispatch(action, &mut self.model, self.source.as_ref()),
                None => RenderEffects::clean(),
            },
            InputEvent::Paste(text) => {
                if self.mode() == InputMode::Search {
                    let line = core_text::segment::normalize_single_line(&text);
                    let query = format!("{}{}", self.model.search.query(), line);
                    self.model.search.set_query(&query);
                    return RenderEffects::dirty();
                }
                // A paste is an ordinary edit for the session bookkeeping.
                self.model.completion.reset();
                self.model.kill_ring.clear_yank();
                self.model.kill_ring.break_chain();
                self.model.set_suggestion_suppressed(false);
                let mut effects = dispatcher::handle_paste(&text, &mut self.model);
                effects.dirty = true;
                effects
            }
            InputEvent::Resize(cols, rows) => {
                self.model.resize(cols, rows);
                tracing::debug!(target: "input.event", cols, rows, "resize");
                RenderEffects::dirty()
            }
        }
    }
}
