//! Host side of the REPL: completion source wiring and execution of
//! submitted lines.

use core_complete::{CompletionCandidate, CompletionSource};
use core_compspec::{
    ChainedSource, CompletionContext, ProcessRunner, SpecCompletionSource, SpecEvaluator,
    SpecRegistry,
};
use core_config::{CompletionConfig, ConfigFile};
use core_history::HistoryItem;
use core_model::ModelOptions;
use std::fmt::Write as _;
use tracing::{debug, warn};

/// Commands the host understands besides `complete` / `compgen`.
const HOST_COMMANDS: &[&str] = &["compgen", "complete", "exit", "history"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Text to print below the submitted line (may be empty).
    Output(String),
    Exit,
}

pub fn model_options(file: &ConfigFile) -> ModelOptions {
    ModelOptions {
        char_limit: file.editor.char_limit(),
        kill_ring_capacity: file.editor.kill_ring_capacity,
        suggestions_enabled: file.suggestions.enabled,
        completion_box_height: file.completion.box_height,
        min_item_width: file.completion.min_item_width,
        history_box_height: file.history.box_height,
        history_filter: file.history.filter,
        history_sort: file.history.sort,
        ..ModelOptions::default()
    }
}

/// Offers host command names while the cursor is in the first word.
fn host_commands(line: &str, cursor: usize) -> Vec<CompletionCandidate> {
    let ctx = CompletionContext::from_line(line, cursor);
    if !ctx.completing_command() {
        return Vec::new();
    }
    HOST_COMMANDS
        .iter()
        .filter(|c| c.starts_with(ctx.current_word()))
        .map(|c| CompletionCandidate::new(*c))
        .collect()
}

fn terminated(mut out: String) -> String {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone)]
pub struct Session {
    specs: SpecCompletionSource,
}

impl Session {
    pub fn new(config: &CompletionConfig) -> Self {
        let evaluator = SpecEvaluator::new(Box::new(ProcessRunner::new(config.external_timeout())));
        let specs = SpecCompletionSource::new(SpecRegistry::new(), evaluator)
            .with_whole_line_prefixes(config.whole_line_prefixes.clone());
        Self { specs }
    }

    /// Register the `complete ...` lines from the config file. Bad lines are
    /// logged and skipped.
    pub fn register_specs(&self, lines: &[String]) -> usize {
        let mut registered = 0;
        for line in lines {
            match self.specs.run_builtin(line) {
                Some(Ok(_)) => registered += 1,
                Some(Err(e)) => {
                    warn!(target: "config", error = %e, "spec_line_rejected")
                }
                None => warn!(target: "config", "spec_line_not_a_builtin"),
            }
        }
        registered
    }

    /// The source handed to the editor: registry specs first, then host
    /// command names.
    pub fn completion_source(&self) -> Box<dyn CompletionSource> {
        Box::new(
            ChainedSource::new()
                .push(Box::new(self.specs.clone()))
                .push(Box::new(host_commands)),
        )
    }

    /// `history` lists newest last, matching shell convention.
    pub fn execute(&self, line: &str, history: &[HistoryItem]) -> LineOutcome {
        let trimmed = line.trim();
        let outcome = match trimmed.split_whitespace().next() {
            None => LineOutcome::Output(String::new()),
            Some("exit") => LineOutcome::Exit,
            Some("history") => {
                let mut out = String::new();
                for (n, item) in history.iter().rev().enumerate() {
                    let _ = writeln!(out, "{:5}  {}", n + 1, item.command);
                }
                LineOutcome::Output(out)
            }
            Some(_) => match self.specs.run_builtin(trimmed) {
                Some(Ok(out)) => LineOutcome::Output(terminated(out)),
                Some(Err(e)) => LineOutcome::Output(format!("{e}\n")),
                None => LineOutcome::Output(format!("{line}\n")),
            },
        };
        debug!(target: "runtime", line_len = line.len(), exit = outcome == LineOutcome::Exit, "line_executed");
        outcome
    }
}
