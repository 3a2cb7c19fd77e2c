//! Evaluating a [`CompletionSpec`] against a word context.

use crate::context::CompletionContext;
use crate::external::ExternalCompleterRunner;
use crate::parse::parse_output;
use crate::spec::{CompletionSpec, SpecKind};
use core_complete::CompletionCandidate;
use tracing::debug;

/// Invokes a named completion function through the shell interpreter and
/// returns the reply array it populated.
pub trait FunctionInvoker {
    fn invoke(&self, function: &str, ctx: &CompletionContext) -> Vec<String>;
}

/// Whether function replies are filtered by the current word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFilter {
    /// The function's replies are authoritative.
    Raw,
    /// Keep replies prefixed by the current word (`compgen -F`).
    CurrentWord,
}

pub struct SpecEvaluator {
    runner: Box<dyn ExternalCompleterRunner + Send + Sync>,
    functions: Option<Box<dyn FunctionInvoker + Send + Sync>>,
}

impl std::fmt::Debug for SpecEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecEvaluator")
            .field("functions", &self.functions.is_some())
            .finish_non_exhaustive()
    }
}

/// Words of `list` that start with `word`; an empty word keeps everything.
pub fn filter_words<'a>(list: &'a str, word: &'a str) -> impl Iterator<Item = &'a str> {
    list.split_whitespace().filter(move |w| w.starts_with(word))
}

impl SpecEvaluator {
    pub fn new(runner: Box<dyn ExternalCompleterRunner + Send + Sync>) -> Self {
        Self {
            runner,
            functions: None,
        }
    }

    pub fn with_functions(mut self, functions: Box<dyn FunctionInvoker + Send + Sync>) -> Self {
        self.functions = Some(functions);
        self
    }

    pub fn evaluate(
        &self,
        spec: &CompletionSpec,
        ctx: &CompletionContext,
        filter: ReplyFilter,
    ) -> Vec<CompletionCandidate> {
        let out: Vec<CompletionCandidate> = match spec.kind {
            SpecKind::WordList => filter_words(&spec.value, ctx.current_word())
                .map(CompletionCandidate::new)
                .collect(),
            SpecKind::Function => {
                let Some(functions) = &self.functions else {
                    debug!(target: "compspec.registry", function = %spec.value, "no_function_invoker");
                    return Vec::new();
                };
                let replies = functions.invoke(&spec.value, ctx);
                let word = ctx.current_word();
                replies
                    .into_iter()
                    .filter(|r| filter == ReplyFilter::Raw || r.starts_with(word))
                    .map(CompletionCandidate::new)
                    .collect()
            }
            SpecKind::Command => match self.runner.run(&spec.value, ctx) {
                Ok(stdout) => parse_output(&stdout),
                Err(e) => {
                    debug!(target: "compspec.external", error = %e, "completer_failed_empty_result");
                    Vec::new()
                }
            },
        };
        debug!(
            target: "compspec.registry",
            command = %spec.command,
            kind = ?spec.kind,
            candidates = out.len(),
            "evaluated"
        );
        out
    }
}
