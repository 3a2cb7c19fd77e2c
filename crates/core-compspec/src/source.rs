//! Completion sources backed by the spec registry.

use crate::builtin::{SpecError, run_builtin};
use crate::context::CompletionContext;
use crate::eval::{ReplyFilter, SpecEvaluator};
use crate::spec::SpecRegistry;
use core_complete::{CompletionCandidate, CompletionSource};
use std::sync::{Arc, RwLock};
use tracing::warn;

pub type SharedRegistry = Arc<RwLock<SpecRegistry>>;

/// Looks the command word up in the registry and evaluates its spec. While
/// the cursor is still in the command word, registered command names are
/// offered instead.
///
/// Cloning is cheap and shares the registry, so the host can keep a handle
/// for `complete` lines while the editor owns another.
#[derive(Debug, Clone)]
pub struct SpecCompletionSource {
    registry: SharedRegistry,
    evaluator: Arc<SpecEvaluator>,
    whole_line_prefixes: Vec<String>,
}

impl SpecCompletionSource {
    pub fn new(registry: SpecRegistry, evaluator: SpecEvaluator) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            evaluator: Arc::new(evaluator),
            whole_line_prefixes: Vec::new(),
        }
    }

    pub fn with_whole_line_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.whole_line_prefixes = prefixes;
        self
    }

    pub fn registry(&self) -> SharedRegistry {
        Arc::clone(&self.registry)
    }

    /// Execute a `complete` / `compgen` line against the shared registry.
    pub fn run_builtin(&self, line: &str) -> Option<Result<String, SpecError>> {
        let Ok(mut registry) = self.registry.write() else {
            warn!(target: "compspec.registry", "registry_lock_poisoned");
            return None;
        };
        run_builtin(&mut registry, &self.evaluator, line)
    }
}

impl CompletionSource for SpecCompletionSource {
    fn get_completions(&self, line: &str, cursor: usize) -> Vec<CompletionCandidate> {
        let ctx = CompletionContext::from_line(line, cursor);
        let Ok(registry) = self.registry.read() else {
            warn!(target: "compspec.registry", "registry_lock_poisoned");
            return Vec::new();
        };
        if ctx.completing_command() {
            return registry
                .commands_with_prefix(ctx.current_word())
                .into_iter()
                .map(CompletionCandidate::new)
                .collect();
        }
        // Clone so an external completer never runs while the lock is held.
        let Some(spec) = registry.get(ctx.command()).cloned() else {
            return Vec::new();
        };
        drop(registry);
        self.evaluator.evaluate(&spec, &ctx, ReplyFilter::Raw)
    }

    fn get_help(&self, line: &str, cursor: usize) -> String {
        let ctx = CompletionContext::from_line(line, cursor);
        self.registry
            .read()
            .ok()
            .and_then(|r| r.get(ctx.command()).map(|s| s.describe()))
            .unwrap_or_default()
    }

    fn whole_line_prefixes(&self) -> &[String] {
        &self.whole_line_prefixes
    }
}

/// Tries each source in order; the first non-empty result wins.
#[derive(Default)]
pub struct ChainedSource {
    sources: Vec<Box<dyn CompletionSource>>,
    whole_line_prefixes: Vec<String>,
}

impl ChainedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, source: Box<dyn CompletionSource>) -> Self {
        for p in source.whole_line_prefixes() {
            if !self.whole_line_prefixes.contains(p) {
                self.whole_line_prefixes.push(p.clone());
            }
        }
        self.sources.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl CompletionSource for ChainedSource {
    fn get_completions(&self, line: &str, cursor: usize) -> Vec<CompletionCandidate> {
        self.sources
            .iter()
            .map(|s| s.get_completions(line, cursor))
            .find(|c| !c.is_empty())
            .unwrap_or_default()
    }

    fn get_help(&self, line: &str, cursor: usize) -> String {
        self.sources
            .iter()
            .map(|s| s.get_help(line, cursor))
            .find(|h| !h.is_empty())
            .unwrap_or_default()
    }

    fn whole_line_prefixes(&self) -> &[String] {
        &self.whole_line_prefixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{CompleterError, ExternalCompleterRunner};
    use crate::spec::CompletionSpec;
    use pretty_assertions::assert_eq;

    struct NoRun;
    impl ExternalCompleterRunner for NoRun {
        fn run(&self, program: &str, _: &CompletionContext) -> Result<String, CompleterError> {
            Err(CompleterError::InvalidUtf8 {
                program: program.into(),
            })
        }
    }

    fn source() -> SpecCompletionSource {
        let mut reg = SpecRegistry::new();
        reg.add(CompletionSpec::word_list("svc", "start stop status"));
        reg.add(CompletionSpec::word_list("sudo", "-u -i"));
        SpecCompletionSource::new(reg, SpecEvaluator::new(Box::new(NoRun)))
    }

    fn values(c: Vec<CompletionCandidate>) -> Vec<String> {
        c.into_iter().map(|c| c.value).collect()
    }

    #[test]
    fn first_word_completes_registered_commands() {
        assert_eq!(values(source().get_completions("s", 1)), ["sudo", "svc"]);
    }

    #[test]
    fn argument_uses_spec() {
        let s = source();
        assert_eq!(values(s.get_completions("svc st", 6)), ["start", "stop", "status"]);
        assert_eq!(s.get_help("svc st", 6), "svc: start stop status");
        assert!(s.get_completions("unknown x", 9).is_empty());
    }

    #[test]
    fn builtin_lines_mutate_shared_registry() {
        let editor_side = source();
        let host_side = editor_side.clone();
        assert_eq!(host_side.run_builtin("complete -W 'up down' lift"), Some(Ok(String::new())));
        assert_eq!(values(editor_side.get_completions("lift d", 6)), ["down"]);
        assert_eq!(
            host_side.run_builtin("complete -p lift"),
            Some(Ok("complete -W 'up down' lift".into()))
        );
        assert!(host_side.run_builtin("echo hi").is_none());
        assert_eq!(
            host_side.run_builtin("compgen -W 'alpha beta album' al"),
            Some(Ok("alpha\nalbum".into()))
        );
    }

    #[test]
    fn chain_falls_through_empty_sources() {
        let empty = |_: &str, _: usize| Vec::<CompletionCandidate>::new();
        let fixed = |_: &str, _: usize| vec![CompletionCandidate::new("fallback")];
        let chain = ChainedSource::new()
            .push(Box::new(source().with_whole_line_prefixes(vec!["@!".into()])))
            .push(Box::new(empty))
            .push(Box::new(fixed));
        assert_eq!(values(chain.get_completions("svc st", 6)).len(), 3);
        assert_eq!(values(chain.get_completions("zzz q", 5)), ["fallback"]);
        assert_eq!(chain.whole_line_prefixes(), ["@!".to_string()]);
        assert_eq!(chain.len(), 3);
    }
}
