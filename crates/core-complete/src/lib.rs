//! Tab completion: candidate model, the injected source seam, and the engine.
//!
//! The engine never knows where candidates come from. Anything implementing
//! [`CompletionSource`] (a spec registry, a static table, a closure in tests)
//! can be handed to [`CompletionEngine::tab`].

pub mod engine;

pub use engine::{CompletionEngine, CompletionState, TabOutcome, extend_common_prefix};

/// One completion candidate.
///
/// `display` overrides `value` for rendering only. `suffix` is a decorative
/// tail (e.g. `/` after a directory) drawn after the highlighted candidate and
/// never inserted into the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub value: String,
    pub display: Option<String>,
    pub description: Option<String>,
    pub suffix: Option<String>,
}

impl CompletionCandidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let d = description.into();
        self.description = (!d.is_empty()).then_some(d);
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        let d = display.into();
        self.display = (!d.is_empty()).then_some(d);
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let s = suffix.into();
        self.suffix = (!s.is_empty()).then_some(s);
        self
    }

    /// Text shown in the completion box.
    pub fn label(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.value)
    }

    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Candidate provider consumed by the engine.
///
/// Implementations must be side-effect free from the editor's point of view
/// and return promptly; slow providers (external programs) enforce their own
/// timeout and degrade to an empty list.
pub trait CompletionSource {
    fn get_completions(&self, line: &str, cursor: usize) -> Vec<CompletionCandidate>;

    /// One-line help for the command under the cursor; empty means none.
    fn get_help(&self, _line: &str, _cursor: usize) -> String {
        String::new()
    }

    /// Two-character sigils that make the whole line, from column 0, the
    /// replaced token (`#!macro`, `@!builtin`).
    fn whole_line_prefixes(&self) -> &[String] {
        &[]
    }
}

impl<F> CompletionSource for F
where
    F: Fn(&str, usize) -> Vec<CompletionCandidate>,
{
    fn get_completions(&self, line: &str, cursor: usize) -> Vec<CompletionCandidate> {
        self(line, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_display() {
        let c = CompletionCandidate::new("checkout").with_display("checkout (branch)");
        assert_eq!(c.label(), "checkout (branch)");
        assert_eq!(CompletionCandidate::new("x").label(), "x");
    }

    #[test]
    fn empty_optional_fields_collapse_to_none() {
        let c = CompletionCandidate::new("x")
            .with_description("")
            .with_suffix("")
            .with_display("");
        assert_eq!(c, CompletionCandidate::new("x"));
        assert!(!c.has_description());
    }

    #[test]
    fn closures_are_sources() {
        let src = |line: &str, _cursor: usize| vec![CompletionCandidate::new(format!("{line}!"))];
        assert_eq!(src.get_completions("a", 1)[0].value, "a!");
        assert_eq!(src.get_help("a", 1), "");
        assert!(src.whole_line_prefixes().is_empty());
    }
}
