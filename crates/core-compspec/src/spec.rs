//! Completion specifications and the per-command registry.

use std::collections::HashMap;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKind {
    /// `-W`: whitespace separated word list.
    WordList,
    /// `-F`: shell function filling a reply array.
    Function,
    /// `-C`: external completer program.
    Command,
}

impl SpecKind {
    pub fn flag(self) -> &'static str {
        match self {
            SpecKind::WordList => "-W",
            SpecKind::Function => "-F",
            SpecKind::Command => "-C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSpec {
    pub command: String,
    pub kind: SpecKind,
    pub value: String,
    pub options: Vec<String>,
}

impl CompletionSpec {
    pub fn new(command: impl Into<String>, kind: SpecKind, value: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            kind,
            value: value.into(),
            options: Vec::new(),
        }
    }

    pub fn word_list(command: impl Into<String>, words: impl Into<String>) -> Self {
        Self::new(command, SpecKind::WordList, words)
    }

    pub fn function(command: impl Into<String>, function: impl Into<String>) -> Self {
        Self::new(command, SpecKind::Function, function)
    }

    pub fn external(command: impl Into<String>, program: impl Into<String>) -> Self {
        Self::new(command, SpecKind::Command, program)
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Short human summary used as completion help text.
    pub fn describe(&self) -> String {
        match self.kind {
            SpecKind::WordList => format!("{}: {}", self.command, self.value),
            SpecKind::Function => format!("{}: completed by function {}", self.command, self.value),
            SpecKind::Command => format!("{}: completed by `{}`", self.command, self.value),
        }
    }
}

/// Re-enterable `complete` form, as printed by `complete -p`.
impl fmt::Display for CompletionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("complete")?;
        for opt in &self.options {
            write!(f, " -o {}", shell_quote(opt))?;
        }
        write!(
            f,
            " {} {} {}",
            self.kind.flag(),
            shell_quote(&self.value),
            shell_quote(&self.command)
        )
    }
}

/// Quote `s` for re-entry: bare when it only holds safe characters, otherwise
/// single-quoted with embedded quotes written as `'\''`.
pub fn shell_quote(s: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "_-./:=@,+%".contains(c);
    if !s.is_empty() && s.chars().all(safe) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Mapping command name -> spec. Last write wins.
#[derive(Debug, Default, Clone)]
pub struct SpecRegistry {
    specs: HashMap<String, CompletionSpec>,
}

impl SpecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the spec previously registered for the command.
    pub fn add(&mut self, spec: CompletionSpec) -> Option<CompletionSpec> {
        debug!(target: "compspec.registry", command = %spec.command, kind = ?spec.kind, "add");
        self.specs.insert(spec.command.clone(), spec)
    }

    pub fn remove(&mut self, command: &str) -> Option<CompletionSpec> {
        let removed = self.specs.remove(command);
        debug!(target: "compspec.registry", command, found = removed.is_some(), "remove");
        removed
    }

    pub fn get(&self, command: &str) -> Option<&CompletionSpec> {
        self.specs.get(command)
    }

    /// All specs, in no particular order.
    pub fn list(&self) -> impl Iterator<Item = &CompletionSpec> {
        self.specs.values()
    }

    /// Registered command names starting with `prefix`, sorted.
    pub fn commands_with_prefix(&self, prefix: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .specs
            .keys()
            .map(String::as_str)
            .filter(|k| k.starts_with(prefix))
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
