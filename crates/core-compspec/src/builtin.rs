//! `complete` / `compgen` textual surface.
//!
//! Mirrors the bash builtins closely enough for configuration files and
//! interactive use:
//!
//! ```text
//! complete [-o opt]... -W words | -F function | -C command  name...
//! complete -p [name...]
//! complete -r name...
//! compgen  -W words | -F function | -C command  [word]
//! ```
//!
//! Parsing is pure; [`run_builtin`] applies a parsed command to a registry and
//! returns the text the builtin prints. Errors are descriptive strings for
//! the user and never touch editor state.

use crate::context::CompletionContext;
use crate::eval::{ReplyFilter, SpecEvaluator};
use crate::spec::{CompletionSpec, SpecKind, SpecRegistry};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("{builtin}: {flag}: option requires an argument")]
    MissingOperand { builtin: &'static str, flag: String },
    #[error("{builtin}: {flag}: invalid option")]
    UnknownFlag { builtin: &'static str, flag: String },
    #[error("complete: missing command name")]
    MissingCommand,
    #[error("{builtin}: no completion action (-W, -F or -C) given")]
    MissingAction { builtin: &'static str },
    #[error("complete: {0}: no completion specification")]
    NotFound(String),
    #[error("{builtin}: unterminated quote")]
    UnterminatedQuote { builtin: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompleteCommand {
    /// One spec per named command (same action and options).
    Register(Vec<CompletionSpec>),
    /// `-p`: print named specs, or every spec when empty.
    Print(Vec<String>),
    /// `-r`: remove named specs.
    Remove(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompgenCommand {
    pub kind: SpecKind,
    pub value: String,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Builtin {
    Complete(CompleteCommand),
    Compgen(CompgenCommand),
}

/// Split a command line into words, honoring single quotes, double quotes
/// and backslash escapes.
pub fn split_words(line: &str, builtin: &'static str) -> Result<Vec<String>, SpecError> {
    #[derive(PartialEq)]
    enum Quote {
        None,
        Single,
        Double,
    }
    let mut words = Vec::new();
    let mut cur = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => match c {
                '\'' => quote = Quote::None,
                _ => cur.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.next() {
                    Some(n @ ('"' | '\\' | '$' | '`')) => cur.push(n),
                    Some(n) => {
                        cur.push('\\');
                        cur.push(n);
                    }
                    None => return Err(SpecError::UnterminatedQuote { builtin }),
                },
                _ => cur.push(c),
            },
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                }
                '\\' => {
                    if let Some(n) = chars.next() {
                        cur.push(n);
                    }
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut cur));
                        in_word = false;
                    }
                }
                c => {
                    cur.push(c);
                    in_word = true;
                }
            },
        }
    }
    if quote != Quote::None {
        return Err(SpecError::UnterminatedQuote { builtin });
    }
    if in_word {
        words.push(cur);
    }
    Ok(words)
}

fn operand(
    words: &mut std::slice::Iter<'_, String>,
    builtin: &'static str,
    flag: &str,
) -> Result<String, SpecError> {
    words.next().cloned().ok_or_else(|| SpecError::MissingOperand {
        builtin,
        flag: flag.to_string(),
    })
}

fn action_flag(flag: &str) -> Option<SpecKind> {
    match flag {
        "-W" => Some(SpecKind::WordList),
        "-F" => Some(SpecKind::Function),
        "-C" => Some(SpecKind::Command),
        _ => None,
    }
}

/// Parse `complete` arguments (the words after the builtin name).
pub fn parse_complete(args: &[String]) -> Result<CompleteCommand, SpecError> {
    const B: &str = "complete";
    let mut words = args.iter();
    let mut action: Option<(SpecKind, String)> = None;
    let mut options = Vec::new();
    let mut print = false;
    let mut remove = false;
    let mut names = Vec::new();

    while let Some(w) = words.next() {
        if !names.is_empty() || !w.starts_with('-') || w == "-" {
            names.push(w.clone());
            continue;
        }
        if w == "--" {
            names.extend(words.by_ref().cloned());
            break;
        }
        if let Some(kind) = action_flag(w) {
            action = Some((kind, operand(&mut words, B, w)?));
            continue;
        }
        match w.as_str() {
            "-o" => options.push(operand(&mut words, B, w)?),
            "-p" => print = true,
            "-r" => remove = true,
            _ => {
                return Err(SpecError::UnknownFlag {
                    builtin: B,
                    flag: w.clone(),
                });
            }
        }
    }

    if remove {
        if names.is_empty() {
            return Err(SpecError::MissingCommand);
        }
        return Ok(CompleteCommand::Remove(names));
    }
    if print || (action.is_none() && names.is_empty()) {
        return Ok(CompleteCommand::Print(names));
    }
    let Some((kind, value)) = action else {
        return Err(SpecError::MissingAction { builtin: B });
    };
    if names.is_empty() {
        return Err(SpecError::MissingCommand);
    }
    Ok(CompleteCommand::Register(
        names
            .into_iter()
            .map(|command| CompletionSpec {
                command,
                kind,
                value: value.clone(),
                options: options.clone(),
            })
            .collect(),
    ))
}

/// Parse `compgen` arguments (the words after the builtin name).
pub fn parse_compgen(args: &[String]) -> Result<CompgenCommand, SpecError> {
    const B: &str = "compgen";
    let mut words = args.iter();
    let mut action: Option<(SpecKind, String)> = None;
    let mut word = None;
    while let Some(w) = words.next() {
        if let Some(kind) = action_flag(w) {
            action = Some((kind, operand(&mut words, B, w)?));
        } else if w.starts_with('-') && w != "-" && word.is_none() {
            return Err(SpecError::UnknownFlag {
                builtin: B,
                flag: w.clone(),
            });
        } else {
            word = Some(w.clone());
        }
    }
    let (kind, value) = action.ok_or(SpecError::MissingAction { builtin: B })?;
    Ok(CompgenCommand {
        kind,
        value,
        word: word.unwrap_or_default(),
    })
}

/// Recognize a `complete` or `compgen` line. `Ok(None)` means the line is
/// some other command.
pub fn parse_builtin(line: &str) -> Result<Option<Builtin>, SpecError> {
    let trimmed = line.trim_start();
    let name = trimmed.split_whitespace().next().unwrap_or_default();
    let builtin: &'static str = match name {
        "complete" => "complete",
        "compgen" => "compgen",
        _ => return Ok(None),
    };
    let words = split_words(trimmed, builtin)?;
    let args = &words[1..];
    Ok(Some(match builtin {
        "complete" => Builtin::Complete(parse_complete(args)?),
        _ => Builtin::Compgen(parse_compgen(args)?),
    }))
}

/// Apply a `complete` command; returns the text it prints (possibly empty).
pub fn apply_complete(
    registry: &mut SpecRegistry,
    cmd: CompleteCommand,
) -> Result<String, SpecError> {
    match cmd {
        CompleteCommand::Register(specs) => {
            for spec in specs {
                registry.add(spec);
            }
            Ok(String::new())
        }
        CompleteCommand::Remove(names) => {
            for name in &names {
                if registry.remove(name).is_none() {
                    return Err(SpecError::NotFound(name.clone()));
                }
            }
            Ok(String::new())
        }
        CompleteCommand::Print(names) if names.is_empty() => {
            let mut specs: Vec<&CompletionSpec> = registry.list().collect();
            specs.sort_by(|a, b| a.command.cmp(&b.command));
            Ok(specs.iter().map(|s| s.to_string()).collect::<Vec<_>>().join("\n"))
        }
        CompleteCommand::Print(names) => {
            let mut lines = Vec::with_capacity(names.len());
            for name in &names {
                let spec = registry
                    .get(name)
                    .ok_or_else(|| SpecError::NotFound(name.clone()))?;
                lines.push(spec.to_string());
            }
            Ok(lines.join("\n"))
        }
    }
}

/// Run `compgen`: one candidate value per output line. Word lists and
/// function replies are filtered by the word; external output is taken as is.
pub fn run_compgen(evaluator: &SpecEvaluator, cmd: &CompgenCommand) -> String {
    let spec = CompletionSpec::new("", cmd.kind, cmd.value.clone());
    let ctx = CompletionContext::for_word(&cmd.word);
    evaluator
        .evaluate(&spec, &ctx, ReplyFilter::CurrentWord)
        .into_iter()
        .map(|c| c.value)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse and execute a builtin line. `None` when the line is not a builtin.
pub fn run_builtin(
    registry: &mut SpecRegistry,
    evaluator: &SpecEvaluator,
    line: &str,
) -> Option<Result<String, SpecError>> {
    let parsed = match parse_builtin(line) {
        Ok(None) => return None,
        Ok(Some(b)) => b,
        Err(e) => return Some(Err(e)),
    };
    let name = match &parsed {
        Builtin::Complete(_) => "complete",
        Builtin::Compgen(_) => "compgen",
    };
    debug!(target: "compspec.registry", builtin = name, "run_builtin");
    Some(match parsed {
        Builtin::Complete(cmd) => apply_complete(registry, cmd),
        Builtin::Compgen(cmd) => Ok(run_compgen(evaluator, &cmd)),
    })
}
