//! Parsing of external completer stdout into candidates.
//!
//! Completer programs in the wild print plain words, `value<TAB>description`,
//! `value:description`, JSON string arrays or JSON object arrays, and some
//! mix formats line by line. Parsing is an ordered list of attempts, each
//! `fn(&str) -> Option<Vec<CompletionCandidate>>`, short-circuiting on the
//! first `Some`. A line that fails every JSON attempt degrades to a plain
//! value; nothing here fails the whole batch.

use core_complete::CompletionCandidate;
use serde::Deserialize;
use serde_json::Value;

type Attempt = fn(&str) -> Option<Vec<CompletionCandidate>>;

/// Attempts on the whole trimmed output.
const WHOLE_OUTPUT: &[Attempt] = &[json_string_array, json_object_array];

/// Attempts on a single line starting with `{` or `[`.
const JSON_LINE: &[Attempt] = &[json_object, json_object_array, json_string_array];

#[derive(Debug, Deserialize)]
struct WireCandidate {
    #[serde(rename = "Value", alias = "value")]
    value: String,
    #[serde(rename = "Display", alias = "display", default)]
    display: Option<String>,
    #[serde(rename = "Description", alias = "description", default)]
    description: Option<String>,
    #[serde(rename = "Suffix", alias = "suffix", default)]
    suffix: Option<String>,
}

impl From<WireCandidate> for CompletionCandidate {
    fn from(w: WireCandidate) -> Self {
        let mut c = CompletionCandidate::new(w.value);
        if let Some(d) = w.display {
            c = c.with_display(d);
        }
        if let Some(d) = w.description {
            c = c.with_description(d);
        }
        if let Some(s) = w.suffix {
            c = c.with_suffix(s);
        }
        c
    }
}

fn json_string_array(s: &str) -> Option<Vec<CompletionCandidate>> {
    let values: Vec<String> = serde_json::from_str(s).ok()?;
    Some(values.into_iter().map(CompletionCandidate::new).collect())
}

/// Only a JSON object converts; the derive would also take an array as a
/// positional field list.
fn wire_object(value: Value) -> Option<CompletionCandidate> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value::<WireCandidate>(value).ok().map(Into::into)
}

fn json_object_array(s: &str) -> Option<Vec<CompletionCandidate>> {
    let Value::Array(items) = serde_json::from_str(s).ok()? else {
        return None;
    };
    items.into_iter().map(wire_object).collect()
}

fn json_object(s: &str) -> Option<Vec<CompletionCandidate>> {
    let value: Value = serde_json::from_str(s).ok()?;
    Some(vec![wire_object(value)?])
}

fn first_success(attempts: &[Attempt], input: &str) -> Option<Vec<CompletionCandidate>> {
    attempts.iter().find_map(|attempt| attempt(input))
}

fn split_pair(line: &str, sep: char) -> Option<CompletionCandidate> {
    let (value, description) = line.split_once(sep)?;
    Some(CompletionCandidate::new(value.trim()).with_description(description.trim()))
}

/// Parse a single non-blank line.
pub fn parse_line(line: &str) -> Vec<CompletionCandidate> {
    let line = line.trim();
    if line.starts_with('{') || line.starts_with('[') {
        return first_success(JSON_LINE, line)
            .unwrap_or_else(|| vec![CompletionCandidate::new(line)]);
    }
    split_pair(line, '\t')
        .or_else(|| split_pair(line, ':'))
        .map_or_else(|| vec![CompletionCandidate::new(line)], |c| vec![c])
}

/// Parse a completer's complete stdout. Candidates with an empty value are dropped.
pub fn parse_output(stdout: &str) -> Vec<CompletionCandidate> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let parsed = first_success(WHOLE_OUTPUT, trimmed).unwrap_or_else(|| {
        trimmed
            .lines()
            .filter(|l| !l.trim().is_empty())
            .flat_map(parse_line)
            .collect()
    });
    parsed.into_iter().filter(|c| !c.value.is_empty()).collect()
}
