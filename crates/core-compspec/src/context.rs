//! The word context a spec is evaluated against.

use core_text::{rune_len, rune_slice};

/// Words of `line[..cursor]` plus the raw line and cursor (rune offset).
///
/// `args[0]` is the command name and the last element is the word under
/// the cursor, which is empty when the cursor follows whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    pub args: Vec<String>,
    pub line: String,
    pub cursor: usize,
}

impl CompletionContext {
    pub fn from_line(line: &str, cursor: usize) -> Self {
        let before = rune_slice(line, 0, cursor);
        let mut args: Vec<String> = before.split_whitespace().map(str::to_string).collect();
        if before.is_empty() || before.ends_with(char::is_whitespace) {
            args.push(String::new());
        }
        Self {
            args,
            line: line.to_string(),
            cursor,
        }
    }

    /// Context for a bare word, as `compgen` evaluates it.
    pub fn for_word(word: &str) -> Self {
        Self {
            args: vec![String::new(), word.to_string()],
            line: word.to_string(),
            cursor: rune_len(word),
        }
    }

    pub fn command(&self) -> &str {
        self.args.first().map_or("", String::as_str)
    }

    pub fn current_word(&self) -> &str {
        self.args.last().map_or("", String::as_str)
    }

    pub fn previous_word(&self) -> &str {
        match self.args.len() {
            n if n >= 2 => &self.args[n - 2],
            _ => "",
        }
    }

    /// True while the cursor is still inside the command name.
    pub fn completing_command(&self) -> bool {
        self.args.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_before_cursor() {
        let ctx = CompletionContext::from_line("git checkout ma extra", 15);
        assert_eq!(ctx.args, vec!["git", "checkout", "ma"]);
        assert_eq!(ctx.command(), "git");
        assert_eq!(ctx.current_word(), "ma");
        assert_eq!(ctx.previous_word(), "checkout");
    }

    #[test]
    fn trailing_space_starts_empty_word() {
        let ctx = CompletionContext::from_line("svc ", 4);
        assert_eq!(ctx.args, vec!["svc", ""]);
        assert_eq!(ctx.current_word(), "");
        assert_eq!(ctx.previous_word(), "svc");
        assert!(!ctx.completing_command());
    }

    #[test]
    fn command_position() {
        let ctx = CompletionContext::from_line("gi", 2);
        assert!(ctx.completing_command());
        assert_eq!(ctx.previous_word(), "");
        assert!(CompletionContext::from_line("", 0).completing_command());
    }

    #[test]
    fn cursor_is_in_runes() {
        let ctx = CompletionContext::from_line("cat café.txt", 8);
        assert_eq!(ctx.current_word(), "café");
    }
}
