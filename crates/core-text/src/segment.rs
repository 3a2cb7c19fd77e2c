//! Normalization of text entering the single-line draft.
//!
//! Contract:
//! - Input: raw `&str` (typed commit, bracketed paste, history recall).
//! - Output: NFC-normalized text with line breaks and tabs folded to a single
//!   space and other control characters dropped, so the draft never holds a
//!   rune the renderer cannot place on one line.
//! - Safety: does not log content; callers log lengths only.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for insertion into a single-line buffer.
///
/// `\r\n`, `\n`, `\r` and `\t` each become one space; remaining control
/// characters are removed.
pub fn normalize_single_line(input: &str) -> String {
    let folded = input.replace("\r\n", "\n");
    folded
        .nfc()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
