//! Whitespace-delimited word boundary scanning over rune slices.
//!
//! A "word" is a maximal run of non-whitespace runes. All functions take a
//! rune offset and return a rune offset; offsets past the end are clamped so
//! callers never need to pre-validate.

/// Unicode whitespace test used for every word boundary decision.
#[inline]
pub fn is_space(c: char) -> bool {
    c.is_whitespace()
}

/// Start of the word before `pos`: skip whitespace backward, then the word itself.
/// Used by delete-word-before and move-word-backward.
pub fn word_start_before(text: &[char], pos: usize) -> usize {
    let mut i = pos.min(text.len());
    while i > 0 && is_space(text[i - 1]) {
        i -= 1;
    }
    while i > 0 && !is_space(text[i - 1]) {
        i -= 1;
    }
    i
}

/// End of the word after `pos`: skip whitespace forward, then the word itself.
/// Used by delete-word-after and move-word-forward.
pub fn word_end_after(text: &[char], pos: usize) -> usize {
    let len = text.len();
    let mut i = pos.min(len);
    while i < len && is_space(text[i]) {
        i += 1;
    }
    while i < len && !is_space(text[i]) {
        i += 1;
    }
    i
}

/// Bounds `[start, end)` of the non-whitespace token touching `pos`.
///
/// Scans backward and forward from the cursor over non-whitespace only, so a
/// cursor sitting right after a space yields an empty span at `pos`.
pub fn token_bounds(text: &[char], pos: usize) -> (usize, usize) {
    let len = text.len();
    let pos = pos.min(len);
    let mut start = pos;
    while start > 0 && !is_space(text[start - 1]) {
        start -= 1;
    }
    let mut end = pos;
    while end < len && !is_space(text[end]) {
        end += 1;
    }
    (start, end)
}

/// Start of the phrase made of the word preceding `word_start` plus the
/// whitespace run separating them. Returns `None` when no such word exists
/// (token already at line start, or only whitespace before it).
pub fn preceding_word_start(text: &[char], word_start: usize) -> Option<usize> {
    let mut i = word_start.min(text.len());
    if i == 0 || !is_space(text[i - 1]) {
        return None;
    }
    while i > 0 && is_space(text[i - 1]) {
        i -= 1;
    }
    if i == 0 {
        return None;
    }
    while i > 0 && !is_space(text[i - 1]) {
        i -= 1;
    }
    Some(i)
}
