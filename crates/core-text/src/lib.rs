//! Rune-level text primitives shared by every editing component.
//!
//! The line editor addresses its draft in *runes* (Unicode scalar values,
//! `char` in Rust), never bytes. Cursor offsets, completion spans and kill
//! spans are all rune offsets, so multi-byte input (accents, CJK, emoji)
//! cannot split a code point. Helpers here convert between `&str` and rune
//! slices and clamp offsets rather than panic.
//!
//! Submodules:
//! * `words`   - whitespace-delimited word boundary scanning.
//! * `width`   - terminal display width of grapheme clusters.
//! * `segment` - NFC normalization of inserted/pasted text.

pub mod segment;
pub mod width;
pub mod words;

pub use width::{display_width, egc_width, truncate_to_width};
pub use words::is_space;

/// Collect a string into an owned rune vector.
pub fn to_runes(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Collect a rune slice back into a `String`.
pub fn runes_to_string(runes: &[char]) -> String {
    runes.iter().collect()
}

/// Number of runes in `s`.
pub fn rune_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of rune index `idx` in `s`, clamped to `s.len()`.
pub fn byte_offset(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map(|(b, _)| b).unwrap_or(s.len())
}

/// Substring by rune range `[start, end)`. Out-of-range bounds are clamped and an
/// inverted range yields an empty string.
pub fn rune_slice(s: &str, start: usize, end: usize) -> &str {
    let a = byte_offset(s, start);
    let b = byte_offset(s, end);
    if a >= b { "" } else { &s[a..b] }
}

/// Longest common rune prefix across `values`. Stops at the first divergent rune
/// or at the shortest value. Empty input yields an empty prefix.
pub fn common_prefix<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut iter = values.into_iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let mut prefix: Vec<char> = first.chars().collect();
    for v in iter {
        let shared = prefix
            .iter()
            .zip(v.chars())
            .take_while(|(a, b)| **a == *b)
            .count();
        prefix.truncate(shared);
        if prefix.is_empty() {
            break;
        }
    }
    runes_to_string(&prefix)
}
