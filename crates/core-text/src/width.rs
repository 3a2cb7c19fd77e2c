//! Terminal display width of grapheme clusters.
//!
//! Completion boxes and the history search box align columns by visual
//! width, so every width decision goes through `egc_width`. The classifier
//! favors over-estimating emoji sequences: an extra blank cell is harmless,
//! an under-estimate shifts every following column.
//!
//! Precedence:
//! 1. Structural classification (keycap, flag, ZWJ, skin tone, combining).
//! 2. `unicode_width` for single scalars.
//! 3. Widen fallback when a pictographic signal is present but width == 1.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EgcKind {
    Narrow,
    Wide,
    Emoji,
    Combining { wide_base: bool },
    Control,
}

const ZWJ: char = '\u{200D}';
const KEYCAP_COMBINING: char = '\u{20E3}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_skin_tone_modifier(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

// Rough Extended Pictographic heuristic (main emoji blocks + legacy dingbats).
fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

fn scalar_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

fn classify(egc: &str) -> EgcKind {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return EgcKind::Control;
    };
    if chars.next().is_none() {
        if first.is_control() {
            return EgcKind::Control;
        }
        if is_extended_pictographic(first) {
            return EgcKind::Emoji;
        }
        return if scalar_width(first) == 2 {
            EgcKind::Wide
        } else {
            EgcKind::Narrow
        };
    }

    let mut pictographic = 0usize;
    let mut regional = 0usize;
    let mut has_zwj = false;
    let mut has_skin = false;
    let mut has_combining = false;
    let mut keycap = false;
    for c in egc.chars() {
        pictographic += usize::from(is_extended_pictographic(c));
        regional += usize::from(is_regional_indicator(c));
        has_zwj |= c == ZWJ;
        has_skin |= is_skin_tone_modifier(c);
        has_combining |= is_combining_mark(c);
        keycap |= c == KEYCAP_COMBINING;
    }

    if keycap || regional == 2 || (has_zwj && pictographic >= 2) || has_skin || pictographic > 0 {
        return EgcKind::Emoji;
    }
    if has_combining {
        return EgcKind::Combining {
            wide_base: scalar_width(first) == 2,
        };
    }
    if egc.chars().any(|c| scalar_width(c) == 2) {
        EgcKind::Wide
    } else {
        EgcKind::Narrow
    }
}

/// Display width (terminal cells) of a single grapheme cluster.
pub fn egc_width(egc: &str) -> u16 {
    let width = match classify(egc) {
        EgcKind::Control => 0,
        EgcKind::Narrow => 1,
        EgcKind::Wide | EgcKind::Emoji => 2,
        EgcKind::Combining { wide_base } => {
            if wide_base {
                2
            } else {
                1
            }
        }
    };
    if width == 1 && egc.chars().any(|c| is_extended_pictographic(c) || is_regional_indicator(c)) {
        return 2;
    }
    width
}

/// Display width of an arbitrary string (sum over grapheme clusters).
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(|g| egc_width(g) as usize).sum()
}

/// Truncate `s` so it occupies at most `max` cells. A trailing `…` marks
/// truncation when there is room for it.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1;
    let mut out = String::new();
    let mut used = 0usize;
    for g in s.graphemes(true) {
        let w = egc_width(g) as usize;
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_cjk() {
        assert_eq!(egc_width("a"), 1);
        assert_eq!(egc_width("漢"), 2);
        assert_eq!(display_width("ab漢字"), 6);
    }

    #[test]
    fn emoji_sequences_are_wide() {
        assert_eq!(egc_width("😀"), 2);
        assert_eq!(egc_width("👍🏽"), 2);
        assert_eq!(egc_width("🇯🇵"), 2);
        assert_eq!(egc_width("1️⃣"), 2);
        assert_eq!(egc_width("👨‍👩‍👧"), 2);
    }

    #[test]
    fn combining_mark_stays_narrow() {
        assert_eq!(egc_width("e\u{0301}"), 1);
    }

    #[test]
    fn truncate_marks_with_ellipsis() {
        assert_eq!(truncate_to_width("checkout", 20), "checkout");
        assert_eq!(truncate_to_width("checkout", 5), "chec…");
        assert_eq!(truncate_to_width("漢字漢字", 5), "漢字…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
