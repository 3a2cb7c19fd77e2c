use core_complete::{
    CompletionCandidate, CompletionEngine, CompletionSource, TabOutcome, extend_common_prefix,
};
use core_state::InputBuffer;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

struct Fixed {
    values: Vec<String>,
    prefixes: Vec<String>,
}

impl Fixed {
    fn new(values: &[&str]) -> Self {
        Self {
            values: values.iter().map(|s| s.to_string()).collect(),
            prefixes: Vec::new(),
        }
    }

    fn whole_line(mut self, prefixes: &[&str]) -> Self {
        self.prefixes = prefixes.iter().map(|s| s.to_string()).collect();
        self
    }
}

impl CompletionSource for Fixed {
    fn get_completions(&self, _line: &str, _cursor: usize) -> Vec<CompletionCandidate> {
        self.values.iter().map(CompletionCandidate::new).collect()
    }

    fn whole_line_prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

fn buffer(text: &str) -> InputBuffer {
    let mut b = InputBuffer::new();
    b.set_value(text);
    b
}

#[test]
fn shared_prefix_equal_to_typed_text_selects_first_and_cycles() {
    let src = Fixed::new(&["git", "gist", "give"]);
    let mut e = CompletionEngine::new();
    let mut b = buffer("gi");

    assert_eq!(e.tab(&mut b, &src), TabOutcome::Selected(0));
    assert_eq!(b.value(), "git");
    assert!(e.info_box_visible());
    e.tab(&mut b, &src);
    assert_eq!(b.value(), "gist");
    e.tab(&mut b, &src);
    assert_eq!(b.value(), "give");
    e.tab(&mut b, &src);
    assert_eq!(b.value(), "git");
}

#[test]
fn phrase_candidates_widen_span_to_line_start() {
    let src = Fixed::new(&["git checkout", "git cherry-pick"]);
    let mut e = CompletionEngine::new();
    let mut b = buffer("git ch");

    assert_eq!(e.tab(&mut b, &src), TabOutcome::Extended);
    assert_eq!(b.value(), "git che");
    assert_eq!(e.state().start, 0);
    assert_eq!(e.selected(), None);

    assert_eq!(e.tab(&mut b, &src), TabOutcome::Selected(0));
    assert_eq!(b.value(), "git checkout");
    e.tab(&mut b, &src);
    assert_eq!(b.value(), "git cherry-pick");
}

#[test]
fn phrase_widening_leaves_earlier_arguments_alone() {
    let src = Fixed::new(&["some/path.txt", "some/path two.txt"]);
    let mut e = CompletionEngine::new();
    let mut b = buffer("cat -n some/pa");

    e.tab(&mut b, &src);
    assert_eq!(e.state().start, 7);
    assert_eq!(b.value(), "cat -n some/path");
}

#[test]
fn phrase_widening_skipped_when_first_candidate_disagrees() {
    let src = Fixed::new(&["pa one", "pa two"]);
    let mut e = CompletionEngine::new();
    let mut b = buffer("cat pa");

    e.tab(&mut b, &src);
    assert_eq!(e.state().start, 4);
    assert_eq!(b.value(), "cat pa ");
}

#[test]
fn whole_line_sigil_cycles_without_text_retention() {
    let src = Fixed::new(&["@!short", "@!longer_completion"]).whole_line(&["#!", "@!"]);
    let mut e = CompletionEngine::new();
    let mut b = buffer("@!");

    e.tab(&mut b, &src);
    assert_eq!(b.value(), "@!short");
    e.tab(&mut b, &src);
    assert_eq!(b.value(), "@!longer_completion");
    e.tab(&mut b, &src);
    assert_eq!(b.value(), "@!short");
    assert_eq!(b.cursor(), 7);
}

#[test]
fn whole_line_sigil_replaces_from_column_zero() {
    let src = Fixed::new(&["#!deploy prod"]).whole_line(&["#!"]);
    let mut e = CompletionEngine::new();
    let mut b = buffer("#!deploy pr");

    e.tab(&mut b, &src);
    assert_eq!(b.value(), "#!deploy prod");
}

#[test]
fn cycling_keeps_text_after_span() {
    let src = Fixed::new(&["a", "abcdef", "ab"]);
    let mut e = CompletionEngine::new();
    let mut b = buffer("x  tail");
    b.set_cursor(2);

    // First press extends to the shared "a", then cycling starts at index 0.
    for expected in ["x a tail", "x a tail", "x abcdef tail", "x ab tail", "x a tail"] {
        e.tab(&mut b, &src);
        assert_eq!(b.value(), expected);
    }
}

#[test]
fn common_prefix_extension_is_idempotent() {
    let cands: Vec<_> = ["checkout", "cherry-pick"]
        .into_iter()
        .map(CompletionCandidate::new)
        .collect();
    let once = extend_common_prefix("c", &cands).unwrap();
    assert_eq!(once, "che");
    assert_eq!(extend_common_prefix(&once, &cands), None);
}

proptest! {
    #[test]
    fn no_stale_characters_after_any_tab_sequence(
        values in proptest::collection::vec("[a-z]{1,12}", 2..6),
        presses in 1usize..12,
        back in proptest::collection::vec(any::<bool>(), 12),
    ) {
        let src = Fixed::new(&values.iter().map(String::as_str).collect::<Vec<_>>());
        let mut e = CompletionEngine::new();
        let mut b = buffer("cmd  --flag");
        b.set_cursor(4);

        e.tab(&mut b, &src);
        let start = e.state().start;
        for &shift in back.iter().take(presses) {
            if shift {
                e.back_tab(&mut b, &src);
            } else {
                e.tab(&mut b, &src);
            }
            let i = e.selected().unwrap();
            prop_assert_eq!(e.state().start, start);
            prop_assert_eq!(b.value(), format!("cmd {} --flag", values[i]));
        }
    }
}
