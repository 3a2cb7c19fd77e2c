//! Reverse-incremental history search.
//!
//! The caller supplies an immutable, newest-first list of [`HistoryItem`]s and
//! the current directory when search mode is entered. Every query edit or
//! filter/sort toggle recomputes the match list:
//!
//! 1. Deduplicate by command text, keeping the first (newest) occurrence.
//! 2. Filter: `All`, `Directory` (item directory == current directory) or
//!    `Session` (no session tracking yet, behaves like `All`).
//! 3. Empty query: `Recent` and `Relevance` keep supplied order,
//!    `Alphabetical` sorts by command.
//! 4. Non-empty query: skim-style fuzzy subsequence match, non-matches dropped;
//!    `Relevance` orders by score (descending, stable), `Recent` by supplied
//!    index, `Alphabetical` by command.
//! 5. `selected` resets to 0.

pub mod window;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::time::SystemTime;
use tracing::{debug, trace};

pub use window::visible_window;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub command: String,
    pub directory: String,
    pub timestamp: SystemTime,
}

impl HistoryItem {
    pub fn new(command: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            directory: directory.into(),
            timestamp: SystemTime::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Directory,
    Session,
}

impl FilterMode {
    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Directory,
            FilterMode::Directory => FilterMode::Session,
            FilterMode::Session => FilterMode::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Directory => "directory",
            FilterMode::Session => "session",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Recent,
    Relevance,
    Alphabetical,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Recent => SortMode::Relevance,
            SortMode::Relevance => SortMode::Alphabetical,
            SortMode::Alphabetical => SortMode::Recent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Recent => "recent",
            SortMode::Relevance => "relevance",
            SortMode::Alphabetical => "alphabetical",
        }
    }
}

/// One row of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMatch {
    /// Index into the supplied item list.
    pub index: usize,
    pub score: i64,
    /// Char indices of the command matched by the query (for highlighting).
    pub positions: Vec<usize>,
}

pub struct HistorySearch {
    items: Vec<HistoryItem>,
    current_directory: String,
    query: String,
    filter: FilterMode,
    sort: SortMode,
    matches: Vec<HistoryMatch>,
    selected: usize,
    active: bool,
    matcher: SkimMatcherV2,
}

impl fmt::Debug for HistorySearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistorySearch")
            .field("items", &self.items.len())
            .field("query_len", &self.query.chars().count())
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("matches", &self.matches.len())
            .field("selected", &self.selected)
            .field("active", &self.active)
            .finish()
    }
}

impl Default for HistorySearch {
    fn default() -> Self {
        Self::new(FilterMode::default(), SortMode::default())
    }
}

impl HistorySearch {
    pub fn new(filter: FilterMode, sort: SortMode) -> Self {
        Self {
            items: Vec::new(),
            current_directory: String::new(),
            query: String::new(),
            filter,
            sort,
            matches: Vec::new(),
            selected: 0,
            active: false,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Enter search mode over a fresh snapshot. The query starts empty.
    pub fn enter(&mut self, items: Vec<HistoryItem>, current_directory: impl Into<String>) {
        self.items = items;
        self.current_directory = current_directory.into();
        self.query.clear();
        self.active = true;
        self.recompute();
        debug!(target: "history.search", items = self.items.len(), "enter");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn matches(&self) -> &[HistoryMatch] {
        &self.matches
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn item(&self, m: &HistoryMatch) -> Option<&HistoryItem> {
        self.items.get(m.index)
    }

    /// Command text of the selected row.
    pub fn selected_command(&self) -> Option<&str> {
        let m = self.matches.get(self.selected)?;
        self.items.get(m.index).map(|i| i.command.as_str())
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.recompute();
    }

    pub fn pop_char(&mut self) -> bool {
        let popped = self.query.pop().is_some();
        if popped {
            self.recompute();
        }
        popped
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.recompute();
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn cycle_sort(&mut self) {
        self.set_sort(self.sort.next());
    }

    pub fn move_up(&mut self) -> bool {
        if self.selected == 0 {
            return false;
        }
        self.selected -= 1;
        true
    }

    pub fn move_down(&mut self) -> bool {
        if self.selected + 1 >= self.matches.len() {
            return false;
        }
        self.selected += 1;
        true
    }

    /// Leave search mode, returning the selected command if any matched.
    pub fn accept(&mut self) -> Option<String> {
        let chosen = self.selected_command().map(str::to_string);
        debug!(target: "history.search", accepted = chosen.is_some(), "accept");
        self.exit();
        chosen
    }

    /// Leave search mode without a result.
    pub fn cancel(&mut self) {
        debug!(target: "history.search", "cancel");
        self.exit();
    }

    fn exit(&mut self) {
        self.active = false;
        self.query.clear();
        self.matches.clear();
        self.selected = 0;
    }

    /// Visible row range for a box of `height` rows.
    pub fn window(&self, height: usize) -> std::ops::Range<usize> {
        visible_window(self.matches.len(), self.selected, height)
    }

    fn candidates(&self) -> Vec<usize> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| seen.insert(item.command.as_str()))
            .filter(|(_, item)| match self.filter {
                FilterMode::All | FilterMode::Session => true,
                FilterMode::Directory => item.directory == self.current_directory,
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub fn recompute(&mut self) {
        let candidates = self.candidates();
        let mut matches: Vec<HistoryMatch> = if self.query.is_empty() {
            candidates
                .into_iter()
                .map(|index| HistoryMatch {
                    index,
                    score: 0,
                    positions: Vec::new(),
                })
                .collect()
        } else {
            candidates
                .into_iter()
                .filter_map(|index| {
                    let (score, positions) = self
                        .matcher
                        .fuzzy_indices(&self.items[index].command, &self.query)?;
                    Some(HistoryMatch {
                        index,
                        score,
                        positions,
                    })
                })
                .collect()
        };

        match (self.sort, self.query.is_empty()) {
            (SortMode::Alphabetical, _) => {
                let items = &self.items;
                matches.sort_by(|a, b| items[a.index].command.cmp(&items[b.index].command));
            }
            (SortMode::Relevance, false) => matches.sort_by(|a, b| b.score.cmp(&a.score)),
            (SortMode::Recent, false) => matches.sort_by_key(|m| m.index),
            (_, true) => {}
        }

        self.matches = matches;
        self.selected = 0;
        trace!(
            target: "history.search",
            query_len = self.query.chars().count(),
            filter = self.filter.label(),
            sort = self.sort.label(),
            matches = self.matches.len(),
            "recompute"
        );
    }
}
