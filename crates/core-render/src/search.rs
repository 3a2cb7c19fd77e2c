//! Reverse-search prompt line and paginated result box.

use core_history::HistorySearch;

/// `(reverse-i-search)[all/recent]`query': selected-command`
pub fn search_prompt(search: &HistorySearch) -> String {
    format!(
        "(reverse-i-search)[{}/{}]`{}': {}",
        search.filter().label(),
        search.sort().label(),
        search.query(),
        search.selected_command().unwrap_or_default()
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRow {
    pub command: String,
    pub directory: String,
    /// Char indices of `command` matched by the query.
    pub positions: Vec<usize>,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBoxView {
    pub rows: Vec<SearchRow>,
    /// Total matches, for a "n/total" indicator.
    pub total: usize,
    /// Index of the first visible match.
    pub offset: usize,
}

pub fn search_box(search: &HistorySearch, height: usize) -> SearchBoxView {
    if !search.is_active() {
        return SearchBoxView::default();
    }
    let window = search.window(height);
    let offset = window.start;
    let matches = search.matches();
    let rows = matches[window]
        .iter()
        .enumerate()
        .filter_map(|(i, m)| {
            let item = search.item(m)?;
            Some(SearchRow {
                command: item.command.clone(),
                directory: item.directory.clone(),
                positions: m.positions.clone(),
                selected: offset + i == search.selected(),
            })
        })
        .collect();
    SearchBoxView {
        rows,
        total: matches.len(),
        offset,
    }
}
