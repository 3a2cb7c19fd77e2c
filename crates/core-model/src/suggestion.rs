//! Ghost ("ambient") suggestion ranking.
//!
//! Among history commands that strictly extend the draft, the most frequent
//! wins; ties go to the most recent (lowest index in the newest-first list).
//! The returned slice is the remainder to draw dimmed after the cursor.

use core_history::HistoryItem;
use std::collections::HashMap;

pub fn rank_suggestion<'a>(draft: &str, history: &'a [HistoryItem]) -> Option<&'a str> {
    if draft.is_empty() {
        return None;
    }
    // command -> (count, first index)
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();
    for (i, item) in history.iter().enumerate() {
        let cmd = item.command.as_str();
        if cmd.len() > draft.len() && cmd.starts_with(draft) {
            tally.entry(cmd).or_insert((0, i)).0 += 1;
        }
    }
    let (best, _) = tally
        .into_iter()
        .max_by(|(_, (ca, ia)), (_, (cb, ib))| ca.cmp(cb).then(ib.cmp(ia)))?;
    Some(&best[draft.len()..])
}
