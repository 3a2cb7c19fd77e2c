//! Pagination of the result list for a fixed-height box.

use std::ops::Range;

/// Rows to show for `total` results with `selected` highlighted in a box of
/// `height` rows. Everything fits: all rows. Otherwise the selected row is
/// centered and the window is clamped to both ends of the list.
pub fn visible_window(total: usize, selected: usize, height: usize) -> Range<usize> {
    if height == 0 || total == 0 {
        return 0..0;
    }
    if total <= height {
        return 0..total;
    }
    let selected = selected.min(total - 1);
    let start = selected.saturating_sub(height / 2).min(total - height);
    start..start + height
}
