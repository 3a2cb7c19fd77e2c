//! Multi-column completion box layout.
//!
//! Given a box of `height` rows and `width` columns:
//! * Item width is the widest label (`display` or `value`), clamped to at
//!   least `min_item_width` and at most `width`.
//! * Any candidate with a description forces a single column so the
//!   descriptions line up. Otherwise `columns = max(1, width / item_width)`,
//!   except that everything fitting in `height` rows always uses one column.
//! * A page holds `height * columns` items; the visible page is the one
//!   containing the selection (page 0 while ambiguous).
//! * Items fill column-major: column 0 rows 0..height, then column 1, ...

use core_complete::CompletionCandidate;
use core_text::display_width;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxCell {
    /// Index into the full candidate list.
    pub index: usize,
    pub column: u16,
    pub row: u16,
    pub label: String,
    pub description: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionBoxLayout {
    pub item_width: u16,
    pub columns: u16,
    /// Rows actually used on the visible page.
    pub rows: u16,
    pub page: usize,
    pub page_count: usize,
    pub cells: Vec<BoxCell>,
}

pub fn layout_completion_box(
    candidates: &[CompletionCandidate],
    selected: Option<usize>,
    width: u16,
    height: u16,
    min_item_width: u16,
) -> CompletionBoxLayout {
    if candidates.is_empty() || width == 0 || height == 0 {
        return CompletionBoxLayout::default();
    }
    let widest = candidates
        .iter()
        .map(|c| display_width(c.label()))
        .max()
        .unwrap_or(0);
    // One cell of padding between columns.
    let item_width = (widest + 1)
        .max(min_item_width as usize)
        .min(width as usize)
        .max(1) as u16;

    let total = candidates.len();
    let has_descriptions = candidates.iter().any(CompletionCandidate::has_description);
    let columns = if has_descriptions || total <= height as usize {
        1
    } else {
        (width / item_width).max(1)
    };

    let page_size = height as usize * columns as usize;
    let page = selected.map_or(0, |s| s.min(total - 1) / page_size);
    let page_count = total.div_ceil(page_size);
    let first = page * page_size;
    let last = (first + page_size).min(total);

    let cells: Vec<BoxCell> = (first..last)
        .map(|index| {
            let k = index - first;
            let c = &candidates[index];
            BoxCell {
                index,
                column: (k / height as usize) as u16,
                row: (k % height as usize) as u16,
                label: c.label().to_string(),
                description: c.description.clone().filter(|d| !d.is_empty()),
                selected: selected == Some(index),
            }
        })
        .collect();
    let rows = (last - first).min(height as usize) as u16;

    tracing::trace!(target: "complete.engine", total, columns, item_width, page, "box_layout");
    CompletionBoxLayout {
        item_width,
        columns,
        rows,
        page,
        page_count,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cands(n: usize) -> Vec<CompletionCandidate> {
        (0..n).map(|i| CompletionCandidate::new(format!("item{i:02}"))).collect()
    }

    #[test]
    fn few_items_use_one_column() {
        let l = layout_completion_box(&cands(3), None, 80, 8, 12);
        assert_eq!(l.columns, 1);
        assert_eq!(l.rows, 3);
        assert_eq!(l.item_width, 12);
    }

    #[test]
    fn many_items_fill_column_major() {
        let l = layout_completion_box(&cands(10), Some(5), 40, 4, 10);
        assert_eq!(l.columns, 4);
        assert_eq!(l.page, 0);
        let c5 = l.cells.iter().find(|c| c.index == 5).unwrap();
        assert_eq!((c5.column, c5.row), (1, 1));
        assert!(c5.selected);
        assert_eq!(l.rows, 4);
    }

    #[test]
    fn descriptions_force_single_column_and_paging() {
        let mut c = cands(10);
        c[3] = c[3].clone().with_description("branch");
        let l = layout_completion_box(&c, Some(9), 200, 4, 10);
        assert_eq!(l.columns, 1);
        assert_eq!(l.page, 2);
        assert_eq!(l.page_count, 3);
        assert_eq!(l.cells.len(), 2);
        assert_eq!(l.cells[0].index, 8);
    }

    #[test]
    fn item_width_clamped_to_box_width() {
        let c = vec![CompletionCandidate::new("a".repeat(50)), CompletionCandidate::new("b")];
        let l = layout_completion_box(&c, None, 20, 1, 12);
        assert_eq!(l.item_width, 20);
        assert_eq!(l.columns, 1);
        assert_eq!(l.page_count, 2);
    }

    #[test]
    fn empty_or_degenerate() {
        assert_eq!(layout_completion_box(&[], None, 80, 8, 12), CompletionBoxLayout::default());
        assert!(layout_completion_box(&cands(2), None, 80, 0, 12).cells.is_empty());
    }
}
