//! Cell grid backing one composed frame.
//!
//! `Cell` stores the full grapheme cluster for leader cells along with its
//! visual width; continuation cells (width == 0) occupy the remaining columns
//! of a wide cluster and never print text.
//!
//! Invariants:
//! - Leader: width >= 1, `cluster` non-empty.
//! - Continuation: width == 0, `cluster` empty, directly after its leader.
//! - A cluster that does not fit in the remaining columns of a row is dropped
//!   whole, never split.

use bitflags::bitflags;
use core_text::egc_width;
use unicode_segmentation::UnicodeSegmentation;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const REVERSE   = 0b0000_0001; // highlighted row / selection
        const DIM       = 0b0000_0010; // ghost suggestion, suffix, descriptions
        const BOLD      = 0b0000_0100; // fuzzy match positions
        const UNDERLINE = 0b0000_1000;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub cluster: String,
    /// Visual width in terminal columns. `0` designates a continuation cell.
    pub width: u8,
    pub flags: CellFlags,
}

impl Cell {
    pub fn leader(cluster: &str, width: u16, flags: CellFlags) -> Self {
        Self {
            cluster: cluster.to_string(),
            width: width.clamp(1, u8::MAX as u16) as u8,
            flags,
        }
    }

    pub fn continuation(flags: CellFlags) -> Self {
        Self {
            cluster: String::new(),
            width: 0,
            flags,
        }
    }

    #[inline]
    pub fn is_leader(&self) -> bool {
        self.width > 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::leader(" ", 1, CellFlags::empty())
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Write `s` starting at (x, y) and return the column after the last
    /// cluster written. Clusters that would overflow the row are dropped.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, flags: CellFlags) -> u16 {
        let mut col = x;
        for g in s.graphemes(true) {
            let w = egc_width(g).max(1);
            if y >= self.height || col.saturating_add(w) > self.width {
                break;
            }
            if let Some(idx) = self.index(col, y) {
                self.cells[idx] = Cell::leader(g, w, flags);
            }
            for dx in 1..w {
                if let Some(idx) = self.index(col + dx, y) {
                    self.cells[idx] = Cell::continuation(flags);
                }
            }
            col += w;
        }
        col
    }

    /// Apply additional flags over `[x, x + span)` of row `y`.
    pub fn apply_flags_span(&mut self, x: u16, y: u16, span: u16, flags: CellFlags) {
        let span = span.min(self.width.saturating_sub(x));
        for dx in 0..span {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx].flags |= flags;
            }
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Iterate leader cells of a row, yielding (cluster, width, flags, start_x).
    pub fn row_leaders(&self, y: u16) -> impl Iterator<Item = (&str, u16, CellFlags, u16)> + '_ {
        let width = self.width;
        let start = y as usize * width as usize;
        let mut x = 0u16;
        std::iter::from_fn(move || {
            while x < width && y < self.height {
                let cell = &self.cells[start + x as usize];
                if cell.is_leader() {
                    let w = cell.width as u16;
                    let out = (cell.cluster.as_str(), w, cell.flags, x);
                    x = x.saturating_add(w);
                    return Some(out);
                }
                x += 1;
            }
            None
        })
    }

    /// Row text with trailing blanks trimmed (tests / diagnostics).
    pub fn row_text(&self, y: u16) -> String {
        let s: String = self.row_leaders(y).map(|(c, ..)| c).collect();
        s.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_cluster_occupies_two_cells() {
        let mut f = Frame::new(6, 1);
        let end = f.put_str(0, 0, "a界b", CellFlags::empty());
        assert_eq!(end, 4);
        assert_eq!(f.cell(1, 0).map(|c| c.width), Some(2));
        assert_eq!(f.cell(2, 0).map(|c| c.width), Some(0));
        assert_eq!(f.row_text(0), "a界b");
    }

    #[test]
    fn overflow_is_dropped_whole() {
        let mut f = Frame::new(3, 1);
        let end = f.put_str(0, 0, "ab界", CellFlags::empty());
        assert_eq!(end, 2);
        assert_eq!(f.row_text(0), "ab");
    }

    #[test]
    fn flags_span_marks_cells() {
        let mut f = Frame::new(4, 2);
        f.put_str(0, 1, "xy", CellFlags::empty());
        f.apply_flags_span(0, 1, 10, CellFlags::REVERSE);
        assert!(f.cell(3, 1).is_some_and(|c| c.flags.contains(CellFlags::REVERSE)));
        assert!(f.cell(0, 0).is_some_and(|c| c.flags.is_empty()));
    }
}
