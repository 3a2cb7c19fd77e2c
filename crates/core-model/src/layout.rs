//! Screen geometry for the inline editor.
//!
//! The editor owns no alternate screen: it draws on the terminal row holding
//! the prompt and, when a completion or search box is open, on the rows
//! directly beneath it. `Layout` splits the reported terminal size into the
//! input line and the box region so the views in `core-render` never compute
//! geometry themselves.
//!
//! Invariants:
//! * `line.height == 1` (or 0 on a degenerate zero-row terminal).
//! * `popup.y == line.y + 1` and `popup.height <= rows - 1`.
//! * Width/height are terminal cells and may be 0.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    cols: u16,
    rows: u16,
}

impl Layout {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// The input line (row 0 relative to the prompt).
    pub fn line(&self) -> LayoutRegion {
        LayoutRegion::new(0, 0, self.cols, self.rows.min(1))
    }

    /// Region below the input line for a box wanting `wanted` rows.
    pub fn popup(&self, wanted: u16) -> LayoutRegion {
        let available = self.rows.saturating_sub(1);
        LayoutRegion::new(0, 1, self.cols, wanted.min(available))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
