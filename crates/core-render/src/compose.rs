//! Frame composition: turns the read-only views into a cell grid anchored at
//! the prompt row.
//!
//! Row 0 is the input line (or the reverse-search prompt while searching).
//! Rows below it hold at most one box: the completion box while a session
//! has several candidates, or the history search box. The box never exceeds
//! the rows the layout leaves below the input line.
//!
//! The input line scrolls horizontally so the cursor is always on screen.

use crate::completion_box::layout_completion_box;
use crate::frame::{CellFlags, Frame};
use crate::line::line_view;
use crate::search::{search_box, search_prompt};
use core_model::EditorModel;
use core_text::{byte_offset, display_width, truncate_to_width};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct Composed {
    pub frame: Frame,
    /// Cursor position relative to the prompt row.
    pub cursor: (u16, u16),
}

pub fn compose(model: &EditorModel) -> Composed {
    let layout = model.layout();
    let cols = layout.cols();
    if model.search.is_active() {
        return compose_search(model, cols);
    }

    let view = line_view(model);
    let abs = view.absolute_cursor_col();
    let skip = (abs + 1).saturating_sub(cols as usize);

    let mut segments: Vec<(&str, CellFlags)> = vec![(view.prompt.as_str(), CellFlags::empty())];
    match &view.suffix {
        Some((at, tail)) => {
            let split = byte_offset(&view.text, *at);
            segments.push((&view.text[..split], CellFlags::empty()));
            segments.push((tail.as_str(), CellFlags::DIM));
            segments.push((&view.text[split..], CellFlags::empty()));
        }
        None => {
            segments.push((view.text.as_str(), CellFlags::empty()));
            if let Some(ghost) = view.ghost.as_deref() {
                segments.push((ghost, CellFlags::DIM));
            }
        }
    }

    let box_rows = completion_rows(model, cols);
    let region = layout.popup(box_rows.len() as u16);
    let mut frame = Frame::new(cols, 1 + region.height);
    put_segments(&mut frame, 0, &segments, skip);
    for (i, row) in box_rows.iter().take(region.height as usize).enumerate() {
        let y = region.y + i as u16;
        frame.put_str(0, y, &row.text, row.flags);
        if let Some((x, w)) = row.highlight {
            frame.apply_flags_span(x, y, w, CellFlags::REVERSE);
        }
    }
    let cursor_x = abs.saturating_sub(skip).min(cols.saturating_sub(1) as usize) as u16;
    Composed {
        frame,
        cursor: (cursor_x, 0),
    }
}

struct BoxRow {
    text: String,
    flags: CellFlags,
    /// Reverse-video span `(x, width)` of the highlighted candidate.
    highlight: Option<(u16, u16)>,
}

/// One text row per box line; candidates sharing a row are joined at their
/// column offsets.
fn completion_rows(model: &EditorModel, cols: u16) -> Vec<BoxRow> {
    let engine = &model.completion;
    if !engine.info_box_visible() {
        return Vec::new();
    }
    let mut rows = Vec::new();
    let help = engine.help_text();
    if !help.is_empty() {
        rows.push(BoxRow {
            text: truncate_to_width(help, cols as usize),
            flags: CellFlags::DIM,
            highlight: None,
        });
    }
    let opts = model.options();
    let height = opts.completion_box_height.saturating_sub(rows.len() as u16);
    let layout = layout_completion_box(
        engine.suggestions(),
        engine.selected(),
        cols,
        height,
        opts.min_item_width,
    );
    let item_width = layout.item_width as usize;

    for r in 0..layout.rows {
        let mut line = String::new();
        let mut highlight = None;
        for cell in layout.cells.iter().filter(|c| c.row == r) {
            let start = cell.column as usize * item_width;
            let used = display_width(&line);
            line.push_str(&" ".repeat(start.saturating_sub(used)));
            // Leave one column of padding unless the item spans the box.
            let room = if layout.columns > 1 { item_width - 1 } else { item_width };
            let label = truncate_to_width(&cell.label, room.max(1));
            line.push_str(&label);
            if let Some(desc) = &cell.description {
                line.push_str(&" ".repeat(item_width.saturating_sub(display_width(&label))));
                line.push_str(desc);
            }
            if cell.selected {
                let w = display_width(&line).saturating_sub(start).max(1);
                highlight = Some((start as u16, w as u16));
            }
        }
        rows.push(BoxRow {
            text: truncate_to_width(&line, cols as usize),
            flags: CellFlags::empty(),
            highlight,
        });
    }
    rows
}

fn compose_search(model: &EditorModel, cols: u16) -> Composed {
    let prompt = search_prompt(&model.search);
    let height = model.options().history_box_height;
    let region = model.layout().popup(height);
    let view = search_box(&model.search, region.height as usize);

    let mut frame = Frame::new(cols, 1 + view.rows.len() as u16);
    let end = frame.put_str(0, 0, &truncate_to_width(&prompt, cols as usize), CellFlags::empty());
    for (i, row) in view.rows.iter().enumerate() {
        let y = region.y + i as u16;
        let mut x = 0u16;
        for (ci, g) in row.command.graphemes(true).enumerate() {
            // Positions are char indices; graphemes of a single char line up.
            let mut flags = if row.positions.contains(&ci) {
                CellFlags::BOLD | CellFlags::UNDERLINE
            } else {
                CellFlags::empty()
            };
            if row.selected {
                flags |= CellFlags::REVERSE;
            }
            let next = frame.put_str(x, y, g, flags);
            if next == x {
                break;
            }
            x = next;
        }
    }
    // Cursor sits inside the quoted query.
    let query_end = display_width("(reverse-i-search)[")
        + display_width(model.search.filter().label())
        + 1
        + display_width(model.search.sort().label())
        + 2
        + display_width(model.search.query());
    let cursor_x = (query_end as u16).min(end.max(1) - 1);
    Composed {
        frame,
        cursor: (cursor_x, 0),
    }
}

/// Write consecutive segments on row `y`, skipping the first `skip` columns.
fn put_segments(frame: &mut Frame, y: u16, segments: &[(&str, CellFlags)], skip: usize) {
    let mut skipped = 0usize;
    let mut x = 0u16;
    for (text, flags) in segments {
        for g in text.graphemes(true) {
            let w = core_text::egc_width(g).max(1) as usize;
            if skipped < skip {
                skipped += w;
                continue;
            }
            let next = frame.put_str(x, y, g, *flags);
            if next == x {
                return;
            }
            x = next;
        }
    }
}
