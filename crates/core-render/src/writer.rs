//! Terminal writer for inline (non-alternate-screen) painting.
//!
//! The editor owns the prompt row and the rows directly below it. Each paint
//! starts at column 0 of the prompt row, rewrites every row of the composed
//! frame, clears whatever a taller previous frame left below, and parks the
//! terminal cursor back on the prompt row at the editing position.
//!
//! Invariants:
//! * Commands preserve ordering; nothing is flushed mid-frame.
//! * Positions are relative to the prompt row, never absolute, so the shell
//!   output above the prompt is never touched.
//! * Attributes are reset at the end of every row.

use crate::compose::Composed;
use crate::frame::{CellFlags, Frame};
use anyhow::Result;
use crossterm::{
    cursor::{MoveToColumn, MoveUp},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveToColumn(u16),
    MoveUp(u16),
    ClearLine,
    ClearBelow,
    NewLine,
    Attr(CellFlags),
    ResetAttr,
    Print(String),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    /// Queue a full repaint of `composed`, assuming the terminal cursor is on
    /// the prompt row.
    pub fn paint(&mut self, composed: &Composed) {
        let frame = &composed.frame;
        self.cmds.push(Command::MoveToColumn(0));
        for y in 0..frame.height {
            if y > 0 {
                self.cmds.push(Command::NewLine);
            }
            self.cmds.push(Command::ClearLine);
            self.paint_row(frame, y);
        }
        self.cmds.push(Command::ClearBelow);
        if frame.height > 1 {
            self.cmds.push(Command::MoveUp(frame.height - 1));
        }
        self.cmds.push(Command::MoveToColumn(composed.cursor.0));
    }

    /// Queue clearing of everything from the prompt row down (submit / Ctrl-C
    /// leave the line text in place; this only drops the boxes).
    pub fn finish_line(&mut self, composed: &Composed) {
        let one_row = Composed {
            frame: row_zero(&composed.frame),
            cursor: composed.cursor,
        };
        self.paint(&one_row);
        self.cmds.push(Command::NewLine);
        self.cmds.push(Command::MoveToColumn(0));
    }

    fn paint_row(&mut self, frame: &Frame, y: u16) {
        let mut run = String::new();
        let mut current = CellFlags::empty();
        for (cluster, _, flags, _) in frame.row_leaders(y) {
            if flags != current {
                self.print(std::mem::take(&mut run));
                self.cmds.push(Command::ResetAttr);
                if !flags.is_empty() {
                    self.cmds.push(Command::Attr(flags));
                }
                current = flags;
            }
            run.push_str(cluster);
        }
        if current.is_empty() {
            let keep = run.trim_end().len();
            run.truncate(keep);
        }
        self.print(run);
        if !current.is_empty() {
            self.cmds.push(Command::ResetAttr);
        }
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveToColumn(x) => queue!(out, MoveToColumn(x))?,
                Command::MoveUp(n) => queue!(out, MoveUp(n))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::ClearBelow => queue!(out, Clear(ClearType::FromCursorDown))?,
                Command::NewLine => queue!(out, Print("\r\n"))?,
                Command::ResetAttr => queue!(out, SetAttribute(Attribute::Reset))?,
                Command::Attr(flags) => {
                    if flags.contains(CellFlags::REVERSE) {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                    if flags.contains(CellFlags::DIM) {
                        queue!(out, SetAttribute(Attribute::Dim))?;
                    }
                    if flags.contains(CellFlags::BOLD) {
                        queue!(out, SetAttribute(Attribute::Bold))?;
                    }
                    if flags.contains(CellFlags::UNDERLINE) {
                        queue!(out, SetAttribute(Attribute::Underlined))?;
                    }
                }
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn row_zero(frame: &Frame) -> Frame {
    let mut one = Frame::new(frame.width, frame.height.min(1));
    let n = one.cells.len();
    one.cells.clone_from_slice(&frame.cells[..n]);
    one
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn composed(rows: &[&str], cursor: u16) -> Composed {
        let mut frame = Frame::new(20, rows.len() as u16);
        for (y, r) in rows.iter().enumerate() {
            frame.put_str(0, y as u16, r, CellFlags::empty());
        }
        Composed {
            frame,
            cursor: (cursor, 0),
        }
    }

    #[test]
    fn single_row_paint() {
        let mut w = Writer::new();
        w.paint(&composed(&["> ls"], 4));
        assert_eq!(
            w.commands(),
            &[
                Command::MoveToColumn(0),
                Command::ClearLine,
                Command::Print("> ls".into()),
                Command::ClearBelow,
                Command::MoveToColumn(4),
            ]
        );
    }

    #[test]
    fn multi_row_returns_to_prompt_row() {
        let mut w = Writer::new();
        w.paint(&composed(&["> g", "git", "gist"], 3));
        let cmds = w.commands();
        assert_eq!(cmds.iter().filter(|c| **c == Command::NewLine).count(), 2);
        assert_eq!(cmds[cmds.len() - 2], Command::MoveUp(2));
    }

    #[test]
    fn styled_runs_are_reset() {
        let mut frame = Frame::new(10, 1);
        let x = frame.put_str(0, 0, "ab", CellFlags::empty());
        frame.put_str(x, 0, "cd", CellFlags::DIM);
        let mut w = Writer::new();
        w.paint(&Composed {
            frame,
            cursor: (2, 0),
        });
        let cmds = w.commands();
        assert!(cmds.contains(&Command::Attr(CellFlags::DIM)));
        assert!(cmds.contains(&Command::Print("cd".into())));
        let mut out = Vec::new();
        w.flush_to(&mut out).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn finish_line_drops_boxes() {
        let mut w = Writer::new();
        w.finish_line(&composed(&["> g", "git"], 3));
        let cmds = w.commands();
        assert!(!cmds.contains(&Command::Print("git".into())));
        assert_eq!(cmds.last(), Some(&Command::MoveToColumn(0)));
    }
}
