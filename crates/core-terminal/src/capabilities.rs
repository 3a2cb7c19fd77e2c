//! Terminal capability probing.
//!
//! Detection runs once at startup. When stdin or stdout is not a terminal
//! the host falls back to plain line reading (no raw mode, no painting).

use crossterm::tty::IsTty;
use std::io::{stdin, stdout};

pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    /// Both stdin and stdout are terminals.
    pub interactive: bool,
    /// (columns, rows) at startup.
    pub size: (u16, u16),
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        let interactive = stdin().is_tty() && stdout().is_tty();
        Self::from_detected(interactive, crossterm::terminal::size().ok())
    }

    /// Build from detected values; a missing or zero size falls back to 80x24.
    pub fn from_detected(interactive: bool, size: Option<(u16, u16)>) -> Self {
        let size = match size {
            Some((c, r)) if c > 0 && r > 0 => (c, r),
            _ => FALLBACK_SIZE,
        };
        Self { interactive, size }
    }
}
