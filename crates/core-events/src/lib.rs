//! Core event types consumed by the line editor's event loop.
//!
//! The editor is driven by exactly one producer/consumer pair: the input task
//! pushes `Event`s into a bounded channel and the runtime loop hands each one,
//! in order, to `LineEditor::apply_event`. Nothing here performs I/O.

use std::fmt;
use std::sync::atomic::AtomicU64;

// -------------------------------------------------------------------------------------------------
// Channel Policy
// -------------------------------------------------------------------------------------------------
// Single producer (input task) and single consumer (runtime loop). The bounded channel gives
// natural backpressure; the producer awaits capacity instead of dropping keystrokes because a
// lost Tab or kill would desynchronize completion / kill-ring state from what the user typed.
// -------------------------------------------------------------------------------------------------
pub const EVENT_CHANNEL_CAP: usize = 1024;

// Telemetry counters (relaxed fetch_add; inspected by tests and logged at shutdown).
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0);
pub static PASTE_SESSIONS: AtomicU64 = AtomicU64::new(0);
pub static PASTE_BYTES: AtomicU64 = AtomicU64::new(0);

/// Top-level event enum consumed by the runtime loop.
#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    RenderRequested,
    Shutdown,
}

/// Normalized input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Complete bracketed paste payload (never logged verbatim; log length only).
    Paste(String),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Key without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    pub const fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::ALT)
    }

    pub fn is_ctrl(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
    }

    pub fn is_alt(&self) -> bool {
        self.mods.contains(KeyModifiers::ALT)
    }
}

/// Logical key codes. `BackTab` is the terminal's Shift-Tab report; a `Tab` carrying
/// `SHIFT` is treated the same by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("C-")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("M-")?;
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other:?}"),
        }
    }
}
