//! Read-only views of the editor state and their terminal emission.
//!
//! Everything except `writer` is a pure function of `EditorModel`, computed on
//! demand after each dirty event:
//! - `line`: prompt, draft, cursor column, ghost / suffix tail.
//! - `completion_box`: multi-column candidate layout (paging, column-major).
//! - `search`: reverse-search prompt and windowed result rows with match
//!   positions.
//! - `compose`: assembles the above into a `Frame` anchored at the prompt row.
//! - `writer`: queues crossterm commands that repaint a composed frame in
//!   place.
//!
//! Unicode: widths come from `core_text` grapheme widths; wide clusters are
//! never split across the right edge.

pub mod completion_box;
pub mod compose;
pub mod frame;
pub mod line;
pub mod search;
pub mod writer;

pub use completion_box::{BoxCell, CompletionBoxLayout, layout_completion_box};
pub use compose::{Composed, compose};
pub use frame::{Cell, CellFlags, Frame};
pub use line::{LineView, line_view};
pub use search::{SearchBoxView, SearchRow, search_box, search_prompt};
pub use writer::Writer;
