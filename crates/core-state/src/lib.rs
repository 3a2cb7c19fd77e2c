//! Editable line state: the input buffer with its history stack, and the kill ring.
//!
//! Both structures are plain data with synchronous mutators; orchestration
//! (which key triggers which mutation, when the kill chain breaks) lives in
//! `core-actions`.

pub mod buffer;
pub mod kill_ring;

pub use buffer::{InputBuffer, Validator};
pub use kill_ring::{KILL_RING_DEFAULT_CAPACITY, KillDirection, KillRing};
