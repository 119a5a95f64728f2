//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Gravity is
//! not an input; the host drives `tick()` on its own timer.

pub mod map;

pub use blockdrop_types as types;

pub use map::{handle_key_event, should_quit};
