//! Blockdrop (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockdrop::{core,input,term,types}` so
//! the binary, integration tests, and benches share one import path.

pub use blockdrop_core as core;
pub use blockdrop_input as input;
pub use blockdrop_term as term;
pub use blockdrop_types as types;
