//! Scoring module
//!
//! A landing that clears `k` rows at once is worth `10 * k^2`. The quadratic
//! curve rewards clearing several rows in one landing over clearing the same
//! rows one at a time.

use crate::types::LINE_CLEAR_BASE;

/// Points for clearing `lines` rows in a single landing.
pub fn line_clear_score(lines: usize) -> u32 {
    let lines = lines as u32;
    LINE_CLEAR_BASE.saturating_mul(lines.saturating_mul(lines))
}
