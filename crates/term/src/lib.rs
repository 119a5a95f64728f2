//! Terminal renderer for the falling-block game.
//!
//! Renders a [`core::GameSnapshot`] into a simple framebuffer and flushes it
//! to the terminal with crossterm, without any widget or layout library.
//!
//! - [`fb`]: styled character cells
//! - [`game_view`]: snapshot to framebuffer, pure and unit-testable
//! - [`renderer`]: terminal setup/teardown and cell-diff painting

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockdrop_core as core;
pub use blockdrop_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
