//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-block game: the grid and its
//! line clearing, piece shapes and rotation, scoring, and the engine state
//! machine that ties them together. It performs no I/O and keeps no clock.
//!
//! # Module Structure
//!
//! - [`grid`]: cell matrix with the collision oracle and row compaction
//! - [`piece`]: shape matrices, spawn placement, clockwise rotation
//! - [`engine`]: the session, its commands, and the game-over transition
//! - [`rng`]: the injected source of piece kinds and colors
//! - [`scoring`]: points per landing
//! - [`config`]: validated grid dimensions
//! - [`snapshot`]: read-only copy of the query surface for renderers
//!
//! # Example
//!
//! ```
//! use blockdrop_core::{Engine, EngineConfig, SimpleRng, TickOutcome};
//! use blockdrop_types::GameAction;
//!
//! let mut engine = Engine::new(EngineConfig::default(), SimpleRng::new(12345));
//!
//! engine.apply_action(GameAction::MoveRight);
//! engine.apply_action(GameAction::Rotate);
//! assert_eq!(engine.tick(), TickOutcome::Fell);
//!
//! assert_eq!(engine.score(), 0);
//! assert!(engine.status().is_running());
//! ```

pub mod config;
pub mod engine;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockdrop_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, MoveDir, TickOutcome};
pub use grid::Grid;
pub use piece::{Piece, Shape};
pub use rng::{PieceSource, ScriptedSource, SimpleRng, ThreadRngSource};
pub use scoring::line_clear_score;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
