//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the engine, the terminal
//! renderer and the input mapper. All types are plain data with no external
//! dependencies.
//!
//! # Grid Dimensions
//!
//! The default playfield is 13 columns by 20 rows. Hosts may pick another size
//! through the engine configuration; these constants are only the defaults.
//!
//! # Timing
//!
//! The engine has no clock. [`DEFAULT_TICK_MS`] is the cadence at which the
//! bundled host calls `tick()`.
//!
//! # Examples
//!
//! ```
//! use blockdrop_types::{Color, GameStatus, PieceKind, DEFAULT_GRID_WIDTH};
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(Color::ALL.len(), 7);
//! assert!(GameStatus::default().is_running());
//! assert_eq!(DEFAULT_GRID_WIDTH, 13);
//! ```

/// Default grid width in cells (13 columns)
pub const DEFAULT_GRID_WIDTH: u16 = 13;

/// Default grid height in cells (20 rows)
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Smallest accepted grid side; every catalog piece fits in 4x4.
pub const MIN_GRID_SIDE: u16 = 4;

/// Largest accepted grid side.
pub const MAX_GRID_SIDE: u16 = 256;

/// Default interval between gravity ticks in milliseconds
pub const DEFAULT_TICK_MS: u64 = 500;

/// Points multiplier for a line clear: `LINE_CLEAR_BASE * cleared^2`.
pub const LINE_CLEAR_BASE: u32 = 10;

/// The seven tetromino piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    L,
    J,
    O,
    S,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
    ];
}

/// Palette color of a locked cell or the active piece.
///
/// Colors are drawn independently of the piece kind, so any shape can show
/// up in any color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    Orange,
}

impl Color {
    /// Every palette entry, in palette order.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Orange,
    ];

    /// 24-bit RGB value of the palette entry.
    ///
    /// ```
    /// use blockdrop_types::Color;
    ///
    /// assert_eq!(Color::Orange.rgb(), (0xFF, 0xA5, 0x00));
    /// ```
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Red => (0xFF, 0x00, 0x00),
            Color::Green => (0x00, 0xFF, 0x00),
            Color::Blue => (0x00, 0x00, 0xFF),
            Color::Yellow => (0xFF, 0xFF, 0x00),
            Color::Magenta => (0xFF, 0x00, 0xFF),
            Color::Cyan => (0x00, 0xFF, 0xFF),
            Color::Orange => (0xFF, 0xA5, 0x00),
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Locked block of the given color
pub type Cell = Option<Color>;

/// Lifecycle status of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Running,
    /// Terminal state; only a restart leaves it.
    GameOver,
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GameStatus::GameOver)
    }
}

/// Commands a host can issue against the engine
///
/// Gravity is not an action: the host drives it by calling `tick()` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Start a new session (only acts after game over)
    Restart,
}

/// Record of a piece landing, emitted once per lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_gained: u32,
    /// The replacement piece could not spawn.
    pub game_over: bool,
}
