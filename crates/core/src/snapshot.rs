use crate::piece::{Piece, Shape};
use crate::types::{Cell, Color, GameStatus, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

impl ActiveSnapshot {
    /// Absolute grid coordinates of every filled cell
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_offsets()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            shape: value.shape().clone(),
            color: value.color(),
            x: value.x(),
            y: value.y(),
        }
    }
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major locked cells, `height * width` long
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    /// Locked cell at (x, y); empty outside the grid or past the end of
    /// `cells`.
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        self.cells
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        self.status.is_running()
    }
}
