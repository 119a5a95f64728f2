//! Pieces module - tetromino shape matrices and the rotation transform
//!
//! A shape is a small boolean matrix (at most 4x4) stored inline, so rotating
//! and validating a candidate never touches the heap.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Color, PieceKind};

/// Largest side of any shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

const MAX_SHAPE_CELLS: usize = MAX_SHAPE_SIDE * MAX_SHAPE_SIDE;

/// Boolean shape matrix, `rows x cols`, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: ArrayVec<bool, MAX_SHAPE_CELLS>,
}

impl Shape {
    /// Spawn orientation of a catalog piece.
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::build(&[&[1, 1, 1, 1]]),
            PieceKind::T => Self::build(&[&[1, 1, 1], &[0, 1, 0]]),
            PieceKind::L => Self::build(&[&[1, 1, 1], &[1, 0, 0]]),
            PieceKind::J => Self::build(&[&[1, 1, 1], &[0, 0, 1]]),
            PieceKind::O => Self::build(&[&[1, 1], &[1, 1]]),
            PieceKind::S => Self::build(&[&[0, 1, 1], &[1, 1, 0]]),
            PieceKind::Z => Self::build(&[&[1, 1, 0], &[0, 1, 1]]),
        }
    }

    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns `None` for an empty, ragged, or larger-than-4x4 matrix.
    ///
    /// ```
    /// use blockdrop_core::Shape;
    ///
    /// let bar = Shape::from_rows(&[&[1], &[1]]).unwrap();
    /// assert_eq!((bar.rows(), bar.cols()), (2, 1));
    /// assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
    /// ```
    pub fn from_rows(matrix: &[&[u8]]) -> Option<Self> {
        let rows = matrix.len();
        let cols = matrix.first()?.len();
        if rows > MAX_SHAPE_SIDE || cols == 0 || cols > MAX_SHAPE_SIDE {
            return None;
        }
        if matrix.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self::build(matrix))
    }

    fn build(matrix: &[&[u8]]) -> Self {
        let cols = matrix.first().map_or(0, |row| row.len());
        Self {
            rows: matrix.len() as u8,
            cols: cols as u8,
            cells: matrix
                .iter()
                .flat_map(|row| row.iter().map(|&bit| bit != 0))
                .collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether the cell at (row, col) is filled; false outside the matrix.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        if row >= self.rows() || col >= self.cols() {
            return false;
        }
        self.cells[row * self.cols() + col]
    }

    /// (dx, dy) offsets of filled cells from the top-left corner.
    pub fn filled_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cols = self.cols();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(i, _)| ((i % cols) as i32, (i / cols) as i32))
    }

    /// 90° clockwise rotation: transpose, then reverse each row.
    ///
    /// With `R` source rows, new cell `(r, c)` is old cell `(R - 1 - c, r)`.
    pub fn rotated_cw(&self) -> Shape {
        let old_rows = self.rows();
        let new_rows = self.cols();
        let new_cols = old_rows;

        let mut cells = ArrayVec::new();
        for r in 0..new_rows {
            for c in 0..new_cols {
                cells.push(self.is_filled(old_rows - 1 - c, r));
            }
        }

        Shape {
            rows: new_rows as u8,
            cols: new_cols as u8,
            cells,
        }
    }
}

/// The active falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    color: Color,
    x: i32,
    y: i32,
}

impl Piece {
    /// Place a new piece horizontally centered on the top row.
    pub fn spawn(kind: PieceKind, color: Color, grid_width: u16) -> Self {
        let shape = Shape::of(kind);
        let x = grid_width as i32 / 2 - shape.cols() as i32 / 2;
        Self {
            kind,
            shape,
            color,
            x,
            y: 0,
        }
    }

    /// Same piece with its top-left corner at (x, y).
    pub fn at(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Candidate shape for a clockwise rotation. The piece is left untouched;
    /// the engine validates the candidate before committing it.
    pub fn rotate(&self) -> Shape {
        self.shape.rotated_cw()
    }

    /// Absolute grid coordinates of every filled cell
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_offsets()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Moved copy, for validating a translation before committing it.
    pub fn shifted(&self, dx: i32, dy: i32) -> Piece {
        let mut moved = self.clone();
        moved.translate(dx, dy);
        moved
    }

    /// Whether any filled cell would hit a wall, the floor, or a locked cell
    /// after shifting by (dx, dy).
    pub fn collides_at(&self, grid: &Grid, dx: i32, dy: i32) -> bool {
        self.filled_cells()
            .any(|(x, y)| grid.is_occupied(x + dx, y + dy))
    }

    pub fn collides(&self, grid: &Grid) -> bool {
        self.collides_at(grid, 0, 0)
    }

    pub(crate) fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub(crate) fn replace_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub(crate) fn set_x(&mut self, x: i32) {
        self.x = x;
    }
}
