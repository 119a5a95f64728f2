//! Grid module - locked-cell storage and line clearing
//!
//! The grid is a `width x height` matrix where each cell is empty or holds the
//! color of a locked block. Dimensions are chosen once at construction and
//! never change afterwards.
//!
//! Storage is a flat row-major vector (`y * width + x`), allocated once.
//! Coordinates: x grows to the right, y grows downward, (0, 0) is the top-left.

use crate::piece::Piece;
use crate::types::Cell;

/// The game grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u16, height: u16) -> Self {
        debug_assert!(width > 0 && height > 0, "grid sides must be positive");
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision oracle for piece placement.
    ///
    /// Outside the side walls, on or below the floor, and locked cells are all
    /// occupied. Rows above the top (`y < 0`) are open.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return true;
        }
        if y < 0 {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Write the piece's color into every cell its shape fills.
    ///
    /// The caller guarantees the piece lies inside the grid; cells that do not
    /// are skipped.
    pub fn lock(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.filled_cells() {
            self.set(x, y, Some(color));
        }
    }

    /// Remove every full row and compact the rest downward.
    ///
    /// Non-full rows keep their relative order and the same number of empty
    /// rows appears at the top. Returns how many rows were removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut write_y = height;
        let mut cleared = 0;

        // Two pointers, scanning from the bottom up.
        for read_y in (0..height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    fn fill_row(grid: &mut Grid, y: i32, color: Color) {
        for x in 0..grid.width() as i32 {
            grid.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(13, 20);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(12, 0), Some(12));
        assert_eq!(grid.index(0, 1), Some(13));
        assert_eq!(grid.index(12, 19), Some(259));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(13, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_occupied_oracle_edges() {
        let mut grid = Grid::new(4, 4);
        assert!(grid.is_occupied(-1, 0));
        assert!(grid.is_occupied(4, 0));
        assert!(grid.is_occupied(0, 4));
        assert!(!grid.is_occupied(0, -1));
        assert!(!grid.is_occupied(2, 2));

        grid.set(2, 2, Some(Color::Cyan));
        assert!(grid.is_occupied(2, 2));
    }

    #[test]
    fn test_clear_preserves_order_of_remaining_rows() {
        let mut grid = Grid::new(4, 6);
        fill_row(&mut grid, 1, Color::Red);
        fill_row(&mut grid, 3, Color::Red);
        grid.set(0, 0, Some(Color::Green));
        grid.set(1, 2, Some(Color::Blue));
        grid.set(2, 4, Some(Color::Yellow));

        assert_eq!(grid.clear_full_rows(), 2);

        assert!(grid.rows().take(2).all(|row| row.iter().all(|c| c.is_none())));
        assert_eq!(grid.get(0, 2), Some(Some(Color::Green)));
        assert_eq!(grid.get(1, 3), Some(Some(Color::Blue)));
        assert_eq!(grid.get(2, 4), Some(Some(Color::Yellow)));
        assert_eq!(grid.cells().iter().filter(|c| c.is_some()).count(), 3);
    }

    #[test]
    fn test_lock_writes_piece_color() {
        let mut grid = Grid::new(13, 20);
        let piece = Piece::spawn(PieceKind::O, Color::Magenta, 13);
        grid.lock(&piece);

        let locked: Vec<_> = piece.filled_cells().collect();
        assert_eq!(locked.len(), 4);
        for (x, y) in locked {
            assert_eq!(grid.get(x, y), Some(Some(Color::Magenta)));
        }
    }
}
