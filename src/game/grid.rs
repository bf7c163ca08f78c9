//! Board geometry: cells, pixel conversion and bounds.
//!
//! The board is a fixed 40x30 grid of 20-unit cells. Pixel coordinates refer to
//! the centre of a cell, so the playing field spans `[0, 800) x [0, 600)`.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Number of columns on the board
pub const BOARD_COLS: i32 = 40;
/// Number of rows on the board
pub const BOARD_ROWS: i32 = 30;
/// Edge length of one cell in pixel units
pub const CELL_SIZE: i32 = 20;

/// A position on the board in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Neighbouring cell one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// True when the cell lies inside the board
    pub fn is_on_board(self) -> bool {
        (0..BOARD_COLS).contains(&self.col) && (0..BOARD_ROWS).contains(&self.row)
    }
}

/// Pixel position of the centre of `cell`
pub fn cell_to_pixel(cell: Cell) -> (i32, i32) {
    (
        cell.col * CELL_SIZE + CELL_SIZE / 2,
        cell.row * CELL_SIZE + CELL_SIZE / 2,
    )
}

/// Playing field bounds as `(min_x, max_x, min_y, max_y)`; max values are exclusive
pub fn pixel_bounds() -> (i32, i32, i32, i32) {
    (0, BOARD_COLS * CELL_SIZE, 0, BOARD_ROWS * CELL_SIZE)
}

/// Every cell of the board, row by row
pub fn all_cells() -> impl Iterator<Item = Cell> {
    (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).map(move |col| Cell::new(col, row)))
}

/// Total number of cells on the board
pub const fn cell_count() -> usize {
    (BOARD_COLS * BOARD_ROWS) as usize
}
