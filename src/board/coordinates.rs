//! Pixel to board-cell mapping
//!
//! The window draws the board with its origin at the top-left while board
//! rows count up from the red edge at the bottom, so the row axis flips on
//! the way through. Pure and stateless; geometry comes from `SessionConfig`.

use super::BoardCell;
use crate::config::SessionConfig;

/// Screen-space rectangle for sprite placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Maps pointer pixels to board cells and back.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    cell_size: i32,
    rows: i32,
}

impl CoordinateMapper {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            cell_size: config.cell_size,
            rows: config.board_rows,
        }
    }

    /// Translate a pointer position into a board cell.
    ///
    /// No error path: clicks outside the board grid yield out-of-range
    /// cells, which downstream components reject.
    pub fn to_board_cell(&self, px: i32, py: i32) -> BoardCell {
        let col = px.div_euclid(self.cell_size);
        let row = (self.rows - 1) - py.div_euclid(self.cell_size);
        BoardCell::new(col, row)
    }

    /// Inverse mapping, used to place a piece sprite on its cell.
    pub fn to_pixel_rect(&self, cell: BoardCell) -> PixelRect {
        PixelRect {
            x: cell.col * self.cell_size,
            y: ((self.rows - 1) - cell.row) * self.cell_size,
            w: self.cell_size,
            h: self.cell_size,
        }
    }
}
