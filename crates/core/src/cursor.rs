//! Cursor and selection - the source of coordinates for swaps
//!
//! The cursor is clamped to the board. At most one cell is selected at a time.

use crate::error::GameError;
use crate::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    rows: usize,
    cols: usize,
    position: Coord,
    selected: Option<Coord>,
}

impl Cursor {
    /// Cursor at the top-left cell with nothing selected
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            position: Coord::new(0, 0),
            selected: None,
        }
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn up(&mut self) -> bool {
        if self.position.row == 0 {
            return false;
        }
        self.position.row -= 1;
        true
    }

    pub fn down(&mut self) -> bool {
        if self.position.row + 1 >= self.rows {
            return false;
        }
        self.position.row += 1;
        true
    }

    pub fn left(&mut self) -> bool {
        if self.position.col == 0 {
            return false;
        }
        self.position.col -= 1;
        true
    }

    pub fn right(&mut self) -> bool {
        if self.position.col + 1 >= self.cols {
            return false;
        }
        self.position.col += 1;
        true
    }

    /// Jump straight to `coord`
    pub fn move_to(&mut self, coord: Coord) -> Result<(), GameError> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return Err(GameError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.position = coord;
        Ok(())
    }

    /// Select the cell under the cursor, replacing any earlier selection
    pub fn select(&mut self) {
        self.selected = Some(self.position);
    }

    /// Drop the selection, returning what was selected
    pub fn clear_selection(&mut self) -> Option<Coord> {
        self.selected.take()
    }
}
