//! Grid module - the board of tiles
//!
//! The grid is a `rows x cols` matrix where each cell holds a tile or is Empty.
//! Uses a flat vector in row-major order (`row * cols + col`).
//! Coordinates: row 0 is the top row, col 0 is the leftmost column.
//!
//! Empty cells only exist transiently while a cascade is resolving; every
//! public constructor rejects them.

use crate::error::GameError;
use crate::types::{Cell, Coord, Tile};

/// The game board using flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a board with every cell Empty.
    ///
    /// Callers must fill it before handing it to a session.
    pub fn empty(rows: usize, cols: usize) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        })
    }

    /// Build a full board from rows of tiles
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, GameError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GameError::EmptyBoard);
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(GameError::RaggedRows);
        }

        let cells = rows.into_iter().flatten().map(Some).collect();
        Ok(Self {
            rows: height,
            cols: width,
            cells,
        })
    }

    /// Build a board from strings, one char per tile.
    ///
    /// ```
    /// use tui_match3_core::Grid;
    ///
    /// let grid = Grid::parse(&["abc", "def"]).unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (2, 3));
    /// ```
    pub fn parse(rows: &[&str]) -> Result<Self, GameError> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.chars().map(Tile::new).collect())
                .collect(),
        )
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return None;
        }
        Some(coord.row * self.cols + coord.col)
    }

    fn checked_index(&self, coord: Coord) -> Result<usize, GameError> {
        self.index(coord).ok_or(GameError::OutOfBounds {
            coord,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Fail with `OutOfBounds` unless `coord` is on the board
    pub fn check(&self, coord: Coord) -> Result<(), GameError> {
        self.checked_index(coord).map(|_| ())
    }

    /// Get cell at `coord`; `None` if out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Get the tile at `coord`; `None` if out of bounds or Empty
    pub fn tile(&self, coord: Coord) -> Option<Tile> {
        self.get(coord).flatten()
    }

    /// Set cell at `coord`
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<(), GameError> {
        let idx = self.checked_index(coord)?;
        self.cells[idx] = cell;
        Ok(())
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        let idx = self.index(coord)?;
        self.cells.get_mut(idx)
    }

    /// Empty every cell
    pub(crate) fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), GameError> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    pub fn is_empty_at(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(None))
    }

    /// Number of Empty cells on the whole board
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// True when any cell is Empty
    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// First Empty coordinate in row-major order
    pub fn first_empty(&self) -> Option<Coord> {
        self.cells
            .iter()
            .position(Option::is_none)
            .map(|idx| Coord::new(idx / self.cols, idx % self.cols))
    }

    /// Iterate all coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }

    /// Row-major slice of the cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy out as a matrix of tiles; fails on the first Empty cell
    pub fn to_tiles(&self) -> Result<Vec<Vec<Tile>>, GameError> {
        if let Some(coord) = self.first_empty() {
            return Err(GameError::EmptyCell { coord });
        }
        Ok(self
            .cells
            .chunks(self.cols)
            .map(|row| row.iter().flatten().copied().collect())
            .collect())
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                match cell {
                    Some(tile) => write!(f, "{tile}")?,
                    None => write!(f, "_")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::empty(8, 6).unwrap();
        assert_eq!(grid.index(Coord::new(0, 0)), Some(0));
        assert_eq!(grid.index(Coord::new(0, 5)), Some(5));
        assert_eq!(grid.index(Coord::new(1, 0)), Some(6));
        assert_eq!(grid.index(Coord::new(7, 5)), Some(47));
        assert_eq!(grid.index(Coord::new(8, 0)), None);
        assert_eq!(grid.index(Coord::new(0, 6)), None);
    }

    #[test]
    fn test_grid_rejects_zero_size() {
        assert_eq!(Grid::empty(0, 4), Err(GameError::EmptyBoard));
        assert_eq!(Grid::from_rows(vec![]), Err(GameError::EmptyBoard));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GameError::EmptyBoard));
    }

    #[test]
    fn test_grid_rejects_ragged_rows() {
        assert_eq!(Grid::parse(&["ab", "c"]), Err(GameError::RaggedRows));
    }

    #[test]
    fn test_grid_set_out_of_bounds_fails_fast() {
        let mut grid = Grid::parse(&["ab", "cd"]).unwrap();
        let before = grid.clone();
        let err = grid.set(Coord::new(2, 0), None).unwrap_err();
        assert_eq!(
            err,
            GameError::OutOfBounds {
                coord: Coord::new(2, 0),
                rows: 2,
                cols: 2
            }
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_grid_swap() {
        let mut grid = Grid::parse(&["ab", "cd"]).unwrap();
        grid.swap(Coord::new(0, 0), Coord::new(1, 1)).unwrap();
        assert_eq!(grid, Grid::parse(&["db", "ca"]).unwrap());
        assert!(grid.swap(Coord::new(0, 0), Coord::new(0, 2)).is_err());
        assert_eq!(grid, Grid::parse(&["db", "ca"]).unwrap());
    }

    #[test]
    fn test_grid_empty_tracking() {
        let mut grid = Grid::parse(&["abc", "def"]).unwrap();
        assert!(!grid.has_empty());
        grid.set(Coord::new(1, 1), None).unwrap();
        grid.set(Coord::new(0, 2), None).unwrap();
        assert_eq!(grid.count_empty(), 2);
        assert_eq!(grid.first_empty(), Some(Coord::new(0, 2)));
        assert!(grid.is_empty_at(Coord::new(1, 1)));
        assert_eq!(
            grid.to_tiles(),
            Err(GameError::EmptyCell {
                coord: Coord::new(0, 2)
            })
        );
        assert_eq!(grid.to_string(), "ab_\nd_f\n");
    }

    #[test]
    fn test_grid_rows_roundtrip() {
        let grid = Grid::parse(&["ab", "cd", "ef"]).unwrap();
        let tiles = grid.to_tiles().unwrap();
        assert_eq!(Grid::from_rows(tiles).unwrap(), grid);
        assert_eq!(grid.coords().count(), 6);
        assert_eq!(grid.coords().nth(3), Some(Coord::new(1, 1)));
    }
}
