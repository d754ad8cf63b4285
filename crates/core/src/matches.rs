//! Match detection - maximal runs of equal tiles along rows and columns
//!
//! Rows are scanned top to bottom (each left to right), then columns left to
//! right (each top to bottom). The output order follows the scan order, so all
//! row matches precede all column matches. A cell can belong to one row match
//! and one column match at the same time.
//!
//! Empty cells never take part in a run.

use crate::grid::Grid;
use crate::types::{Coord, Tile, MIN_RUN};

/// Axis a match was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

/// A maximal run of at least [`MIN_RUN`] equal tiles
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub tile: Tile,
    pub axis: Axis,
    /// Member cells in scan order
    pub cells: Vec<Coord>,
}

impl Match {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

/// All matches found in one scan
pub type MatchSet = Vec<Match>;

/// Scan the grid for every match, rows first, then columns
pub fn detect_matches(grid: &Grid) -> MatchSet {
    let mut matches = Vec::new();

    for row in 0..grid.rows() {
        let line = (0..grid.cols()).map(|col| Coord::new(row, col));
        scan_line(grid, line, Axis::Row, &mut matches);
    }

    for col in 0..grid.cols() {
        let line = (0..grid.rows()).map(|row| Coord::new(row, col));
        scan_line(grid, line, Axis::Column, &mut matches);
    }

    matches
}

/// True if the grid contains at least one match.
///
/// Same answer as `!detect_matches(grid).is_empty()` without allocating.
pub fn has_match(grid: &Grid) -> bool {
    (0..grid.rows()).any(|row| line_has_run(grid, (0..grid.cols()).map(|col| Coord::new(row, col))))
        || (0..grid.cols())
            .any(|col| line_has_run(grid, (0..grid.rows()).map(|row| Coord::new(row, col))))
}

/// Distinct cells covered by a match set, row-major sorted
pub fn matched_cells(matches: &[Match]) -> Vec<Coord> {
    let mut cells: Vec<Coord> = matches.iter().flat_map(|m| m.cells.iter().copied()).collect();
    cells.sort_unstable();
    cells.dedup();
    cells
}

fn scan_line(
    grid: &Grid,
    line: impl Iterator<Item = Coord>,
    axis: Axis,
    out: &mut MatchSet,
) {
    let mut run: Vec<Coord> = Vec::new();
    let mut run_tile: Option<Tile> = None;

    for coord in line {
        let tile = grid.tile(coord);
        if tile.is_some() && tile == run_tile {
            run.push(coord);
            continue;
        }

        close_run(run_tile, &mut run, axis, out);
        run_tile = tile;
        if tile.is_some() {
            run.push(coord);
        }
    }

    close_run(run_tile, &mut run, axis, out);
}

/// Emit the run if it is long enough; always leaves `run` empty.
fn close_run(tile: Option<Tile>, run: &mut Vec<Coord>, axis: Axis, out: &mut MatchSet) {
    match tile {
        Some(tile) if run.len() >= MIN_RUN => out.push(Match {
            tile,
            axis,
            cells: std::mem::take(run),
        }),
        _ => run.clear(),
    }
}

fn line_has_run(grid: &Grid, line: impl Iterator<Item = Coord>) -> bool {
    let mut prev: Option<Tile> = None;
    let mut len = 0usize;

    for coord in line {
        let tile = grid.tile(coord);
        if tile.is_some() && tile == prev {
            len += 1;
            if len >= MIN_RUN {
                return true;
            }
        } else {
            prev = tile;
            len = usize::from(tile.is_some());
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(usize, usize)]) -> Vec<Coord> {
        list.iter().map(|&(r, c)| Coord::new(r, c)).collect()
    }

    #[test]
    fn test_no_match_for_pairs() {
        let grid = Grid::parse(&["aab", "bcc", "dde"]).unwrap();
        assert!(detect_matches(&grid).is_empty());
        assert!(!has_match(&grid));
    }

    #[test]
    fn test_row_run_at_line_end() {
        let grid = Grid::parse(&["abccc"]).unwrap();
        let matches = detect_matches(&grid);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tile, Tile::new('c'));
        assert_eq!(matches[0].axis, Axis::Row);
        assert_eq!(matches[0].cells, cells(&[(0, 2), (0, 3), (0, 4)]));
    }

    #[test]
    fn test_long_run_is_a_single_match() {
        let grid = Grid::parse(&["xaaaaax"]).unwrap();
        let matches = detect_matches(&grid);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].len(), 5);
    }

    #[test]
    fn test_two_runs_in_one_line() {
        let grid = Grid::parse(&["aaabbb"]).unwrap();
        let matches = detect_matches(&grid);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].tile, Tile::new('a'));
        assert_eq!(matches[1].tile, Tile::new('b'));
    }

    #[test]
    fn test_rows_precede_columns() {
        let grid = Grid::parse(&["aaa", "xyb", "zwb", "uvb"]).unwrap();
        let matches = detect_matches(&grid);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].axis, Axis::Row);
        assert_eq!(matches[1].axis, Axis::Column);
        assert_eq!(matches[1].cells, cells(&[(1, 2), (2, 2), (3, 2)]));
    }

    #[test]
    fn test_empty_cells_break_runs() {
        let mut grid = Grid::parse(&["aaaa"]).unwrap();
        grid.set(Coord::new(0, 1), None).unwrap();
        assert!(detect_matches(&grid).is_empty());
        assert!(!has_match(&grid));

        let mut grid = Grid::parse(&["abc", "abc", "abc"]).unwrap();
        for col in 0..3 {
            grid.set(Coord::new(1, col), None).unwrap();
        }
        // A row of Empty cells is not a match either.
        assert!(detect_matches(&grid).is_empty());
    }

    #[test]
    fn test_matched_cells_dedups_overlap() {
        let grid = Grid::parse(&["aaa", "axy", "azw"]).unwrap();
        let matches = detect_matches(&grid);
        assert_eq!(matches.len(), 2);
        let covered = matched_cells(&matches);
        assert_eq!(covered, cells(&[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)]));
    }
}
