//! Dealing - filling a fresh board before play starts
//!
//! A deal never relies on the cascade to clean up a random fill: cells are
//! filled in row-major order with tiles that cannot complete a run with the
//! two cells to their left or the two above. With three or more tiles that
//! always succeeds in one pass. With two tiles a cell can be boxed in, and the
//! fill backs up within a bounded number of steps.

use arrayvec::ArrayVec;
use log::{debug, warn};

use crate::cascade::{fill_empty, Cascade};
use crate::error::GameError;
use crate::grid::Grid;
use crate::moves::has_valid_move;
use crate::tiles::TileSource;
use crate::types::{Coord, Tile, DEAL_STEPS_PER_CELL, MAX_DEAL_ATTEMPTS};

/// Deal a settled board, re-dealing while it has no valid move. Nothing is
/// scored. When every attempt comes up stuck the last board is kept.
pub fn deal<S: TileSource + ?Sized>(grid: &mut Grid, tiles: &mut S) -> Result<(), GameError> {
    for attempt in 1..=MAX_DEAL_ATTEMPTS {
        grid.clear();
        if !fill_without_runs(grid, tiles)? {
            debug!("deal #{attempt} fell back to a plain fill");
        }
        // A no-op unless the fill fell back.
        Cascade::new().run(grid, tiles, |_| {});
        if has_valid_move(grid) {
            debug!("deal #{attempt} accepted");
            return Ok(());
        }
        debug!("deal #{attempt} has no valid move");
    }
    warn!("no playable board after {MAX_DEAL_ATTEMPTS} deals; starting without valid moves");
    Ok(())
}

/// Fill every cell of a cleared grid so that no run of three forms.
///
/// Returns `Ok(false)` when the source ran out of options or the step budget
/// ran out; the remaining cells are then filled plainly and may hold matches.
pub fn fill_without_runs<S: TileSource + ?Sized>(
    grid: &mut Grid,
    tiles: &mut S,
) -> Result<bool, GameError> {
    let coords: Vec<Coord> = grid.coords().collect();
    let mut tried: Vec<Vec<Tile>> = vec![Vec::new(); coords.len()];
    let mut budget = coords.len().saturating_mul(DEAL_STEPS_PER_CELL);
    let mut i = 0;

    while i < coords.len() {
        if budget == 0 {
            fill_empty(grid, tiles);
            return Ok(false);
        }
        budget -= 1;

        let coord = coords[i];
        let mut avoid: Vec<Tile> = run_completions(grid, coord).to_vec();
        avoid.extend_from_slice(&tried[i]);

        match tiles.next_tile_avoiding(&avoid) {
            Some(tile) => {
                tried[i].push(tile);
                grid.set(coord, Some(tile))?;
                i += 1;
            }
            None if i == 0 => {
                fill_empty(grid, tiles);
                return Ok(false);
            }
            None => {
                // Boxed in: give the previous cell another tile.
                tried[i].clear();
                i -= 1;
                grid.set(coords[i], None)?;
            }
        }
    }
    Ok(true)
}

/// Tiles that would complete a run at `coord` with the two filled cells to
/// its left or the two above.
fn run_completions(grid: &Grid, coord: Coord) -> ArrayVec<Tile, 2> {
    let mut out = ArrayVec::new();
    let Coord { row, col } = coord;

    if col >= 2 {
        if let (Some(a), Some(b)) = (
            grid.tile(Coord::new(row, col - 1)),
            grid.tile(Coord::new(row, col - 2)),
        ) {
            if a == b {
                out.push(a);
            }
        }
    }
    if row >= 2 {
        if let (Some(a), Some(b)) = (
            grid.tile(Coord::new(row - 1, col)),
            grid.tile(Coord::new(row - 2, col)),
        ) {
            if a == b && !out.contains(&a) {
                out.push(a);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::has_match;
    use crate::tiles::{Alphabet, RandomTiles, ScriptedTiles};

    #[test]
    fn test_run_completions() {
        let mut grid = Grid::empty(3, 3).unwrap();
        for (coord, symbol) in [
            (Coord::new(0, 0), 'a'),
            (Coord::new(0, 1), 'a'),
            (Coord::new(1, 2), 'b'),
            (Coord::new(0, 2), 'b'),
        ] {
            grid.set(coord, Some(Tile::new(symbol))).unwrap();
        }
        assert_eq!(
            run_completions(&grid, Coord::new(0, 2)).as_slice(),
            &[Tile::new('a')]
        );
        assert_eq!(
            run_completions(&grid, Coord::new(2, 2)).as_slice(),
            &[Tile::new('b')]
        );
        assert!(run_completions(&grid, Coord::new(2, 0)).is_empty());
    }

    #[test]
    fn test_fill_has_no_runs() {
        for seed in [1, 2, 3, 99] {
            let mut grid = Grid::empty(9, 9).unwrap();
            let mut tiles = RandomTiles::new(Alphabet::parse("abc").unwrap(), seed);
            assert_eq!(fill_without_runs(&mut grid, &mut tiles), Ok(true));
            assert!(!grid.has_empty());
            assert!(!has_match(&grid));
        }
    }

    #[test]
    fn test_two_tiles_back_up_instead_of_matching() {
        for seed in [5, 6, 7] {
            let mut grid = Grid::empty(16, 16).unwrap();
            let mut tiles = RandomTiles::new(Alphabet::parse("ab").unwrap(), seed);
            assert_eq!(fill_without_runs(&mut grid, &mut tiles), Ok(true));
            assert!(!grid.has_empty());
            assert!(!has_match(&grid));
        }
    }

    #[test]
    fn test_single_symbol_source_falls_back() {
        let mut grid = Grid::empty(3, 3).unwrap();
        let mut tiles = ScriptedTiles::from_symbols("z");
        assert_eq!(fill_without_runs(&mut grid, &mut tiles), Ok(false));
        assert!(!grid.has_empty());
    }
}
