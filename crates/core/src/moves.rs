//! Valid move enumeration
//!
//! Every cell is test-swapped with its upper neighbour and then its left
//! neighbour: the pair is swapped, the board is checked for a match, and the
//! swap is undone. Trying only "above" and "left" visits each physical edge
//! exactly once, so the output has no duplicates. Moves come out in row-major
//! order of the lower/right cell, the "above" swap first.
//!
//! The trial swaps run on a scratch copy, so the caller's grid is never touched.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::matches::has_match;
use crate::types::{Coord, Move};

/// All swaps that would create at least one match
pub fn valid_moves(grid: &Grid) -> Vec<Move> {
    let mut scratch = grid.clone();
    let mut moves = Vec::new();
    for coord in grid.coords() {
        moves.extend(try_cell_edges(&mut scratch, coord));
    }
    moves
}

/// True if at least one valid move exists
pub fn has_valid_move(grid: &Grid) -> bool {
    let mut scratch = grid.clone();
    grid.coords()
        .any(|coord| !try_cell_edges(&mut scratch, coord).is_empty())
}

/// Try the up-to-two edges owned by `coord`.
///
/// `scratch` is restored before returning.
fn try_cell_edges(scratch: &mut Grid, coord: Coord) -> ArrayVec<Move, 2> {
    let mut found = ArrayVec::new();

    if coord.row > 0 {
        let above = Coord::new(coord.row - 1, coord.col);
        if swap_makes_match(scratch, above, coord) {
            found.push(Move::new(above, coord));
        }
    }

    if coord.col > 0 {
        let left = Coord::new(coord.row, coord.col - 1);
        if swap_makes_match(scratch, left, coord) {
            found.push(Move::new(left, coord));
        }
    }

    found
}

fn swap_makes_match(scratch: &mut Grid, a: Coord, b: Coord) -> bool {
    // Both coordinates come from `Grid::coords`, so the swaps cannot fail.
    if scratch.swap(a, b).is_err() {
        return false;
    }
    let matched = has_match(scratch);
    let _ = scratch.swap(a, b);
    matched
}
