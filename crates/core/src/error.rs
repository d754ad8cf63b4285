//! Error taxonomy for the rules engine.
//!
//! None of these are transient: every core operation is deterministic, so an
//! error always means either a caller defect (bad coordinates, bad board
//! data) or one of the two domain conditions a player can hit
//! ([`GameError::NoValidMoves`], [`GameError::InvalidAdjacency`]).

use std::fmt;

use crate::types::{Coord, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate outside `[0, rows) x [0, cols)`.
    OutOfBounds { coord: Coord, rows: usize, cols: usize },
    /// Swap requested between cells that do not share an edge.
    InvalidAdjacency { a: Coord, b: Coord },
    /// The board has no legal move left.
    NoValidMoves,
    /// A cascade is still resolving; the board is locked.
    CascadeInFlight,
    /// A supplied board contains an Empty cell.
    EmptyCell { coord: Coord },
    /// Supplied rows have different lengths.
    RaggedRows,
    /// Zero rows or zero columns.
    EmptyBoard,
    /// Fewer than two tiles in the alphabet.
    AlphabetTooSmall { len: usize },
    /// The same tile appears twice in an alphabet.
    DuplicateTile { tile: Tile },
    /// A tile that takes no terminal column, such as a variation selector or
    /// combining mark.
    ZeroWidthTile { tile: Tile },
}

impl GameError {
    pub fn code(self) -> &'static str {
        match self {
            GameError::OutOfBounds { .. } => "out_of_bounds",
            GameError::InvalidAdjacency { .. } => "invalid_adjacency",
            GameError::NoValidMoves => "no_valid_moves",
            GameError::CascadeInFlight => "cascade_in_flight",
            GameError::EmptyCell { .. }
            | GameError::RaggedRows
            | GameError::EmptyBoard => "invalid_board",
            GameError::AlphabetTooSmall { .. }
            | GameError::DuplicateTile { .. }
            | GameError::ZeroWidthTile { .. } => "invalid_alphabet",
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfBounds { coord, rows, cols } => {
                write!(f, "coordinate {coord} is outside the {rows}x{cols} board")
            }
            GameError::InvalidAdjacency { a, b } => {
                write!(f, "cells {a} and {b} are not adjacent")
            }
            GameError::NoValidMoves => write!(f, "no valid moves left on the board"),
            GameError::CascadeInFlight => write!(f, "the board is still resolving"),
            GameError::EmptyCell { coord } => write!(f, "cell {coord} is empty"),
            GameError::RaggedRows => write!(f, "board rows have different lengths"),
            GameError::EmptyBoard => write!(f, "board needs at least one row and one column"),
            GameError::AlphabetTooSmall { len } => {
                write!(f, "alphabet needs at least 2 tiles, got {len}")
            }
            GameError::DuplicateTile { tile } => write!(f, "tile {tile} appears twice"),
            GameError::ZeroWidthTile { tile } => {
                write!(f, "tile U+{:04X} has no visible width", tile.symbol() as u32)
            }
        }
    }
}

impl std::error::Error for GameError {}
