//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The classic board is 8x8, but every algorithm works on a generic
//! `rows x cols` grid:
//!
//! - **Rows**: indexed top to bottom, `0..rows`
//! - **Cols**: indexed left to right, `0..cols`
//! - **Minimum run**: 3 equal tiles along one axis form a match
//!
//! # Presentation Timing Constants
//!
//! Timing values are in milliseconds and are purely cosmetic: the outcome of a
//! cascade never depends on them.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SCAN_DELAY_MS` | 700 | Pause before matches are highlighted |
//! | `REMOVE_DELAY_MS` | 900 | Highlight time before matched tiles vanish |
//! | `FALL_DELAY_MS` | 1100 | Pause before tiles fall into the gaps |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Coord, GameAction, Move, Tile, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let lemon = Tile::new('🍋');
//! assert_eq!(lemon.symbol(), '🍋');
//!
//! let a = Coord::new(0, 0);
//! let b = Coord::new(1, 0);
//! assert!(a.is_adjacent(b));
//! assert_eq!(Move::new(a, b).as_array(), [0, 0, 1, 0]);
//!
//! assert_eq!(GameAction::from_str("hint"), Some(GameAction::Hint));
//! assert_eq!((DEFAULT_ROWS, DEFAULT_COLS), (8, 8));
//! ```

use std::fmt;

/// Default board height (8 rows)
pub const DEFAULT_ROWS: usize = 8;

/// Default board width (8 columns)
pub const DEFAULT_COLS: usize = 8;

/// Largest row or column count the front-end accepts
pub const MAX_BOARD_SIDE: usize = 64;

/// Minimum number of equal, contiguous tiles that form a match
pub const MIN_RUN: usize = 3;

/// Smallest usable alphabet size
pub const MIN_ALPHABET: usize = 2;

/// The default tile alphabet
pub const DEFAULT_TILES: [char; 7] = ['🥝', '🍋', '🍊', '🍌', '🥥', '🍇', '🍉'];

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Pause before a freshly detected set of matches is highlighted
pub const SCAN_DELAY_MS: u32 = 700;

/// How long matched tiles stay highlighted before removal
pub const REMOVE_DELAY_MS: u32 = 900;

/// Pause between removal and gravity
pub const FALL_DELAY_MS: u32 = 1100;

/// Upper bound on re-deals when a stabilized board has no valid move
pub const MAX_DEAL_ATTEMPTS: u32 = 64;

/// Fill steps allowed per cell before a deal falls back to a plain fill
pub const DEAL_STEPS_PER_CELL: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation_timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(SCAN_DELAY_MS, 700);
        assert_eq!(REMOVE_DELAY_MS, 900);
        assert_eq!(FALL_DELAY_MS, 1100);
    }

    #[test]
    fn default_alphabet_is_distinct() {
        for (i, a) in DEFAULT_TILES.iter().enumerate() {
            for b in &DEFAULT_TILES[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(DEFAULT_TILES.len() >= MIN_ALPHABET);
    }

    #[test]
    fn coord_adjacency_is_manhattan_one() {
        let c = Coord::new(3, 3);
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(c.is_adjacent(Coord::new(3, 4)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(4, 4)));
        assert!(!c.is_adjacent(Coord::new(3, 5)));
        assert_eq!(c.manhattan(Coord::new(0, 0)), 6);
    }

    #[test]
    fn game_action_str_round_trip() {
        for action in GameAction::ALL {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}

/// A symbol occupying one grid cell
///
/// Tiles have no identity beyond their symbol: two tiles with the same symbol
/// are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile(char);

impl Tile {
    pub const fn new(symbol: char) -> Self {
        Self(symbol)
    }

    pub const fn symbol(self) -> char {
        self.0
    }
}

impl From<char> for Tile {
    fn from(symbol: char) -> Self {
        Self(symbol)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell on the game board
///
/// - `None`: Empty (only observable while a cascade is in flight)
/// - `Some(Tile)`: Cell holds the given tile
pub type Cell = Option<Tile>;

/// A `(row, col)` grid coordinate, row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A swap of two adjacent cells that would create at least one match
///
/// `a` is the upper (or left) cell, `b` the lower (or right) one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub a: Coord,
    pub b: Coord,
}

impl Move {
    pub const fn new(a: Coord, b: Coord) -> Self {
        Self { a, b }
    }

    /// Flatten to `[row_a, col_a, row_b, col_b]`
    pub fn as_array(&self) -> [usize; 4] {
        [self.a.row, self.a.col, self.b.row, self.b.col]
    }

    /// True if either endpoint is `coord`
    pub fn touches(&self, coord: Coord) -> bool {
        self.a == coord || self.b == coord
    }
}

/// Player commands routed from the input layer
///
/// Each action maps to one bound key in the terminal front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one cell up
    CursorUp,
    /// Move the cursor one cell down
    CursorDown,
    /// Move the cursor one cell left
    CursorLeft,
    /// Move the cursor one cell right
    CursorRight,
    /// Select the cursor cell, or swap it with the selected cell
    SelectOrSwap,
    /// Highlight one random valid move
    Hint,
    /// Highlight every valid move
    ShowAllMoves,
    /// Report session totals
    ShowScore,
    /// Report the counters of the most recent swap
    ShowSwapScore,
    /// Deal a fresh board
    Restart,
}

impl GameAction {
    pub const ALL: [GameAction; 10] = [
        GameAction::CursorUp,
        GameAction::CursorDown,
        GameAction::CursorLeft,
        GameAction::CursorRight,
        GameAction::SelectOrSwap,
        GameAction::Hint,
        GameAction::ShowAllMoves,
        GameAction::ShowScore,
        GameAction::ShowSwapScore,
        GameAction::Restart,
    ];

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("cursorUp"), Some(GameAction::CursorUp));
    /// assert_eq!(GameAction::from_str("selectorswap"), Some(GameAction::SelectOrSwap));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "selectorswap" => Some(GameAction::SelectOrSwap),
            "hint" => Some(GameAction::Hint),
            "showallmoves" => Some(GameAction::ShowAllMoves),
            "showscore" => Some(GameAction::ShowScore),
            "showswapscore" => Some(GameAction::ShowSwapScore),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::SelectOrSwap => "selectOrSwap",
            GameAction::Hint => "hint",
            GameAction::ShowAllMoves => "showAllMoves",
            GameAction::ShowScore => "showScore",
            GameAction::ShowSwapScore => "showSwapScore",
            GameAction::Restart => "restart",
        }
    }

    /// Actions that touch the grid or query moves; refused mid-cascade
    pub fn needs_idle_board(&self) -> bool {
        matches!(
            self,
            GameAction::SelectOrSwap
                | GameAction::Hint
                | GameAction::ShowAllMoves
                | GameAction::Restart
        )
    }
}
