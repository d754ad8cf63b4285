//! Core rules module - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: the grid, match detection, move
//! enumeration, the cascade state machine, scoring and the swap controller.
//! It has **no dependencies** on UI, terminal, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or tile script) produces identical games
//! - **Testable**: Every rule is reachable without a terminal
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: rows x cols board of tiles, Empty only during a cascade
//! - [`matches`]: horizontal and vertical runs of three or more
//! - [`moves`]: every adjacent swap that would create a match
//! - [`cascade`]: remove / fall / rescan state machine
//! - [`scoring`]: base removal, combos, and session totals
//! - [`deal`]: run-free fill for fresh boards, re-dealt until playable
//! - [`session`]: initialize, query and attempt-swap over one board
//! - [`tiles`]: alphabets and tile sources (seeded random or scripted)
//! - [`cursor`]: cursor and single-cell selection
//!
//! # Game Rules
//!
//! - **Swap**: Two orthogonally adjacent cells exchange tiles; the swap is
//!   kept only if it lines up three or more
//! - **Cascade**: Matched tiles vanish, tiles above fall, new tiles drop in
//!   from the top, and the board is scanned again until nothing matches
//! - **Score**: The first removal of a swap is its base; each further
//!   removal in the same cascade is a combo
//! - **Game over**: A settled board without a valid move ends the game
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{Grid, ScriptedTiles, Session};
//! use tui_match3_core::types::Coord;
//!
//! let grid = Grid::parse(&["wll", "lxy", "zuv"]).unwrap();
//! let mut session = Session::from_grid(grid, ScriptedTiles::from_symbols("pqr")).unwrap();
//!
//! let outcome = session.attempt_swap(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
//! assert!(outcome.committed);
//! assert_eq!(session.score().total().removed, 3);
//! ```

pub mod cascade;
pub mod cursor;
pub mod deal;
pub mod error;
pub mod grid;
pub mod matches;
pub mod moves;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod tiles;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{apply_gravity, fill_empty, remove_matches, Cascade, CascadeEvent, CascadeStage};
pub use cursor::Cursor;
pub use deal::{deal, fill_without_runs};
pub use error::GameError;
pub use grid::Grid;
pub use matches::{detect_matches, has_match, matched_cells, Axis, Match, MatchSet};
pub use moves::{has_valid_move, valid_moves};
pub use rng::SimpleRng;
pub use scoring::{Removal, RoundScore, ScoreState};
pub use session::{Query, Session, StepReport, SwapOutcome};
pub use snapshot::GameSnapshot;
pub use tiles::{Alphabet, RandomTiles, ScriptedTiles, TileSource};
