//! Session module - one game: the grid, its tile source, and the score
//!
//! Every public operation either completes fully or fails before touching the
//! board. Swaps are driven in two halves: [`Session::begin_swap`] validates and
//! commits (or reverts) the exchange, and [`Session::advance`] walks the
//! cascade one stage at a time. [`Session::attempt_swap`] does both at once.

use log::{debug, info};

use crate::cascade::{Cascade, CascadeEvent, CascadeStage};
use crate::deal::deal;
use crate::error::GameError;
use crate::grid::Grid;
use crate::matches::{detect_matches, matched_cells, MatchSet};
use crate::moves::{has_valid_move, valid_moves};
use crate::scoring::{Removal, ScoreState};
use crate::snapshot::GameSnapshot;
use crate::tiles::{Alphabet, RandomTiles, TileSource};
use crate::types::{Coord, Move, Tile};

/// Result of a swap attempt that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    /// False when the swap formed no match and was reverted
    pub committed: bool,
    /// Matches the swap created (empty when reverted)
    pub matches: MatchSet,
}

/// One cascade transition plus how its removal was booked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub event: CascadeEvent,
    pub removal: Removal,
}

/// Settled view returned by [`Session::query`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub grid: Vec<Vec<Tile>>,
    pub score: ScoreState,
    pub valid_moves: Vec<Move>,
}

#[derive(Debug, Clone)]
pub struct Session<S = RandomTiles> {
    grid: Grid,
    tiles: S,
    score: ScoreState,
    cascade: Option<Cascade>,
}

impl Session<RandomTiles> {
    /// Random board from `alphabet`, reproducible from `seed`
    pub fn new(rows: usize, cols: usize, alphabet: Alphabet, seed: u32) -> Result<Self, GameError> {
        Self::initialize(rows, cols, RandomTiles::new(alphabet, seed))
    }
}

impl<S: TileSource> Session<S> {
    /// Deal a stable board: filled, free of matches, and (unless the deal
    /// attempts run out) with at least one valid move.
    pub fn initialize(rows: usize, cols: usize, mut tiles: S) -> Result<Self, GameError> {
        let mut grid = Grid::empty(rows, cols)?;
        deal(&mut grid, &mut tiles)?;
        info!("new {rows}x{cols} session");
        Ok(Self {
            grid,
            tiles,
            score: ScoreState::new(),
            cascade: None,
        })
    }

    /// Adopt a prepared board as-is. It must be full; it may contain matches
    /// or have no valid move.
    pub fn from_grid(grid: Grid, tiles: S) -> Result<Self, GameError> {
        if let Some(coord) = grid.first_empty() {
            return Err(GameError::EmptyCell { coord });
        }
        Ok(Self {
            grid,
            tiles,
            score: ScoreState::new(),
            cascade: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// A cascade is in flight
    pub fn is_busy(&self) -> bool {
        self.cascade.is_some()
    }

    pub fn stage(&self) -> CascadeStage {
        self.cascade.as_ref().map_or(CascadeStage::Idle, Cascade::stage)
    }

    fn ensure_idle(&self) -> Result<(), GameError> {
        if self.is_busy() {
            return Err(GameError::CascadeInFlight);
        }
        Ok(())
    }

    pub fn valid_moves(&self) -> Result<Vec<Move>, GameError> {
        self.ensure_idle()?;
        Ok(valid_moves(&self.grid))
    }

    /// Settled board with no valid move
    pub fn is_stuck(&self) -> bool {
        !self.is_busy() && !has_valid_move(&self.grid)
    }

    pub fn query(&self) -> Result<Query, GameError> {
        self.ensure_idle()?;
        Ok(Query {
            grid: self.grid.to_tiles()?,
            score: self.score,
            valid_moves: valid_moves(&self.grid),
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill the board part of `out` in place, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.board.clear();
        out.board.extend_from_slice(self.grid.cells());
        out.stage = self.stage();
        out.matched.clear();
        if let Some(cascade) = &self.cascade {
            out.matched.extend(matched_cells(cascade.matches()));
        }
        out.score = self.score;
        out.valid_moves = if self.is_busy() {
            None
        } else {
            Some(valid_moves(&self.grid).len())
        };
    }

    /// Validate and perform a swap, leaving any cascade pending.
    ///
    /// Checks run in order: cascade in flight, bounds, whether the board has
    /// any valid move at all, then adjacency. A swap that lines nothing up is
    /// reverted and reported with `committed == false`.
    pub fn begin_swap(&mut self, a: Coord, b: Coord) -> Result<SwapOutcome, GameError> {
        self.ensure_idle()?;
        self.grid.check(a)?;
        self.grid.check(b)?;
        if !has_valid_move(&self.grid) {
            return Err(GameError::NoValidMoves);
        }
        if !a.is_adjacent(b) {
            return Err(GameError::InvalidAdjacency { a, b });
        }

        self.grid.swap(a, b)?;
        let matches = detect_matches(&self.grid);
        if matches.is_empty() {
            self.grid.swap(a, b)?;
            debug!("swap {a} <-> {b} reverted");
            return Ok(SwapOutcome {
                committed: false,
                matches,
            });
        }

        debug!("swap {a} <-> {b} committed with {} match(es)", matches.len());
        self.score.begin_round();
        self.cascade = Some(Cascade::with_matches(matches.clone()));
        Ok(SwapOutcome {
            committed: true,
            matches,
        })
    }

    /// Perform the next cascade transition; `None` when nothing is pending
    pub fn advance(&mut self) -> Option<StepReport> {
        let cascade = self.cascade.as_mut()?;
        let event = cascade.step(&mut self.grid, &mut self.tiles);

        let removal = match event {
            CascadeEvent::Removed { amount } => self.score.record_removal(amount),
            _ => Removal::None,
        };

        if event == CascadeEvent::Settled {
            self.cascade = None;
            self.score.commit_round();
            let round = self.score.round();
            info!(
                "swap settled: {} removed, {} combo(s) for {} more",
                round.removed, round.combos, round.combo_removed
            );
        }

        Some(StepReport { event, removal })
    }

    /// Run the pending cascade to completion
    pub fn finish_cascade(&mut self) -> Vec<StepReport> {
        let mut reports = Vec::new();
        while let Some(report) = self.advance() {
            reports.push(report);
        }
        reports
    }

    /// Swap two adjacent cells and resolve every resulting cascade
    pub fn attempt_swap(&mut self, a: Coord, b: Coord) -> Result<SwapOutcome, GameError> {
        let outcome = self.begin_swap(a, b)?;
        self.finish_cascade();
        Ok(outcome)
    }

    /// Deal a fresh board and zero the score
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.ensure_idle()?;
        deal(&mut self.grid, &mut self.tiles)?;
        self.score = ScoreState::new();
        info!("session restarted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::has_match;
    use crate::tiles::ScriptedTiles;

    fn session(rows: &[&str], refill: &str) -> Session<ScriptedTiles> {
        Session::from_grid(
            Grid::parse(rows).unwrap(),
            ScriptedTiles::from_symbols(refill),
        )
        .unwrap()
    }

    #[test]
    fn test_initialize_is_stable() {
        for seed in [1, 7, 42, 12345] {
            let session = Session::new(8, 8, Alphabet::fruits(), seed).unwrap();
            assert!(!session.grid().has_empty());
            assert!(!has_match(session.grid()));
            assert!(!session.valid_moves().unwrap().is_empty());
            assert_eq!(session.score().total().total_removed(), 0);
        }
    }

    #[test]
    fn test_initialize_is_seeded() {
        let a = Session::new(6, 7, Alphabet::fruits(), 9).unwrap();
        let b = Session::new(6, 7, Alphabet::fruits(), 9).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_from_grid_rejects_empty_cells() {
        let mut grid = Grid::parse(&["ab", "cd"]).unwrap();
        grid.set(Coord::new(1, 0), None).unwrap();
        let err = Session::from_grid(grid, ScriptedTiles::from_symbols("x")).unwrap_err();
        assert_eq!(
            err,
            GameError::EmptyCell {
                coord: Coord::new(1, 0)
            }
        );
    }

    #[test]
    fn test_begin_swap_leaves_cascade_pending() {
        let mut s = session(&["wll", "lxy", "zuv"], "pqr");
        let outcome = s.begin_swap(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
        assert!(outcome.committed);
        assert!(s.is_busy());
        assert_eq!(s.stage(), CascadeStage::Removing);
        assert_eq!(s.query(), Err(GameError::CascadeInFlight));
        assert_eq!(
            s.begin_swap(Coord::new(2, 0), Coord::new(2, 1)),
            Err(GameError::CascadeInFlight)
        );
        assert_eq!(s.restart(), Err(GameError::CascadeInFlight));

        let snap = s.snapshot();
        assert!(snap.is_busy());
        assert_eq!(snap.valid_moves, None);
        assert_eq!(snap.matched.len(), 3);

        let reports = s.finish_cascade();
        assert_eq!(reports.last().map(|r| r.event), Some(CascadeEvent::Settled));
        assert!(!s.is_busy());
        assert!(s.advance().is_none());
    }

    #[test]
    fn test_reverted_swap_keeps_board() {
        let mut s = session(&["wll", "lxy", "zuv"], "pqr");
        let before = s.grid().clone();
        let outcome = s.attempt_swap(Coord::new(2, 1), Coord::new(2, 2)).unwrap();
        assert!(!outcome.committed);
        assert!(outcome.matches.is_empty());
        assert_eq!(s.grid(), &before);
        assert_eq!(*s.score(), ScoreState::new());
    }
}
