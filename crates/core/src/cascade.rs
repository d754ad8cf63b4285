//! Cascade module - the remove / fall / rescan cycle after a committed swap
//!
//! The cascade is an explicit state machine:
//!
//! ```text
//! Idle <- Scanning -> Removing -> Falling -> Scanning -> ...
//! ```
//!
//! Each call to [`Cascade::step`] performs exactly one transition. Running it
//! to completion in a loop and running it one step per presentation frame go
//! through the same code, so pacing can never change the outcome.
//!
//! Once a cascade reaches `Idle` the grid holds no Empty cell and no match.

use log::debug;

use crate::grid::Grid;
use crate::matches::{detect_matches, matched_cells, Match, MatchSet};
use crate::tiles::TileSource;
use crate::types::Coord;

/// Where a cascade currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CascadeStage {
    /// Board is stable; nothing left to do
    #[default]
    Idle,
    /// Next step looks for matches
    Scanning,
    /// Matches are known; next step clears them
    Removing,
    /// Gaps are open; next step applies gravity and refills
    Falling,
}

impl CascadeStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CascadeStage::Idle => "idle",
            CascadeStage::Scanning => "scanning",
            CascadeStage::Removing => "removing",
            CascadeStage::Falling => "falling",
        }
    }
}

/// What one transition did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeEvent {
    /// Scanning found matches covering `cells` distinct cells
    Matched { matches: usize, cells: usize },
    /// Matched tiles were cleared; `amount` counts each cell once
    Removed { amount: u32 },
    /// Tiles fell into the gaps; `refilled` new tiles entered from the top
    Fell { refilled: usize },
    /// No match left; the cascade is over
    Settled,
}

/// One cascade, from the first removal to a stable board
#[derive(Debug, Clone, Default)]
pub struct Cascade {
    stage: CascadeStage,
    matches: MatchSet,
    /// Non-zero removal steps so far
    removals: u32,
}

impl Cascade {
    /// Start with a scan of the current board
    pub fn new() -> Self {
        Self {
            stage: CascadeStage::Scanning,
            matches: Vec::new(),
            removals: 0,
        }
    }

    /// Start from matches that are already known (skips the first scan)
    pub fn with_matches(matches: MatchSet) -> Self {
        if matches.is_empty() {
            return Self::new();
        }
        Self {
            stage: CascadeStage::Removing,
            matches,
            removals: 0,
        }
    }

    pub fn stage(&self) -> CascadeStage {
        self.stage
    }

    pub fn is_idle(&self) -> bool {
        self.stage == CascadeStage::Idle
    }

    /// Matches waiting to be removed (empty outside `Removing`)
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Number of removal steps that cleared at least one tile
    pub fn removals(&self) -> u32 {
        self.removals
    }

    /// Perform one transition
    pub fn step<S: TileSource + ?Sized>(&mut self, grid: &mut Grid, tiles: &mut S) -> CascadeEvent {
        let event = match self.stage {
            CascadeStage::Idle => CascadeEvent::Settled,
            CascadeStage::Scanning => {
                let matches = detect_matches(grid);
                if matches.is_empty() {
                    self.stage = CascadeStage::Idle;
                    CascadeEvent::Settled
                } else {
                    let cells = matched_cells(&matches).len();
                    let count = matches.len();
                    self.matches = matches;
                    self.stage = CascadeStage::Removing;
                    CascadeEvent::Matched {
                        matches: count,
                        cells,
                    }
                }
            }
            CascadeStage::Removing => {
                let amount = remove_matches(grid, &self.matches);
                self.matches.clear();
                if amount > 0 {
                    self.removals += 1;
                }
                self.stage = CascadeStage::Falling;
                CascadeEvent::Removed { amount }
            }
            CascadeStage::Falling => {
                let refilled = apply_gravity(grid, tiles);
                self.stage = CascadeStage::Scanning;
                CascadeEvent::Fell { refilled }
            }
        };

        debug!("cascade step -> {}: {:?}", self.stage.as_str(), event);
        event
    }

    /// Step until `Idle`, reporting every event to `observe`
    pub fn run<S: TileSource + ?Sized>(
        &mut self,
        grid: &mut Grid,
        tiles: &mut S,
        mut observe: impl FnMut(&CascadeEvent),
    ) {
        loop {
            let event = self.step(grid, tiles);
            observe(&event);
            if event == CascadeEvent::Settled {
                break;
            }
        }
    }
}

/// Clear every matched cell and return how many cells are now Empty.
///
/// Overlapping matches clear a shared cell once; the count comes from the
/// board, not from summing match lengths.
pub fn remove_matches(grid: &mut Grid, matches: &[Match]) -> u32 {
    for coord in matches.iter().flat_map(|m| m.cells.iter()) {
        if let Some(cell) = grid.cell_mut(*coord) {
            *cell = None;
        }
    }
    grid.count_empty() as u32
}

/// Compact tiles downward and top up each column with new tiles.
///
/// Rows are processed bottom to top, so a cell that just received a fallen
/// tile is never revisited. Returns the number of new tiles.
pub fn apply_gravity<S: TileSource + ?Sized>(grid: &mut Grid, tiles: &mut S) -> usize {
    let mut refilled = 0;

    for row in (0..grid.rows()).rev() {
        for col in 0..grid.cols() {
            let target = Coord::new(row, col);
            if !grid.is_empty_at(target) {
                continue;
            }

            let fallen = (0..row)
                .rev()
                .map(|r| Coord::new(r, col))
                .find_map(|above| grid.cell_mut(above).and_then(Option::take));

            let tile = match fallen {
                Some(tile) => tile,
                None => {
                    refilled += 1;
                    tiles.next_tile()
                }
            };

            if let Some(cell) = grid.cell_mut(target) {
                *cell = Some(tile);
            }
        }
    }

    refilled
}

/// Fill every Empty cell in place, row-major, without gravity
pub fn fill_empty<S: TileSource + ?Sized>(grid: &mut Grid, tiles: &mut S) -> usize {
    let empties: Vec<Coord> = grid.coords().filter(|&c| grid.is_empty_at(c)).collect();
    for coord in &empties {
        if let Some(cell) = grid.cell_mut(*coord) {
            *cell = Some(tiles.next_tile());
        }
    }
    empties.len()
}
