use crate::cascade::CascadeStage;
use crate::scoring::ScoreState;
use crate::types::{Cell, Coord, Move};

/// Read-only view of a session for rendering.
///
/// Between completed operations `board` holds no Empty cell; while a cascade
/// is in flight it may, and `stage`/`matched` describe what is happening.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major cells
    pub board: Vec<Cell>,
    pub stage: CascadeStage,
    /// Cells of the matches about to be removed
    pub matched: Vec<Coord>,
    pub score: ScoreState,
    /// Number of valid moves; `None` while a cascade is in flight
    pub valid_moves: Option<usize>,

    // Player overlay. A bare session leaves these alone.
    pub cursor: Option<Coord>,
    pub selected: Option<Coord>,
    pub hints: Vec<Move>,
    pub message: String,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.board.clear();
        self.stage = CascadeStage::Idle;
        self.matched.clear();
        self.score = ScoreState::default();
        self.valid_moves = None;
        self.cursor = None;
        self.selected = None;
        self.hints.clear();
        self.message.clear();
    }

    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return None;
        }
        self.board.get(coord.row * self.cols + coord.col).copied()
    }

    pub fn is_hinted(&self, coord: Coord) -> bool {
        self.hints.iter().any(|mv| mv.touches(coord))
    }

    pub fn is_matched(&self, coord: Coord) -> bool {
        self.matched.contains(&coord)
    }

    pub fn is_busy(&self) -> bool {
        self.stage != CascadeStage::Idle
    }

    /// Board is settled and has no legal move
    pub fn no_moves(&self) -> bool {
        self.valid_moves == Some(0)
    }

    pub fn playable(&self) -> bool {
        !self.is_busy() && !self.no_moves()
    }
}
