//! Player-facing game controller
//!
//! `Game` binds [`GameAction`]s to a [`Session`], keeps the cursor, selection
//! and hint overlay, and produces the message shown to the player.

use log::{debug, info, warn};
use tui_match3_core::{
    CascadeEvent, Cursor, GameError, GameSnapshot, RandomTiles, Removal, Session, SimpleRng,
    StepReport, TileSource,
};

use crate::pacing::{Pacing, StagedDriver};
use crate::types::{Coord, GameAction, Move};

pub const MSG_WELCOME: &str = "Arrows move, space selects and swaps, r hints, q quits";
pub const MSG_SELECTED: &str = "Selection made!";
pub const MSG_RESELECTED: &str = "New selection made, you can only swap with an adjacent tile!";
pub const MSG_NO_LINE_UP: &str = "Won't line up 3 or more of the same tile, try again!";
pub const MSG_NO_MOVES: &str = "No more valid moves available! Press 'q' to quit or 'n' for a new board.";
pub const MSG_RESTARTED: &str = "New board dealt!";

pub struct Game<S = RandomTiles> {
    session: Session<S>,
    cursor: Cursor,
    pacing: Pacing,
    driver: StagedDriver,
    hints: Vec<Move>,
    message: String,
    rng: SimpleRng,
}

impl<S: TileSource> Game<S> {
    /// `seed` drives hint selection only; tiles come from the session
    pub fn new(session: Session<S>, pacing: Pacing, seed: u32) -> Self {
        let cursor = Cursor::new(session.rows(), session.cols());
        let driver = match pacing {
            Pacing::Staged(delays) => StagedDriver::new(delays),
            Pacing::Immediate => StagedDriver::default(),
        };
        let message = if session.is_stuck() {
            MSG_NO_MOVES
        } else {
            MSG_WELCOME
        };
        Self {
            session,
            cursor,
            pacing,
            driver,
            hints: Vec::new(),
            message: message.to_string(),
            rng: SimpleRng::new(seed),
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn hints(&self) -> &[Move] {
        &self.hints
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// Apply one player action. Returns whether anything visible changed.
    ///
    /// Actions that need a settled board are ignored while a cascade plays.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action.needs_idle_board() && self.session.is_busy() {
            debug!("ignoring {} during cascade", action.as_str());
            return false;
        }

        match action {
            GameAction::CursorUp => self.cursor.up(),
            GameAction::CursorDown => self.cursor.down(),
            GameAction::CursorLeft => self.cursor.left(),
            GameAction::CursorRight => self.cursor.right(),
            GameAction::SelectOrSwap => self.select_or_swap(),
            GameAction::Hint => self.hint(),
            GameAction::ShowAllMoves => self.show_all_moves(),
            GameAction::ShowScore => {
                self.message = self.total_report();
                true
            }
            GameAction::ShowSwapScore => {
                self.message = self.swap_report();
                true
            }
            GameAction::Restart => self.restart(),
        }
    }

    /// Advance staged pacing by `elapsed_ms`. Returns whether the board changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.session.is_busy() {
            return false;
        }
        let reports = match self.pacing {
            Pacing::Immediate => self.session.finish_cascade(),
            Pacing::Staged(_) => self.driver.tick(&mut self.session, elapsed_ms),
        };
        for report in &reports {
            self.describe(report);
        }
        !reports.is_empty()
    }

    fn select_or_swap(&mut self) -> bool {
        if self.session.is_stuck() {
            self.message = MSG_NO_MOVES.to_string();
            return true;
        }

        let here = self.cursor.position();
        let Some(selected) = self.cursor.selected() else {
            self.cursor.select();
            self.message = MSG_SELECTED.to_string();
            return true;
        };

        self.swap(selected, here)
    }

    fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match self.session.begin_swap(a, b) {
            Ok(outcome) if outcome.committed => {
                info!("swap {a} <-> {b} committed");
                self.cursor.clear_selection();
                self.hints.clear();
                self.driver.reset();
                if self.pacing == Pacing::Immediate {
                    for report in self.session.finish_cascade() {
                        self.describe(&report);
                    }
                }
            }
            Ok(_) => {
                self.cursor.clear_selection();
                self.message = MSG_NO_LINE_UP.to_string();
            }
            Err(GameError::InvalidAdjacency { .. }) => {
                self.cursor.select();
                self.message = MSG_RESELECTED.to_string();
            }
            Err(GameError::NoValidMoves) => {
                self.message = MSG_NO_MOVES.to_string();
            }
            Err(err) => {
                warn!("swap {a} <-> {b} refused: {err}");
                self.message = err.to_string();
            }
        }
        true
    }

    fn describe(&mut self, report: &StepReport) {
        match report.removal {
            Removal::Base { amount } => {
                self.message = format!("{amount} tiles removed");
            }
            Removal::Combo { amount, combo } => {
                self.message = format!("Combo #{combo}: {amount} more tiles removed");
            }
            Removal::None => {}
        }

        if report.event == CascadeEvent::Settled && self.session.is_stuck() {
            info!("board settled with no valid moves");
            self.message = MSG_NO_MOVES.to_string();
        }
    }

    fn hint(&mut self) -> bool {
        self.cursor.clear_selection();
        self.hints.clear();
        let Ok(moves) = self.session.valid_moves() else {
            return false;
        };
        match self.rng.choose(&moves) {
            Some(mv) => {
                self.message = format!("Try swapping {} and {}", mv.a, mv.b);
                self.hints.push(*mv);
            }
            None => self.message = MSG_NO_MOVES.to_string(),
        }
        true
    }

    fn show_all_moves(&mut self) -> bool {
        self.cursor.clear_selection();
        let Ok(moves) = self.session.valid_moves() else {
            return false;
        };
        self.message = if moves.is_empty() {
            MSG_NO_MOVES.to_string()
        } else {
            format!("{} valid moves highlighted", moves.len())
        };
        self.hints = moves;
        true
    }

    fn restart(&mut self) -> bool {
        if let Err(err) = self.session.restart() {
            warn!("restart refused: {err}");
            return false;
        }
        self.cursor = Cursor::new(self.session.rows(), self.session.cols());
        self.hints.clear();
        self.driver.reset();
        let message = if self.session.is_stuck() {
            MSG_NO_MOVES
        } else {
            MSG_RESTARTED
        };
        self.message = message.to_string();
        true
    }

    fn moves_line(&self) -> String {
        match self.session.valid_moves() {
            Ok(moves) => format!("{} valid moves available", moves.len()),
            Err(_) => "board still resolving".to_string(),
        }
    }

    /// Session totals, one line
    pub fn total_report(&self) -> String {
        let total = self.session.score().total();
        format!(
            "Total removed: {} | by combos: {} | combos: {} | {}",
            total.total_removed(),
            total.combo_removed,
            total.combos,
            self.moves_line()
        )
    }

    /// Counters of the most recent swap, one line
    pub fn swap_report(&self) -> String {
        let round = self.session.score().round();
        format!(
            "Last swap removed: {} | by combos: {} | combos: {} | {}",
            round.total_removed(),
            round.combo_removed,
            round.combos,
            self.moves_line()
        )
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Board plus cursor, selection, hints and message
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(out);
        out.cursor = Some(self.cursor.position());
        out.selected = self.cursor.selected();
        out.hints.clear();
        out.hints.extend_from_slice(&self.hints);
        out.message.clear();
        out.message.push_str(&self.message);
    }
}
