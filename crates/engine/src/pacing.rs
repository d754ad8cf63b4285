//! Cascade pacing - how fast a committed swap plays out
//!
//! `Pacing::Immediate` resolves the whole cascade inside the swap call.
//! `Pacing::Staged` hands it to a [`StagedDriver`], which performs one
//! transition each time the delay for the current stage has elapsed.
//! Both go through `Session::advance`, so they end on the same board.

use tui_match3_core::{CascadeStage, Session, StepReport, TileSource};

use crate::types::{FALL_DELAY_MS, REMOVE_DELAY_MS, SCAN_DELAY_MS};

/// Milliseconds to wait before leaving each cascade stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDelays {
    pub scan_ms: u32,
    pub remove_ms: u32,
    pub fall_ms: u32,
}

impl StageDelays {
    pub const fn zero() -> Self {
        Self {
            scan_ms: 0,
            remove_ms: 0,
            fall_ms: 0,
        }
    }

    /// Delay before the transition out of `stage`
    pub fn before(&self, stage: CascadeStage) -> u32 {
        match stage {
            CascadeStage::Idle => 0,
            CascadeStage::Scanning => self.scan_ms,
            CascadeStage::Removing => self.remove_ms,
            CascadeStage::Falling => self.fall_ms,
        }
    }
}

impl Default for StageDelays {
    fn default() -> Self {
        Self {
            scan_ms: SCAN_DELAY_MS,
            remove_ms: REMOVE_DELAY_MS,
            fall_ms: FALL_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Immediate,
    Staged(StageDelays),
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Staged(StageDelays::default())
    }
}

/// Steps a session's cascade against an injected clock
#[derive(Debug, Clone, Default)]
pub struct StagedDriver {
    delays: StageDelays,
    timer_ms: u32,
}

impl StagedDriver {
    pub fn new(delays: StageDelays) -> Self {
        Self {
            delays,
            timer_ms: 0,
        }
    }

    /// Time accumulated toward the next transition
    pub fn timer_ms(&self) -> u32 {
        self.timer_ms
    }

    pub fn reset(&mut self) {
        self.timer_ms = 0;
    }

    /// Advance the clock by `elapsed_ms` and perform every transition whose
    /// delay has passed. Returns the transitions in order.
    pub fn tick<S: TileSource>(
        &mut self,
        session: &mut Session<S>,
        elapsed_ms: u32,
    ) -> Vec<StepReport> {
        let mut reports = Vec::new();
        if !session.is_busy() {
            self.timer_ms = 0;
            return reports;
        }

        self.timer_ms = self.timer_ms.saturating_add(elapsed_ms);
        while session.is_busy() {
            let wait = self.delays.before(session.stage());
            if self.timer_ms < wait {
                break;
            }
            self.timer_ms -= wait;
            match session.advance() {
                Some(report) => reports.push(report),
                None => break,
            }
        }

        if !session.is_busy() {
            self.timer_ms = 0;
        }
        reports
    }
}
