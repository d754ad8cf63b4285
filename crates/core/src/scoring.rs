//! Scoring module - removal counts for a swap and for the whole session
//!
//! A committed swap opens a round. The first non-zero removal of the round is
//! its base score; every later non-zero removal in the same cascade is a combo.
//! When the cascade settles the round is folded into the session totals.

/// Counters for one player action (or, summed, for a whole session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RoundScore {
    /// Tiles removed by the first removal step
    pub removed: u32,
    /// Tiles removed by every later removal step
    pub combo_removed: u32,
    /// Number of removal steps after the first
    pub combos: u32,
}

impl RoundScore {
    /// All tiles removed, base and combos
    pub fn total_removed(&self) -> u32 {
        self.removed.saturating_add(self.combo_removed)
    }

    fn absorb(&mut self, other: &RoundScore) {
        self.removed = self.removed.saturating_add(other.removed);
        self.combo_removed = self.combo_removed.saturating_add(other.combo_removed);
        self.combos = self.combos.saturating_add(other.combos);
    }
}

/// How a removal step was booked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Nothing was removed
    None,
    /// First removal of the round
    Base { amount: u32 },
    /// A chained removal; `combo` counts from 1
    Combo { amount: u32, combo: u32 },
}

/// Swap-round counters plus session totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ScoreState {
    round: RoundScore,
    total: RoundScore,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters of the most recent (or in-flight) swap
    pub fn round(&self) -> &RoundScore {
        &self.round
    }

    /// Cumulative counters of all settled swaps
    pub fn total(&self) -> &RoundScore {
        &self.total
    }

    /// Reset the swap-round counters at the start of a committed swap
    pub fn begin_round(&mut self) {
        self.round = RoundScore::default();
    }

    /// Book one removal step
    pub fn record_removal(&mut self, amount: u32) -> Removal {
        if amount == 0 {
            return Removal::None;
        }
        if self.round.removed == 0 {
            self.round.removed = amount;
            Removal::Base { amount }
        } else {
            self.round.combos += 1;
            self.round.combo_removed = self.round.combo_removed.saturating_add(amount);
            Removal::Combo {
                amount,
                combo: self.round.combos,
            }
        }
    }

    /// Fold the finished round into the session totals
    pub fn commit_round(&mut self) {
        let round = self.round;
        self.total.absorb(&round);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_removal_is_base() {
        let mut score = ScoreState::new();
        score.begin_round();
        assert_eq!(score.record_removal(3), Removal::Base { amount: 3 });
        assert_eq!(score.round().removed, 3);
        assert_eq!(score.round().combos, 0);
    }

    #[test]
    fn test_later_removals_are_combos() {
        let mut score = ScoreState::new();
        score.begin_round();
        score.record_removal(5);
        assert_eq!(
            score.record_removal(3),
            Removal::Combo {
                amount: 3,
                combo: 1
            }
        );
        assert_eq!(
            score.record_removal(4),
            Removal::Combo {
                amount: 4,
                combo: 2
            }
        );
        assert_eq!(
            *score.round(),
            RoundScore {
                removed: 5,
                combo_removed: 7,
                combos: 2
            }
        );
        assert_eq!(score.round().total_removed(), 12);
    }

    #[test]
    fn test_zero_removal_is_ignored() {
        let mut score = ScoreState::new();
        score.begin_round();
        assert_eq!(score.record_removal(0), Removal::None);
        assert_eq!(score.record_removal(3), Removal::Base { amount: 3 });
    }

    #[test]
    fn test_totals_only_move_on_commit() {
        let mut score = ScoreState::new();
        score.begin_round();
        score.record_removal(3);
        score.record_removal(4);
        assert_eq!(score.total().total_removed(), 0);

        score.commit_round();
        assert_eq!(score.total().total_removed(), 7);
        assert_eq!(score.total().combos, 1);

        score.begin_round();
        assert_eq!(*score.round(), RoundScore::default());
        score.record_removal(6);
        score.commit_round();
        assert_eq!(score.total().removed, 9);
        assert_eq!(score.total().combo_removed, 4);
    }
}
