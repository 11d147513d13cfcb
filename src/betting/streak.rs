use super::Strategy;
use crate::Money;
use crate::Outcome;
use serde::Serialize;

/// Run-of-outcome counters that streak-sensitive strategies size bets from.
///
/// Every field is always present and always updated, whichever strategy is
/// active, so switching strategies mid-game reads whatever history the
/// counters hold.
///
/// # Fields
///
/// - `wins` — Consecutive wins ending with the last flip
/// - `losses` — Consecutive losses ending with the last flip
/// - `ladder` — Fibonacci position, only moved while Fibonacci is active
/// - `base` — Martingale base bet, rebased lazily when its streak is broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Streak {
    wins: u32,
    losses: u32,
    ladder: usize,
    base: Money,
}

impl Default for Streak {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            ladder: 0,
            base: crate::MINIMUM_BET,
        }
    }
}

impl Streak {
    pub fn wins(&self) -> u32 {
        self.wins
    }
    pub fn losses(&self) -> u32 {
        self.losses
    }
    pub fn ladder(&self) -> usize {
        self.ladder
    }
    pub fn base(&self) -> Money {
        self.base
    }
    /// Same counters with a new Martingale base.
    pub fn rebase(self, base: Money) -> Self {
        Self { base, ..self }
    }
    /// Counters after a resolved flip, played while `strategy` was active.
    pub fn observe(self, outcome: Outcome, strategy: Strategy) -> Self {
        let fibonacci = strategy == Strategy::Fibonacci;
        match outcome {
            Outcome::Win => Self {
                wins: self.wins.saturating_add(1),
                losses: 0,
                ladder: match fibonacci {
                    true => self.ladder.saturating_sub(2),
                    false => self.ladder,
                },
                ..self
            },
            Outcome::Loss => Self {
                wins: 0,
                losses: self.losses.saturating_add(1),
                ladder: match fibonacci {
                    true => self.ladder + 1,
                    false => self.ladder,
                },
                ..self
            },
        }
    }
}

impl std::fmt::Display for Streak {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.wins, self.losses) {
            (0, 0) => write!(f, "no streak"),
            (w, 0) => write!(f, "{}W", w),
            (_, l) => write!(f, "{}L", l),
        }
    }
}
