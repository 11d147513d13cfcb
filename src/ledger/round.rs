use crate::Money;
use crate::Outcome;
use serde::Serialize;

/// One line of the flip-by-flip history. Immutable once recorded.
///
/// # Fields
///
/// - `index` — 1-based position in the game
/// - `outcome` — Win or loss
/// - `bet` — Amount staked
/// - `bankroll` — Bankroll after settling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Round {
    index: usize,
    outcome: Outcome,
    bet: Money,
    bankroll: Money,
}

impl Round {
    pub fn new(index: usize, outcome: Outcome, bet: Money, bankroll: Money) -> Self {
        Self {
            index,
            outcome,
            bet,
            bankroll,
        }
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
    pub fn bet(&self) -> Money {
        self.bet
    }
    /// Bankroll after this round settled.
    pub fn bankroll(&self) -> Money {
        self.bankroll
    }
    /// Signed bankroll change in cents.
    pub fn delta(&self) -> i128 {
        match self.outcome {
            Outcome::Win => self.bet.as_cents() as i128,
            Outcome::Loss => -(self.bet.as_cents() as i128),
        }
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "#{:<4}{:<6}{:>12}{:>12}",
            self.index,
            self.outcome,
            self.bet.to_string(),
            self.bankroll.to_string()
        )
    }
}
