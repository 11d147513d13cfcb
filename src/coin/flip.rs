use super::Outcome;
use crate::Money;
use crate::Probability;

/// A resolved round: what happened and how much was at stake.
///
/// Even money, so a win adds the bet and a loss removes it. Resolution is
/// total; there is nothing to retry and nothing that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    outcome: Outcome,
    bet: Money,
}

impl Flip {
    /// Resolves `bet` against a uniform draw in `[0, 1)`.
    pub fn resolve(bet: Money, draw: Probability) -> Self {
        Self {
            outcome: Outcome::from_draw(draw),
            bet,
        }
    }
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
    pub fn bet(&self) -> Money {
        self.bet
    }
    /// Bankroll after settling this flip, floored at zero.
    pub fn settle(&self, bankroll: Money) -> Money {
        match self.outcome {
            Outcome::Win => bankroll + self.bet,
            Outcome::Loss => bankroll - self.bet,
        }
    }
}

impl std::fmt::Display for Flip {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.outcome {
            Outcome::Win => write!(f, "+{}", self.bet),
            Outcome::Loss => write!(f, "-{}", self.bet),
        }
    }
}
