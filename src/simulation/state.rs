use crate::Flip;
use crate::Flips;
use crate::Money;
use crate::Outcome;
use serde::Serialize;

/// Whether the game still accepts bets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Ready,
    Terminal,
}

/// The memoryless present of a game.
///
/// # Fields
///
/// - `bankroll` — Current balance, never below zero
/// - `flips` — Flips left in the budget
/// - `phase` — Ready, or Terminal once broke or out of flips
/// - `last` — Outcome of the most recent flip, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct State {
    bankroll: Money,
    flips: Flips,
    phase: Phase,
    last: Option<Outcome>,
}

impl State {
    /// Fresh game with the starting bankroll and at least one flip.
    pub fn new(flips: Flips) -> Self {
        Self {
            bankroll: crate::STARTING_BANKROLL,
            flips: flips.max(1),
            phase: Phase::Ready,
            last: None,
        }
    }
    pub fn bankroll(&self) -> Money {
        self.bankroll
    }
    pub fn flips(&self) -> Flips {
        self.flips
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn last(&self) -> Option<Outcome> {
        self.last
    }
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Terminal
    }
    /// True while another flip may be resolved.
    pub fn is_playable(&self) -> bool {
        self.phase == Phase::Ready && self.flips > 0 && !self.bankroll.is_zero()
    }
    /// Same state, pinned to Terminal.
    pub fn terminate(self) -> Self {
        Self {
            phase: Phase::Terminal,
            ..self
        }
    }
    /// State after settling `flip`, terminal once broke or out of flips.
    pub fn settle(self, flip: &Flip) -> Self {
        let bankroll = flip.settle(self.bankroll);
        let flips = self.flips.saturating_sub(1);
        let phase = match bankroll.is_zero() || flips == 0 {
            true => Phase::Terminal,
            false => Phase::Ready,
        };
        Self {
            bankroll,
            flips,
            phase,
            last: Some(flip.outcome()),
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} with {} flips left", self.bankroll, self.flips)?;
        match self.phase {
            Phase::Ready => Ok(()),
            Phase::Terminal => write!(f, " (game over)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn new_game_is_ready() {
        let state = State::new(20);
        assert_eq!(state.bankroll(), Money::dollars(25));
        assert_eq!(state.flips(), 20);
        assert_eq!(state.phase(), Phase::Ready);
        assert!(state.last().is_none());
        assert!(state.is_playable());
    }
    #[test]
    fn zero_flips_coerced_to_one() {
        assert_eq!(State::new(0).flips(), 1);
    }
    #[test]
    fn last_flip_terminates() {
        let state = State::new(1).settle(&Flip::resolve(Money::dollars(1), 0.1));
        assert!(state.is_over());
        assert_eq!(state.flips(), 0);
        assert_eq!(state.last(), Some(Outcome::Win));
    }
    #[test]
    fn bust_terminates_with_flips_left() {
        let state = State::new(10).settle(&Flip::resolve(Money::dollars(25), 0.9));
        assert!(state.is_over());
        assert_eq!(state.bankroll(), Money::ZERO);
        assert_eq!(state.flips(), 9);
        assert!(!state.is_playable());
    }
    #[test]
    fn terminate_pins_phase() {
        let state = State::new(5).terminate();
        assert!(state.is_over());
        assert!(!state.is_playable());
        assert_eq!(state.flips(), 5);
    }
}
