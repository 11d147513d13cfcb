use super::State;
use crate::*;

/// Authoritative game state, advanced one flip at a time.
///
/// Owns the [`State`], the [`Streak`], the [`Ledger`] and the draw
/// [`Source`]. Manual flips go through [`Engine::step`] with a caller-chosen
/// bet; strategy flips go through [`Engine::advance`], which sizes the bet
/// from the current state and then takes the very same step.
///
/// Once Terminal, every step is a no-op until [`Engine::reset`].
#[derive(Debug)]
pub struct Engine<S> {
    state: State,
    streak: Streak,
    ledger: Ledger,
    strategy: Strategy,
    budget: Flips,
    source: S,
}

impl<S> Engine<S> {
    pub fn state(&self) -> State {
        self.state
    }
    pub fn streak(&self) -> Streak {
        self.streak
    }
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
    /// Flips configured at the last reset.
    pub fn budget(&self) -> Flips {
        self.budget
    }
    /// Changes strategy. The streak carries over untouched.
    pub fn select(&mut self, strategy: Strategy) {
        log::debug!("[engine] strategy {} -> {}", self.strategy, strategy);
        self.strategy = strategy;
    }
    /// Starts a new game with `flips` flips (at least one).
    pub fn reset(&mut self, flips: Flips) {
        self.budget = flips.max(1);
        self.state = State::new(self.budget);
        self.streak = Streak::default();
        self.ledger.clear();
        log::info!("[engine] new game: {} over {} flips", self.state.bankroll(), self.budget);
    }
    /// Bet the active strategy would place now. Zero once the game is over.
    pub fn suggest(&self) -> Money {
        match self.state.is_playable() {
            true => self.strategy.bet(self.state.bankroll(), &self.streak).0,
            false => Money::ZERO,
        }
    }
    /// Validates a manual bet: below $1 (or not a number) becomes $1, above
    /// the bankroll becomes the bankroll.
    pub fn clamp(&self, amount: f64) -> Money {
        let bet = match amount.is_finite() && amount >= 1.0 {
            true => Money::floor(amount),
            false => MINIMUM_BET,
        };
        bet.wager(self.state.bankroll())
    }
}

impl<S: Source> Engine<S> {
    pub fn new(source: S) -> Self {
        Self::with_flips(source, DEFAULT_FLIPS)
    }
    pub fn with_flips(source: S, flips: Flips) -> Self {
        let budget = flips.max(1);
        Self {
            state: State::new(budget),
            streak: Streak::default(),
            ledger: Ledger::default(),
            strategy: Strategy::default(),
            budget,
            source,
        }
    }
    pub fn with_strategy(self, strategy: Strategy) -> Self {
        Self { strategy, ..self }
    }

    /// Resolves one flip staking `bet`, clamped into `[min($1, bankroll), bankroll]`.
    ///
    /// Returns the updated state and the recorded round, or `None` without
    /// touching anything but the phase when the game is already over.
    pub fn step(&mut self, bet: Money) -> Option<(State, Round)> {
        if !self.state.is_playable() {
            log::debug!("[engine] flip refused, game is over");
            self.state = self.state.terminate();
            return None;
        }
        let bet = bet.wager(self.state.bankroll());
        let flip = Flip::resolve(bet, self.source.draw());
        self.streak = self.streak.observe(flip.outcome(), self.strategy);
        self.state = self.state.settle(&flip);
        let round = Round::new(
            self.ledger.len() + 1,
            flip.outcome(),
            flip.bet(),
            self.state.bankroll(),
        );
        self.ledger.push(round);
        log::debug!(
            "[engine] flip #{} {} {} -> {} ({})",
            round.index(),
            flip.outcome(),
            flip,
            round.bankroll(),
            self.streak
        );
        debug_assert_eq!(self.state.flips() + self.ledger.len(), self.budget);
        if self.state.is_over() {
            log::info!(
                "[engine] game over after {} flips: {}",
                self.ledger.len(),
                self.state.bankroll()
            );
        }
        Some((self.state, round))
    }

    /// One strategy-driven flip, sized from the state as it is right now.
    pub fn advance(&mut self) -> Option<(State, Round)> {
        if !self.state.is_playable() {
            return self.step(Money::ZERO);
        }
        let (bet, streak) = self.strategy.bet(self.state.bankroll(), &self.streak);
        self.streak = streak;
        self.step(bet)
    }

    /// Advances until Terminal, without pacing. Returns the flips played.
    pub fn exhaust(&mut self) -> usize {
        std::iter::from_fn(|| self.advance()).count()
    }
}
