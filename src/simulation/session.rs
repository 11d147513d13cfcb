use super::Autoplay;
use super::Engine;
use super::State;
use crate::*;
use serde::Serialize;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// Who sizes the bet for a single flip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Manual,
    Strategy,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Manual => write!(f, "Manual Betting"),
            Self::Strategy => write!(f, "Strategy Auto-Play"),
        }
    }
}

/// Everything a front end needs to draw the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: State,
    pub streak: Streak,
    pub strategy: Strategy,
    pub mode: Mode,
    pub bet: Money,
    pub description: String,
    pub history: Vec<Round>,
}

/// Intent boundary between a front end and the game.
///
/// Owns the shared [`Engine`] and the generation counter that auto-play
/// runs are checked against. Every intent that changes the game out from
/// under a run (reset, a mode switch, a new run) bumps the counter while
/// holding the engine lock, so no stale run can resolve another round
/// once that intent returns.
#[derive(Debug)]
pub struct Session<S> {
    engine: Arc<Mutex<Engine<S>>>,
    generation: Arc<AtomicU64>,
    mode: Mode,
    manual: Money,
    pacing: Duration,
}

impl<S: Source> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            engine: Arc::new(Mutex::new(Engine::new(source))),
            generation: Arc::new(AtomicU64::new(0)),
            mode: Mode::default(),
            manual: MINIMUM_BET,
            pacing: PACING,
        }
    }
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }
    pub fn with_strategy(self, strategy: Strategy) -> Self {
        self.select_strategy(strategy);
        self
    }
    pub fn with_flips(self, flips: Flips) -> Self {
        self.engine().reset(flips);
        self
    }
    /// Plays one flip, sized by the manual bet or the active strategy.
    pub fn flip_once(&mut self) -> Option<(State, Round)> {
        let mut engine = self.engine();
        match self.mode {
            Mode::Manual => engine.step(self.manual),
            Mode::Strategy => engine.advance(),
        }
    }
}

impl<S> Session<S> {
    fn engine(&self) -> MutexGuard<'_, Engine<S>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
    /// Moves the generation on. Callers hold the engine lock.
    fn invalidate(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn pacing(&self) -> Duration {
        self.pacing
    }
    pub fn state(&self) -> State {
        self.engine().state()
    }
    pub fn strategy(&self) -> Strategy {
        self.engine().strategy()
    }
    pub fn select_strategy(&self, strategy: Strategy) {
        self.engine().select(strategy);
    }
    /// Switches mode, stopping any auto-play in flight.
    pub fn set_mode(&mut self, mode: Mode) {
        {
            let _engine = self.engine();
            self.invalidate();
        }
        log::debug!("[session] mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }
    /// Validates and stores the manual bet, returning the accepted amount.
    pub fn set_manual_bet(&mut self, amount: f64) -> Money {
        let bet = self.engine().clamp(amount);
        if bet != Money::floor(amount) {
            log::debug!("[session] manual bet {} clamped to {}", amount, bet);
        }
        self.manual = bet;
        bet
    }
    /// Bet the next flip would stake in the current mode.
    pub fn bet(&self) -> Money {
        let engine = self.engine();
        match (self.mode, engine.state().is_playable()) {
            (_, false) => Money::ZERO,
            (Mode::Manual, true) => self.manual.wager(engine.state().bankroll()),
            (Mode::Strategy, true) => engine.suggest(),
        }
    }
    /// Starts a new game, cancelling any auto-play in flight. The flip
    /// count is coerced to at least one.
    pub fn reset_game(&mut self, flips: i64) {
        let mut engine = self.engine();
        let generation = self.invalidate();
        engine.reset(coerce_flips(flips));
        drop(engine);
        self.manual = MINIMUM_BET;
        log::debug!("[session] reset at generation {}", generation);
    }
    /// The last `k` rounds, oldest first.
    pub fn recent(&self, k: usize) -> Vec<Round> {
        self.engine().ledger().recent(k).to_vec()
    }
    pub fn snapshot(&self) -> Snapshot {
        let bet = self.bet();
        let engine = self.engine();
        let description = match self.mode {
            Mode::Manual => format!("Manual ({} per flip)", bet),
            Mode::Strategy => engine.strategy().describe(&engine.streak()),
        };
        Snapshot {
            state: engine.state(),
            streak: engine.streak(),
            strategy: engine.strategy(),
            mode: self.mode,
            bet,
            description,
            history: engine.ledger().rounds().to_vec(),
        }
    }
}

impl<S: Source + Send + 'static> Session<S> {
    /// Starts a paced strategy-driven run to completion, superseding any
    /// earlier run. Must be called from within a tokio runtime.
    pub fn autoplay(&mut self) -> Autoplay<S> {
        let token = {
            let _engine = self.engine();
            self.invalidate()
        };
        log::debug!("[session] auto-play generation {}", token);
        Autoplay::spawn(
            self.engine.clone(),
            self.generation.clone(),
            token,
            self.pacing,
        )
    }
}

impl<S> Drop for Session<S> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
