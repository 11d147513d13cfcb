use super::Engine;
use super::State;
use crate::Round;
use crate::Source;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::mpsc::*;
use tokio::task::JoinHandle;

/// Handle to a paced, strategy-driven run to completion.
///
/// The run holds a token from the shared generation counter. At the top of
/// every iteration, with the engine locked, it compares that token against
/// the counter and stops without touching state if a reset, a mode switch or
/// a newer run has moved the counter on. A round that already started always
/// finishes; a cancelled round never starts.
///
/// Each resolved [`Round`] is streamed to the handle as it happens.
#[derive(Debug)]
pub struct Autoplay<S> {
    token: u64,
    engine: Arc<Mutex<Engine<S>>>,
    generation: Arc<AtomicU64>,
    rounds: UnboundedReceiver<Round>,
    task: JoinHandle<Option<State>>,
}

impl<S> Autoplay<S>
where
    S: Source + Send + 'static,
{
    /// Spawns the run. `token` must already be the current generation.
    pub(crate) fn spawn(
        engine: Arc<Mutex<Engine<S>>>,
        generation: Arc<AtomicU64>,
        token: u64,
        pacing: Duration,
    ) -> Self {
        let (tx, rx) = unbounded_channel();
        let task = tokio::spawn(Self::run(
            engine.clone(),
            generation.clone(),
            token,
            pacing,
            tx,
        ));
        Self {
            token,
            engine,
            generation,
            rounds: rx,
            task,
        }
    }
    pub fn token(&self) -> u64 {
        self.token
    }
    /// Invalidates this run. Later runs are unaffected.
    ///
    /// Waits out a round in progress, so nothing more lands in the ledger
    /// once this returns.
    pub fn cancel(&self) {
        let _engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        match self.generation.compare_exchange(
            self.token,
            self.token + 1,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => log::debug!("[autoplay] run {} cancelled", self.token),
            Err(_) => log::debug!("[autoplay] run {} already superseded", self.token),
        }
    }
    /// True while the run may still resolve rounds.
    pub fn is_live(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.token && !self.task.is_finished()
    }
    /// Next resolved round, or `None` once the run has ended.
    pub async fn next(&mut self) -> Option<Round> {
        self.rounds.recv().await
    }
    /// Waits for the run to end. Returns the terminal state, or `None` if
    /// the run was cancelled or superseded first.
    pub async fn finish(self) -> Option<State> {
        self.task
            .await
            .inspect_err(|e| log::warn!("[autoplay] run {} aborted: {}", self.token, e))
            .ok()
            .flatten()
    }

    async fn run(
        engine: Arc<Mutex<Engine<S>>>,
        generation: Arc<AtomicU64>,
        token: u64,
        pacing: Duration,
        rounds: UnboundedSender<Round>,
    ) -> Option<State> {
        log::debug!("[autoplay] run {} started", token);
        loop {
            let state = {
                let mut engine = engine.lock().unwrap_or_else(PoisonError::into_inner);
                if generation.load(Ordering::SeqCst) != token {
                    log::debug!("[autoplay] run {} is stale, stopping", token);
                    return None;
                }
                match engine.advance() {
                    Some((state, round)) => {
                        let _ = rounds.send(round);
                        state
                    }
                    None => return Some(engine.state()),
                }
            };
            if state.is_over() {
                log::debug!("[autoplay] run {} reached {}", token, state);
                return Some(state);
            }
            tokio::time::sleep(pacing).await;
        }
    }
}
