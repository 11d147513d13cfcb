//! Bet sizing.
//!
//! [`Strategy::bet`] is a pure function of the bankroll and the [`Streak`];
//! [`Streak::observe`] folds each resolved flip back into the streak.
mod strategy;
mod streak;

pub use strategy::*;
pub use streak::*;
