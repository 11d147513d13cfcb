//! Bankroll-management strategies on a biased coin-flip betting game.
//!
//! A player starts with $25 and bets on a coin that lands in their favor 60%
//! of the time, at even money, for a fixed budget of flips. Each [`Strategy`]
//! is a different rule for sizing the next bet from the current bankroll and
//! the recent run of outcomes.
//!
//! ## Core
//!
//! - [`Money`] — Fixed-point currency in whole cents
//! - [`Strategy`] — Bet-sizing rules and their descriptive metadata
//! - [`Streak`] — Consecutive outcome counters carried between bets
//! - [`Flip`] — A resolved round: outcome and the amount at stake
//! - [`Source`] — Uniform draws in `[0, 1)` that decide each flip
//! - [`Ledger`] — Append-only flip-by-flip history
//!
//! ## Simulation
//!
//! - [`Engine`] — Authoritative game state, stepped one flip at a time
//! - [`Autoplay`] — Paced, cancellable strategy-driven run to completion
//! - [`Session`] — Intent boundary consumed by a front end

pub mod betting;
pub mod coin;
pub mod ledger;
pub mod money;
pub mod simulation;

#[cfg(feature = "cli")]
pub mod cli;

pub use betting::*;
pub use coin::*;
pub use ledger::*;
pub use money::*;
pub use simulation::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Uniform draws and win rates.
pub type Probability = f64;
/// Whole-number share of a bankroll (20 = 20%).
pub type Percent = u64;
/// Number of flips left, played, or configured.
pub type Flips = usize;

// ============================================================================
// GAME PARAMETERS
// Fixed odds: 60/40 in the player's favor, paid at 1:1.
// ============================================================================
/// Draws strictly below this threshold are wins.
pub const WIN_PROBABILITY: Probability = 0.6;
/// Bankroll at the start of every game.
pub const STARTING_BANKROLL: Money = Money::dollars(25);
/// Flip budget when none is chosen.
pub const DEFAULT_FLIPS: Flips = 20;
/// Smallest bet accepted unless the bankroll itself is smaller.
pub const MINIMUM_BET: Money = Money::dollars(1);

// ============================================================================
// STRATEGY PARAMETERS
// ============================================================================
/// Kelly fraction for a 60/40 even-money game: (0.6 * 2 - 1) / 1.
pub const KELLY_PERCENT: Percent = 20;
/// Base bet for Martingale and Anti-Martingale, before doubling.
pub const MARTINGALE_PERCENT: Percent = 5;
/// Fibonacci ladder. Positions past the end stay on the last rung.
pub const FIBONACCI: [u64; 11] = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89];
/// Bankroll share per Fibonacci unit.
pub const FIBONACCI_UNIT: Percent = 2;
/// Fibonacci bets never exceed this share of the bankroll.
pub const FIBONACCI_CAP: Percent = 50;
/// Progressive share with no win streak.
pub const PROGRESSIVE_BASE: Percent = 10;
/// Progressive share added per consecutive win.
pub const PROGRESSIVE_STEP: Percent = 5;
/// Progressive share ceiling.
pub const PROGRESSIVE_CAP: Percent = 40;

// ============================================================================
// AUTO-PLAY
// ============================================================================
/// Delay between automatic flips, for perceptible pacing only.
pub const PACING: std::time::Duration = std::time::Duration::from_millis(50);

/// Coerce a requested flip budget into a playable one (at least one flip).
pub fn coerce_flips(requested: i64) -> Flips {
    usize::try_from(requested).map_or(1, |n| n.max(1))
}

/// Flip budget typed as text. Anything that is not an integer plays one flip.
pub fn parse_flips(text: &str) -> Flips {
    text.trim().parse::<i64>().map_or(1, coerce_flips)
}

/// Rounds shown alongside the status bar.
pub const RECENT_ROUNDS: usize = 10;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` and writes DEBUG to file, WARN and above to the terminal
/// so log lines stay out of the interactive prompts.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Warn,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn flip_budget_is_at_least_one() {
        assert_eq!(coerce_flips(-3), 1);
        assert_eq!(coerce_flips(0), 1);
        assert_eq!(coerce_flips(1), 1);
        assert_eq!(coerce_flips(120), 120);
    }
    #[test]
    fn flip_budget_from_text() {
        assert_eq!(parse_flips("abc"), 1);
        assert_eq!(parse_flips(""), 1);
        assert_eq!(parse_flips("-3"), 1);
        assert_eq!(parse_flips("0"), 1);
        assert_eq!(parse_flips(" 7 "), 7);
        assert_eq!(parse_flips("2.5"), 1);
    }
    #[test]
    fn kelly_fraction_matches_odds() {
        let kelly = (WIN_PROBABILITY * 2.0 - 1.0) * 100.0;
        assert_eq!(kelly.round() as Percent, KELLY_PERCENT);
    }
}
