use crate::*;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Flips per game. Anything below one plays a single flip.
    #[arg(long, default_value_t = DEFAULT_FLIPS, allow_negative_numbers = true, value_parser = flip_budget)]
    pub flips: Flips,
    /// Betting strategy, e.g. kelly, martingale, fibonacci.
    #[arg(long, default_value = "conservative")]
    pub strategy: String,
    /// Run the strategy to completion without the menu.
    #[arg(long)]
    pub auto: bool,
    /// Milliseconds between automatic flips.
    #[arg(long, default_value_t = PACING.as_millis() as u64)]
    pub pace: u64,
    /// Seed for a reproducible game.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print the flip log as JSON after an automatic run.
    #[arg(long)]
    pub json: bool,
    /// Starting manual bet in dollars.
    #[arg(long)]
    pub manual: Option<f64>,
}

impl Args {
    pub fn strategy(&self) -> anyhow::Result<Strategy> {
        Strategy::try_from(self.strategy.as_str())
    }
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pace)
    }
    pub fn source(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
    /// Session configured from the command line.
    pub fn session(&self) -> anyhow::Result<Session<SmallRng>> {
        let mut session = Session::new(self.source())
            .with_pacing(self.pacing())
            .with_strategy(self.strategy()?)
            .with_flips(self.flips);
        if let Some(amount) = self.manual {
            session.set_manual_bet(amount);
        }
        Ok(session)
    }
}

fn flip_budget(text: &str) -> Result<Flips, std::convert::Infallible> {
    Ok(parse_flips(text))
}
