//! Coin-flip Betting Binary
//!
//! Plays the 60/40 coin-flip game from the terminal, either through an
//! interactive menu or as a single automatic run with `--auto`.

use clap::Parser;
use coinflip::cli::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    coinflip::log()?;
    let args = Args::parse();
    let terminal = Terminal::try_from(&args)?;
    match args.auto {
        true => terminal.auto().await,
        false => terminal.run().await,
    }
}
