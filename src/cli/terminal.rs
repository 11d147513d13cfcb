use super::Args;
use super::render;
use crate::*;
use colored::Colorize;
use dialoguer::Input;
use dialoguer::Select;
use rand::rngs::SmallRng;

/// Entries of the interactive menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Flip,
    Bet,
    Strategy,
    Mode,
    Auto,
    History,
    Reset,
    Quit,
}

impl Choice {
    const ALL: [Self; 8] = [
        Self::Flip,
        Self::Bet,
        Self::Strategy,
        Self::Mode,
        Self::Auto,
        Self::History,
        Self::Reset,
        Self::Quit,
    ];
    fn label(&self) -> &'static str {
        match self {
            Self::Flip => "Flip",
            Self::Bet => "Set bet",
            Self::Strategy => "Choose strategy",
            Self::Mode => "Switch mode",
            Self::Auto => "Auto-play",
            Self::History => "History",
            Self::Reset => "Reset",
            Self::Quit => "Quit",
        }
    }
}

/// Interactive or one-shot play over a [`Session`].
pub struct Terminal {
    session: Session<SmallRng>,
    flips: Flips,
    json: bool,
}

impl TryFrom<&Args> for Terminal {
    type Error = anyhow::Error;
    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        Ok(Self {
            session: args.session()?,
            flips: args.flips,
            json: args.json,
        })
    }
}

impl Terminal {
    /// Runs the strategy to completion, then prints the summary.
    pub async fn auto(mut self) -> anyhow::Result<()> {
        self.session.set_mode(Mode::Strategy);
        println!("{}", render::status(&self.session.snapshot()));
        self.watch().await;
        let snapshot = self.session.snapshot();
        println!("{}", render::summary(&snapshot));
        if self.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Ok(())
    }

    /// Menu loop until Quit.
    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            let snapshot = self.session.snapshot();
            let recent = self.session.recent(RECENT_ROUNDS);
            if !recent.is_empty() {
                println!("{}", render::history(&recent));
            }
            println!("{}", render::status(&snapshot));
            let labels = Choice::ALL.map(|c| c.label());
            let choice = Select::new()
                .with_prompt("Next")
                .report(false)
                .items(&labels)
                .default(0)
                .interact()?;
            match Choice::ALL[choice] {
                Choice::Flip => self.flip(),
                Choice::Bet => self.bet()?,
                Choice::Strategy => self.strategy()?,
                Choice::Mode => self.mode(),
                Choice::Auto => self.autoplay().await,
                Choice::History => println!("{}", render::history(&snapshot.history)),
                Choice::Reset => self.reset()?,
                Choice::Quit => break,
            }
        }
        println!("{}", render::summary(&self.session.snapshot()));
        Ok(())
    }

    fn flip(&mut self) {
        match self.session.flip_once() {
            Some((_, round)) => println!("{}", render::round(&round)),
            None => println!("{}", "game over, reset to play again".yellow()),
        }
    }
    fn bet(&mut self) -> anyhow::Result<()> {
        let input = Input::<String>::new()
            .with_prompt(format!("Bet [$1-{}]", self.session.state().bankroll()))
            .report(false)
            .interact_text()?;
        let amount = input.trim().trim_start_matches('$').parse::<f64>();
        let bet = self.session.set_manual_bet(amount.unwrap_or(f64::NAN));
        println!("bet set to {}", bet);
        Ok(())
    }
    fn strategy(&mut self) -> anyhow::Result<()> {
        let current = self.session.strategy();
        let labels = Strategy::ALL.map(|s| s.label());
        let index = Strategy::ALL.iter().position(|s| *s == current);
        let choice = Select::new()
            .with_prompt("Strategy")
            .report(false)
            .items(&labels)
            .default(index.unwrap_or_default())
            .interact()?;
        let strategy = Strategy::ALL[choice];
        self.session.select_strategy(strategy);
        println!("{}: {}", strategy.label().bold(), strategy.summary());
        Ok(())
    }
    fn mode(&mut self) {
        let mode = match self.session.mode() {
            Mode::Manual => Mode::Strategy,
            Mode::Strategy => Mode::Manual,
        };
        self.session.set_mode(mode);
    }
    async fn autoplay(&mut self) {
        self.session.set_mode(Mode::Strategy);
        self.watch().await;
        println!("{}", render::summary(&self.session.snapshot()));
    }
    fn reset(&mut self) -> anyhow::Result<()> {
        let input = Input::<String>::new()
            .with_prompt("Flips")
            .default(self.flips.to_string())
            .report(false)
            .interact_text()?;
        self.flips = parse_flips(&input);
        self.session
            .reset_game(i64::try_from(self.flips).unwrap_or(i64::MAX));
        Ok(())
    }

    /// Streams an auto-play run until it ends or Ctrl-C cancels it.
    async fn watch(&mut self) {
        let mut run = self.session.autoplay();
        loop {
            tokio::select! {
                round = run.next() => match round {
                    Some(round) => println!("{}", render::round(&round)),
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    run.cancel();
                    println!();
                    println!("{}", "auto-play stopped".yellow());
                    break;
                }
            }
        }
        if run.finish().await.is_none() {
            log::info!("[session] auto-play interrupted");
        }
    }
}
