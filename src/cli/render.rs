use crate::*;
use colored::Colorize;

/// Signed dollar amount from a cent delta, e.g. `+$1.25` or `-$3.00`.
pub fn signed(cents: i128) -> String {
    let amount = Money::cents(cents.unsigned_abs().min(u64::MAX as u128) as u64);
    match cents < 0 {
        true => format!("-{}", amount),
        false => format!("+{}", amount),
    }
}

/// One-line status bar above the menu.
pub fn status(snapshot: &Snapshot) -> String {
    let bankroll = snapshot.state.bankroll();
    let bankroll = match bankroll >= STARTING_BANKROLL {
        true => bankroll.to_string().green().bold(),
        false => bankroll.to_string().red().bold(),
    };
    let phase = match snapshot.state.is_over() {
        true => "GAME OVER".red().bold().to_string(),
        false => format!("{} flips left", snapshot.state.flips()),
    };
    format!(
        "{} | {} | {} | next bet {} | {}",
        bankroll,
        phase,
        snapshot.mode.to_string().cyan(),
        snapshot.bet,
        snapshot.description.dimmed(),
    )
}

pub fn round(round: &Round) -> String {
    match round.outcome() {
        Outcome::Win => round.to_string().green().to_string(),
        Outcome::Loss => round.to_string().red().to_string(),
    }
}

/// Flip log table with a header row.
pub fn history(rounds: &[Round]) -> String {
    if rounds.is_empty() {
        return "no flips yet".dimmed().to_string();
    }
    let header = format!("{:<5}{:<6}{:>12}{:>12}", "#", "flip", "bet", "bankroll");
    std::iter::once(header.bold().to_string())
        .chain(rounds.iter().map(round))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Closing line for a finished or interrupted game.
pub fn summary(snapshot: &Snapshot) -> String {
    let net = snapshot.history.iter().map(Round::delta).sum::<i128>();
    let net = match net < 0 {
        true => signed(net).red(),
        false => signed(net).green(),
    };
    let wins = snapshot
        .history
        .iter()
        .filter(|r| r.outcome().is_win())
        .count();
    format!(
        "{} finished with {} ({}) after {} flips, {} won",
        snapshot.strategy,
        snapshot.state.bankroll().to_string().bold(),
        net,
        snapshot.history.len(),
        wins,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }
    fn snapshot(outcomes: &str) -> Snapshot {
        let mut session = Session::new(Script::try_from(outcomes).unwrap()).with_flips(3);
        session.set_mode(Mode::Strategy);
        while session.flip_once().is_some() {}
        session.snapshot()
    }

    #[test]
    fn signed_amounts() {
        assert_eq!(signed(125), "+$1.25");
        assert_eq!(signed(-300), "-$3.00");
        assert_eq!(signed(0), "+$0.00");
    }
    #[test]
    fn empty_history() {
        plain();
        assert_eq!(history(&[]), "no flips yet");
    }
    #[test]
    fn history_lists_every_round() {
        plain();
        let snapshot = snapshot("WLW");
        let table = history(&snapshot.history);
        assert_eq!(table.lines().count(), 4);
        assert!(table.lines().nth(2).unwrap().contains("Loss"));
    }
    #[test]
    fn summary_reports_net() {
        plain();
        let snapshot = snapshot("WLW");
        let line = summary(&snapshot);
        assert!(line.starts_with("Kelly (20%)"));
        assert!(line.contains(&snapshot.state.bankroll().to_string()));
        assert!(line.contains("3 flips, 2 won"));
    }
    #[test]
    fn status_flags_game_over() {
        plain();
        let snapshot = snapshot("L");
        assert!(status(&snapshot).contains("GAME OVER"));
    }
}
