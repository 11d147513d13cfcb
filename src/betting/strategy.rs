use super::Streak;
use crate::*;
use serde::Serialize;

/// A rule for sizing the next bet.
///
/// Flat strategies stake a fixed share of the bankroll. The rest read one
/// dimension of the [`Streak`]: Progressive and Anti-Martingale press after
/// wins, Martingale and Fibonacci chase after losses, Adaptive scales with the
/// bankroll itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Kelly criterion, 20% of bankroll.
    #[default]
    Conservative,
    /// 50% of bankroll.
    Aggressive,
    /// 99% of bankroll.
    Sbf,
    /// 10% of bankroll.
    Cautious,
    /// 20% to 50% of bankroll, stepping up as the bankroll grows.
    Adaptive,
    /// 10% plus 5% per consecutive win, capped at 40%.
    Progressive,
    /// Climbs the Fibonacci ladder after losses, falls two rungs after wins.
    Fibonacci,
    /// Doubles a 5% base bet after every loss.
    Martingale,
    /// Doubles a 5% base bet after every win.
    AntiMartingale,
}

impl Strategy {
    /// Selector order.
    pub const ALL: [Self; 9] = [
        Self::Conservative,
        Self::Cautious,
        Self::Adaptive,
        Self::Progressive,
        Self::Fibonacci,
        Self::Martingale,
        Self::AntiMartingale,
        Self::Sbf,
        Self::Aggressive,
    ];

    /// Bet for the next flip, and the streak to carry forward.
    ///
    /// The returned bet is floored to the cent and lies in
    /// `[min($1, bankroll), bankroll]`. The returned streak differs from the
    /// input only when Martingale or Anti-Martingale rebase after their
    /// streak was broken.
    pub fn bet(&self, bankroll: Money, streak: &Streak) -> (Money, Streak) {
        debug_assert!(!bankroll.is_zero(), "no bet on an empty bankroll");
        let (raw, streak) = match self {
            Self::Martingale => Self::doubling(bankroll, streak, streak.losses()),
            Self::AntiMartingale => Self::doubling(bankroll, streak, streak.wins()),
            flat => (bankroll.percent(flat.share(bankroll, streak)), *streak),
        };
        (raw.wager(bankroll), streak)
    }

    /// Share of the bankroll staked, for the non-doubling strategies.
    fn share(&self, bankroll: Money, streak: &Streak) -> Percent {
        match self {
            Self::Conservative => KELLY_PERCENT,
            Self::Aggressive => 50,
            Self::Sbf => 99,
            Self::Cautious => 10,
            Self::Adaptive => match bankroll {
                b if b <= Money::dollars(50) => 20,
                b if b <= Money::dollars(100) => 30,
                b if b <= Money::dollars(200) => 40,
                _ => 50,
            },
            Self::Progressive => (PROGRESSIVE_BASE
                + PROGRESSIVE_STEP.saturating_mul(streak.wins() as Percent))
            .min(PROGRESSIVE_CAP),
            Self::Fibonacci => Self::rung(streak.ladder())
                .saturating_mul(FIBONACCI_UNIT)
                .min(FIBONACCI_CAP),
            Self::Martingale | Self::AntiMartingale => MARTINGALE_PERCENT,
        }
    }

    /// Base bet while `run` is zero, otherwise the stored base doubled `run` times.
    fn doubling(bankroll: Money, streak: &Streak, run: u32) -> (Money, Streak) {
        match run {
            0 => {
                let base = bankroll.percent(MARTINGALE_PERCENT).max(MINIMUM_BET);
                (base, streak.rebase(base))
            }
            n => (streak.base().doubled(n), *streak),
        }
    }

    fn rung(ladder: usize) -> u64 {
        FIBONACCI[ladder.min(FIBONACCI.len() - 1)]
    }

    /// Identifier accepted by [`TryFrom<&str>`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Aggressive => "aggressive",
            Self::Sbf => "sbf",
            Self::Cautious => "cautious",
            Self::Adaptive => "adaptive",
            Self::Progressive => "progressive",
            Self::Fibonacci => "fibonacci",
            Self::Martingale => "martingale",
            Self::AntiMartingale => "antimartingale",
        }
    }

    /// Short selector label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Conservative => "Kelly (20%)",
            Self::Aggressive => "Aggressive",
            Self::Sbf => "SBF (99%)",
            Self::Cautious => "Cautious (10%)",
            Self::Adaptive => "Adaptive",
            Self::Progressive => "Progressive",
            Self::Fibonacci => "Fibonacci",
            Self::Martingale => "Martingale",
            Self::AntiMartingale => "Anti-Martingale",
        }
    }

    /// One-sentence explanation of the rule.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Conservative => {
                "Bets the Kelly fraction, 20% of bankroll, which maximizes long-run growth at 60/40 odds."
            }
            Self::Aggressive => "Bets half the bankroll on every flip.",
            Self::Sbf => "Bets 99% of the bankroll on every flip.",
            Self::Cautious => "Bets a fixed 10% of bankroll regardless of outcomes.",
            Self::Adaptive => {
                "Bets 20% up to $50, 30% up to $100, 40% up to $200, and 50% beyond."
            }
            Self::Progressive => {
                "Bets 10% plus 5% per consecutive win, capped at 40%, back to 10% after a loss."
            }
            Self::Fibonacci => {
                "Bets 2% per Fibonacci unit, one rung up after a loss and two rungs down after a win."
            }
            Self::Martingale => {
                "Bets a 5% base and doubles it after every loss until a win resets the base."
            }
            Self::AntiMartingale => {
                "Bets a 5% base and doubles it after every win until a loss resets the base."
            }
        }
    }

    /// Description reflecting the current streak.
    pub fn describe(&self, streak: &Streak) -> String {
        match self {
            Self::Conservative => String::from("Conservative (Kelly 20%)"),
            Self::Aggressive => String::from("Aggressive (50% bets)"),
            Self::Sbf => String::from("SBF (99% of bankroll)"),
            Self::Cautious => String::from("Cautious (10% bets)"),
            Self::Adaptive => String::from("Adaptive (20%-50% based on bankroll)"),
            Self::Progressive => format!(
                "Progressive ({}% + win streak bonus)",
                self.share(Money::ZERO, streak)
            ),
            Self::Fibonacci => format!("Fibonacci ({}%)", self.share(Money::ZERO, streak)),
            Self::Martingale => Self::doubling_description("Martingale", streak.losses()),
            Self::AntiMartingale => Self::doubling_description("Anti-Martingale", streak.wins()),
        }
    }

    fn doubling_description(name: &str, run: u32) -> String {
        match run {
            0 => format!("{} (Base: {}%)", name, MARTINGALE_PERCENT),
            n => format!(
                "{} ({}%)",
                name,
                MARTINGALE_PERCENT.saturating_mul(2u64.saturating_pow(n))
            ),
        }
    }

    /// Resolves an identifier that is expected to be valid.
    ///
    /// Unknown identifiers are a programming error: they trip a debug
    /// assertion, and release builds fall back to [`Strategy::Conservative`].
    pub fn lookup(name: &str) -> Self {
        Self::try_from(name)
            .inspect_err(|e| log::error!("[strategy] {}, falling back to conservative", e))
            .inspect_err(|e| debug_assert!(false, "{}", e))
            .unwrap_or_default()
    }
}

impl TryFrom<&str> for Strategy {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "conservative" | "kelly" => Ok(Self::Conservative),
            "aggressive" => Ok(Self::Aggressive),
            "sbf" => Ok(Self::Sbf),
            "cautious" => Ok(Self::Cautious),
            "adaptive" => Ok(Self::Adaptive),
            "progressive" => Ok(Self::Progressive),
            "fibonacci" => Ok(Self::Fibonacci),
            "martingale" => Ok(Self::Martingale),
            "antimartingale" | "anti-martingale" => Ok(Self::AntiMartingale),
            other => Err(anyhow::anyhow!("unknown strategy: {}", other)),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bet(strategy: Strategy, bankroll: Money, streak: Streak) -> Money {
        strategy.bet(bankroll, &streak).0
    }

    #[test]
    fn bets_stay_within_bankroll() {
        let streaks = [
            Streak::default(),
            (0..6).fold(Streak::default(), |s, _| s.observe(Outcome::Win, Strategy::Fibonacci)),
            (0..14).fold(Streak::default(), |s, _| s.observe(Outcome::Loss, Strategy::Fibonacci)),
            (0..70).fold(Streak::default(), |s, _| s.observe(Outcome::Loss, Strategy::Martingale)),
            (0..70).fold(Streak::default(), |s, _| s.observe(Outcome::Win, Strategy::Martingale)),
        ];
        let bankrolls = [1, 7, 99, 100, 101, 2_499, 2_500, 5_000, 5_001, 20_001, 1_000_000_000]
            .map(Money::cents);
        for strategy in Strategy::ALL {
            for streak in streaks {
                for bankroll in bankrolls {
                    let bet = bet(strategy, bankroll, streak);
                    assert!(bet <= bankroll, "{} bet {} > {}", strategy, bet, bankroll);
                    assert!(bet >= MINIMUM_BET.min(bankroll), "{} bet {}", strategy, bet);
                }
            }
        }
    }
    #[test]
    fn small_bankroll_bets_everything() {
        for strategy in Strategy::ALL {
            assert_eq!(
                bet(strategy, Money::cents(40), Streak::default()),
                Money::cents(40)
            );
        }
    }
    #[test]
    fn conservative_bets_kelly() {
        let streak = Streak::default();
        assert_eq!(bet(Strategy::Conservative, Money::dollars(25), streak), Money::dollars(5));
        let streak = streak.observe(Outcome::Loss, Strategy::Conservative);
        assert_eq!(bet(Strategy::Conservative, Money::dollars(20), streak), Money::dollars(4));
    }
    #[test]
    fn flat_shares() {
        let streak = Streak::default();
        let bankroll = Money::dollars(40);
        assert_eq!(bet(Strategy::Aggressive, bankroll, streak), Money::dollars(20));
        assert_eq!(bet(Strategy::Cautious, bankroll, streak), Money::dollars(4));
        assert_eq!(bet(Strategy::Sbf, bankroll, streak), Money::cents(3960));
        assert_eq!(bet(Strategy::Sbf, Money::dollars(25), streak), Money::cents(2475));
    }
    #[test]
    fn adaptive_tiers() {
        let streak = Streak::default();
        assert_eq!(bet(Strategy::Adaptive, Money::dollars(50), streak), Money::dollars(10));
        assert_eq!(bet(Strategy::Adaptive, Money::cents(5001), streak), Money::cents(1500));
        assert_eq!(bet(Strategy::Adaptive, Money::dollars(100), streak), Money::dollars(30));
        assert_eq!(bet(Strategy::Adaptive, Money::dollars(200), streak), Money::dollars(80));
        assert_eq!(bet(Strategy::Adaptive, Money::dollars(300), streak), Money::dollars(150));
    }
    #[test]
    fn progressive_presses_wins_up_to_cap() {
        let bankroll = Money::dollars(100);
        let mut streak = Streak::default();
        let mut bets = Vec::new();
        for _ in 0..8 {
            bets.push(bet(Strategy::Progressive, bankroll, streak));
            streak = streak.observe(Outcome::Win, Strategy::Progressive);
        }
        let expected = [10, 15, 20, 25, 30, 35, 40, 40].map(Money::dollars);
        assert_eq!(bets, expected);
        let streak = streak.observe(Outcome::Loss, Strategy::Progressive);
        assert_eq!(bet(Strategy::Progressive, bankroll, streak), Money::dollars(10));
    }
    #[test]
    fn fibonacci_ladder() {
        let bankroll = Money::dollars(100);
        let streak = Streak::default();
        assert_eq!(bet(Strategy::Fibonacci, bankroll, streak), Money::dollars(2));
        let streak = streak.observe(Outcome::Loss, Strategy::Fibonacci);
        assert_eq!(streak.ladder(), 1);
        assert_eq!(bet(Strategy::Fibonacci, bankroll, streak), Money::dollars(2));
        let streak = streak.observe(Outcome::Loss, Strategy::Fibonacci);
        assert_eq!(streak.ladder(), 2);
        assert_eq!(bet(Strategy::Fibonacci, bankroll, streak), Money::dollars(4));
        let streak = streak.observe(Outcome::Win, Strategy::Fibonacci);
        assert_eq!(streak.ladder(), 0);
        assert_eq!(bet(Strategy::Fibonacci, bankroll, streak), Money::dollars(2));
    }
    #[test]
    fn fibonacci_caps_at_half() {
        let streak = (0..20).fold(Streak::default(), |s, _| {
            s.observe(Outcome::Loss, Strategy::Fibonacci)
        });
        assert_eq!(streak.ladder(), 20);
        assert_eq!(bet(Strategy::Fibonacci, Money::dollars(100), streak), Money::dollars(50));
    }
    #[test]
    fn martingale_doubles_after_losses() {
        let (first, streak) = Strategy::Martingale.bet(Money::dollars(25), &Streak::default());
        assert_eq!(first, Money::cents(125));
        assert_eq!(streak.base(), Money::cents(125));
        let streak = streak.observe(Outcome::Loss, Strategy::Martingale);
        let (second, streak) = Strategy::Martingale.bet(Money::cents(2375), &streak);
        assert_eq!(second, Money::cents(250));
        let streak = streak.observe(Outcome::Loss, Strategy::Martingale);
        let (third, streak) = Strategy::Martingale.bet(Money::cents(2125), &streak);
        assert_eq!(third, Money::dollars(5));
        let streak = streak.observe(Outcome::Win, Strategy::Martingale);
        let (rebased, streak) = Strategy::Martingale.bet(Money::cents(2625), &streak);
        assert_eq!(rebased, Money::cents(131));
        assert_eq!(streak.base(), Money::cents(131));
    }
    #[test]
    fn martingale_base_is_at_least_one_dollar() {
        let (bet, streak) = Strategy::Martingale.bet(Money::dollars(10), &Streak::default());
        assert_eq!(bet, Money::dollars(1));
        assert_eq!(streak.base(), Money::dollars(1));
    }
    #[test]
    fn antimartingale_doubles_after_wins() {
        let (first, streak) = Strategy::AntiMartingale.bet(Money::dollars(40), &Streak::default());
        assert_eq!(first, Money::dollars(2));
        let streak = streak.observe(Outcome::Win, Strategy::AntiMartingale);
        let (second, streak) = Strategy::AntiMartingale.bet(Money::dollars(42), &streak);
        assert_eq!(second, Money::dollars(4));
        let streak = streak.observe(Outcome::Loss, Strategy::AntiMartingale);
        let (rebased, _) = Strategy::AntiMartingale.bet(Money::dollars(38), &streak);
        assert_eq!(rebased, Money::cents(190));
    }
    #[test]
    fn stale_streak_is_tolerated() {
        let streak = Streak::default()
            .observe(Outcome::Loss, Strategy::Conservative)
            .observe(Outcome::Loss, Strategy::Conservative);
        let (bet, next) = Strategy::Martingale.bet(Money::dollars(25), &streak);
        assert_eq!(bet, Money::dollars(4));
        assert_eq!(next, streak);
    }
    #[test]
    fn flat_strategies_do_not_rebase() {
        let streak = Streak::default().rebase(Money::cents(333));
        for strategy in Strategy::ALL
            .into_iter()
            .filter(|s| !matches!(s, Strategy::Martingale | Strategy::AntiMartingale))
        {
            assert_eq!(strategy.bet(Money::dollars(25), &streak).1, streak);
        }
    }
    #[test]
    fn descriptions_track_streak() {
        let streak = Streak::default();
        assert_eq!(Strategy::Conservative.describe(&streak), "Conservative (Kelly 20%)");
        assert_eq!(Strategy::Martingale.describe(&streak), "Martingale (Base: 5%)");
        assert_eq!(Strategy::Fibonacci.describe(&streak), "Fibonacci (2%)");
        assert_eq!(
            Strategy::Progressive.describe(&streak),
            "Progressive (10% + win streak bonus)"
        );
        let won = streak.observe(Outcome::Win, Strategy::Progressive);
        assert_eq!(
            Strategy::Progressive.describe(&won),
            "Progressive (15% + win streak bonus)"
        );
        assert_eq!(Strategy::AntiMartingale.describe(&won), "Anti-Martingale (10%)");
        let lost = streak
            .observe(Outcome::Loss, Strategy::Fibonacci)
            .observe(Outcome::Loss, Strategy::Fibonacci)
            .observe(Outcome::Loss, Strategy::Fibonacci);
        assert_eq!(Strategy::Martingale.describe(&lost), "Martingale (40%)");
        assert_eq!(Strategy::Fibonacci.describe(&lost), "Fibonacci (6%)");
    }
    #[test]
    fn parse_names() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::try_from(strategy.name()).unwrap(), strategy);
        }
        assert_eq!(Strategy::try_from("Kelly").unwrap(), Strategy::Conservative);
        assert_eq!(
            Strategy::try_from("anti-martingale").unwrap(),
            Strategy::AntiMartingale
        );
        assert!(Strategy::try_from("yolo").is_err());
        assert_eq!(Strategy::lookup("SBF"), Strategy::Sbf);
    }
    #[test]
    #[cfg(not(debug_assertions))]
    fn unknown_lookup_falls_back() {
        assert_eq!(Strategy::lookup("yolo"), Strategy::Conservative);
    }
    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn unknown_lookup_fails_loudly() {
        Strategy::lookup("yolo");
    }
}
