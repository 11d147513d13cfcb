use crate::Percent;
use serde::Serialize;

/// Currency held as a whole number of cents.
///
/// Every bet size is floored to the cent, so keeping cents as integers makes
/// flooring exact and keeps the bankroll equal to the starting amount plus
/// the signed sum of settled bets. Arithmetic saturates: the bankroll floor
/// is zero and a runaway bankroll pins at `u64::MAX` cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "f64")]
pub struct Money(u64);

impl Money {
    pub const ZERO: Self = Self(0);
    /// Exact amount in cents.
    pub const fn cents(cents: u64) -> Self {
        Self(cents)
    }
    /// Exact amount in whole dollars.
    pub const fn dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }
    /// Floors a dollar amount to the cent. Negative and NaN inputs floor to zero.
    pub fn floor(dollars: f64) -> Self {
        let cents = dollars * 100.0;
        let nearest = cents.round();
        // 4.35 * 100 lands one ulp under 435
        match (cents - nearest).abs() <= nearest.abs().max(1.0) * f64::EPSILON * 4.0 {
            true => Self(nearest as u64),
            false => Self(cents.floor() as u64),
        }
    }
    pub fn as_cents(&self) -> u64 {
        self.0
    }
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
    /// `percent`% of this amount, floored to the cent.
    pub fn percent(&self, percent: Percent) -> Self {
        Self((self.0 as u128 * percent as u128 / 100) as u64)
    }
    /// This amount doubled `times` times.
    pub fn doubled(&self, times: u32) -> Self {
        Self(self.0.saturating_mul(2u64.saturating_pow(times)))
    }
    /// Clamps a proposed bet into `[min(1, bankroll), bankroll]`.
    pub fn wager(&self, bankroll: Self) -> Self {
        (*self).max(crate::MINIMUM_BET).min(bankroll)
    }
}

impl std::ops::Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.0 as f64 / 100.0
    }
}

/// Accepts `12`, `12.5`, `$12.34`. Digits past the cent are truncated.
impl TryFrom<&str> for Money {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        let s = s.strip_prefix('$').unwrap_or(s);
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(anyhow::anyhow!("empty amount"));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(anyhow::anyhow!("invalid cents: {}", fraction));
        }
        let dollars = match whole {
            "" => 0,
            w => w
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("invalid dollars {}: {}", w, e))?,
        };
        let cents = fraction
            .chars()
            .chain(std::iter::repeat('0'))
            .take(2)
            .collect::<String>()
            .parse::<u64>()?;
        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Self)
            .ok_or_else(|| anyhow::anyhow!("amount out of range: {}", s))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}
