use super::Round;

/// Append-only flip history in chronological order.
///
/// Rounds are only ever pushed; the sole way to remove one is to clear the
/// whole ledger when a new game starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    rounds: Vec<Round>,
}

impl Ledger {
    pub fn push(&mut self, round: Round) {
        debug_assert_eq!(round.index(), self.rounds.len() + 1, "rounds are 1-based and contiguous");
        self.rounds.push(round);
    }
    pub fn clear(&mut self) {
        self.rounds.clear();
    }
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }
    /// The last `k` rounds, oldest first.
    pub fn recent(&self, k: usize) -> &[Round] {
        &self.rounds[self.rounds.len().saturating_sub(k)..]
    }
    pub fn last(&self) -> Option<&Round> {
        self.rounds.last()
    }
    pub fn len(&self) -> usize {
        self.rounds.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
    /// Sum of signed bet deltas in cents.
    pub fn net(&self) -> i128 {
        self.rounds.iter().map(Round::delta).sum()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter()
    }
}

impl std::fmt::Display for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for round in self.rounds.iter() {
            writeln!(f, "{}", round)?;
        }
        Ok(())
    }
}
