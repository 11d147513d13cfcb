use serde::Serialize;

/// Result of a single flip, from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// Decides a flip from a uniform draw in `[0, 1)`.
    pub fn from_draw(draw: crate::Probability) -> Self {
        match draw < crate::WIN_PROBABILITY {
            true => Self::Win,
            false => Self::Loss,
        }
    }
    pub fn is_win(&self) -> bool {
        matches!(self, Self::Win)
    }
}

impl TryFrom<&str> for Outcome {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_uppercase().as_str() {
            "W" | "WIN" => Ok(Self::Win),
            "L" | "LOSS" => Ok(Self::Loss),
            _ => Err(anyhow::anyhow!("invalid outcome string")),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Win => f.pad("Win"),
            Self::Loss => f.pad("Loss"),
        }
    }
}
