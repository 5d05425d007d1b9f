use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Policy deciding whose experience feeds a player's border size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderMode {
    /// Each player's border follows their own level.
    #[default]
    Own,
    /// Everyone is pinned to the highest level online.
    Shared,
    /// Everyone's border follows the sum of all online levels.
    Sum,
}

impl BorderMode {
    pub const ALL: [BorderMode; 3] = [BorderMode::Own, BorderMode::Shared, BorderMode::Sum];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Shared => "shared",
            Self::Sum => "sum",
        }
    }
}

impl fmt::Display for BorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown border mode {0:?}, expected one of own, shared, sum")]
pub struct ParseModeError(pub String);

impl FromStr for BorderMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}
