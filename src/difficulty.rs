use crate::error::{Result, TicTacToeError};
use std::fmt::Display;
use std::str::FromStr;

/// The deepest search that can ever be needed: a 3×3 game never lasts longer than 9 plies.
pub const MAX_DEPTH: u8 = 9;

/// How far ahead the engine looks.
///
/// Difficulty is plain data: every level runs the same search with a different depth limit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// Looks two plies ahead.
    Easy,
    /// Looks four plies ahead.
    Medium,
    /// Searches to the end of the game and never loses.
    #[default]
    Hard,
}

impl Difficulty {
    /// Every difficulty, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the maximum search depth in plies.
    pub fn depth_limit(self) -> u8 {
        match self {
            Self::Easy => 2,
            Self::Medium => 4,
            Self::Hard => MAX_DEPTH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = TicTacToeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(TicTacToeError::InvalidDifficulty(s.to_string())),
        }
    }
}
