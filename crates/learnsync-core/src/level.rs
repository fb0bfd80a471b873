// crates/learnsync-core/src/level.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LearnSyncError;

/// Difficulty tier of a learning resource.
///
/// Records written by earlier deployments carry the Arabic labels, so those
/// are accepted as aliases on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(alias = "مبتدئ", alias = "beginner")]
    Beginner,
    #[serde(alias = "متوسط", alias = "intermediate")]
    Intermediate,
    #[serde(alias = "متقدم", alias = "advanced")]
    Advanced,
}

impl Level {
    /// Ordering rank used by path composition: Beginner=1 .. Advanced=3.
    pub fn rank(self) -> u8 {
        match self {
            Level::Beginner => 1,
            Level::Intermediate => 2,
            Level::Advanced => 3,
        }
    }

    /// Rank of an optional level; unknown levels sort as Intermediate.
    pub fn rank_or_default(level: Option<Level>) -> u8 {
        level.map(Level::rank).unwrap_or(2)
    }

    /// Parse an English (any case) or Arabic label.
    pub fn from_label(label: &str) -> Option<Level> {
        match label.trim().to_lowercase().as_str() {
            "beginner" | "مبتدئ" => Some(Level::Beginner),
            "intermediate" | "متوسط" => Some(Level::Intermediate),
            "advanced" | "متقدم" => Some(Level::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Beginner => write!(f, "Beginner"),
            Level::Intermediate => write!(f, "Intermediate"),
            Level::Advanced => write!(f, "Advanced"),
        }
    }
}

impl FromStr for Level {
    type Err = LearnSyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_label(s)
            .ok_or_else(|| LearnSyncError::InvalidInput(format!("Unknown level: {}", s)))
    }
}
