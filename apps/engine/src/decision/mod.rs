//! Decision makers: who chooses each seat's actions.
//!
//! - `RandomPlayer`: random legal moves (seedable)
//! - `SimpleAutoPlay`: weakest legal play, the default fallback
//! - `SmartAutoPlay`: partner-aware play that holds bombs back
//! - `HumanAdapter`: channel-fed human input with a timeout

mod config;
mod human;
mod random;
pub mod registry;
mod simple;
mod smart;
mod trait_def;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use config::{DecisionConfig, DEFAULT_HUMAN_TIMEOUT};
pub use human::{HumanAdapter, HumanHandle, HumanInput};
pub use random::RandomPlayer;
pub use simple::SimpleAutoPlay;
pub use smart::SmartAutoPlay;
pub use trait_def::{DecisionError, DecisionMaker};

/// Strength of an automated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DecisionError::Internal(format!("unknown difficulty '{s}'")))
    }
}

/// Build the automated player for `difficulty`.
pub fn create_automated(difficulty: Difficulty, config: &DecisionConfig) -> Box<dyn DecisionMaker> {
    match difficulty {
        Difficulty::Easy => Box::new(RandomPlayer::new(config.seed())),
        Difficulty::Normal => Box::new(SimpleAutoPlay::new(config.seed())),
        Difficulty::Hard => Box::new(SmartAutoPlay::new(config.seed())),
    }
}
