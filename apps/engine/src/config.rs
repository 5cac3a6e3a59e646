use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::rules::{MAX_LEVEL, MIN_LEVEL};
use crate::error::GameError;

/// Match rules and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Level both teams start at.
    pub starting_level: u8,
    /// The match ends once a team's level exceeds this.
    pub winning_threshold: u8,
    /// Most levels a team may gain from one deal.
    pub max_level_advance: u8,
    /// A deal still running after this many tricks is ended by card count.
    pub max_tricks_per_deal: u32,
    /// The simulator gives up after this many deals.
    pub max_deals: u32,
    /// Match seed; derived deal and player seeds make a match reproducible.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_level: MIN_LEVEL,
            winning_threshold: 13,
            max_level_advance: 3,
            max_tricks_per_deal: 200,
            max_deals: 100,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Defaults overridden by `GUANDAN_*` environment variables.
    pub fn from_env() -> Result<Self, GameError> {
        let defaults = Self::default();
        let config = Self {
            starting_level: var_or("GUANDAN_STARTING_LEVEL", defaults.starting_level)?,
            winning_threshold: var_or("GUANDAN_WINNING_THRESHOLD", defaults.winning_threshold)?,
            max_level_advance: var_or("GUANDAN_MAX_LEVEL_ADVANCE", defaults.max_level_advance)?,
            max_tricks_per_deal: var_or(
                "GUANDAN_MAX_TRICKS_PER_DEAL",
                defaults.max_tricks_per_deal,
            )?,
            max_deals: var_or("GUANDAN_MAX_DEALS", defaults.max_deals)?,
            seed: optional_var("GUANDAN_SEED")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.starting_level) {
            return Err(GameError::config(format!(
                "starting_level must be within {MIN_LEVEL}..={MAX_LEVEL}, got {}",
                self.starting_level
            )));
        }
        // Levels cap at the Ace, so a threshold at or above it could never be exceeded.
        if self.winning_threshold < self.starting_level || self.winning_threshold >= MAX_LEVEL {
            return Err(GameError::config(format!(
                "winning_threshold must be within {}..{MAX_LEVEL}, got {}",
                self.starting_level, self.winning_threshold
            )));
        }
        if self.max_level_advance == 0 {
            return Err(GameError::config("max_level_advance must be positive"));
        }
        if self.max_tricks_per_deal == 0 || self.max_deals == 0 {
            return Err(GameError::config(
                "max_tricks_per_deal and max_deals must be positive",
            ));
        }
        Ok(())
    }
}

fn var_or<T: FromStr>(name: &str, default: T) -> Result<T, GameError> {
    Ok(optional_var(name)?.unwrap_or(default))
}

fn optional_var<T: FromStr>(name: &str) -> Result<Option<T>, GameError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| GameError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VARS: [&str; 6] = [
        "GUANDAN_STARTING_LEVEL",
        "GUANDAN_WINNING_THRESHOLD",
        "GUANDAN_MAX_LEVEL_ADVANCE",
        "GUANDAN_MAX_TRICKS_PER_DEAL",
        "GUANDAN_MAX_DEALS",
        "GUANDAN_SEED",
    ];

    fn clear_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn defaults_are_valid() {
        let config = MatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_level, 2);
        assert_eq!(config.winning_threshold, 13);
    }

    #[test]
    fn unreachable_threshold_is_rejected() {
        let config = MatchConfig {
            winning_threshold: 14,
            ..MatchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn deserializes_partial_json() {
        let config: MatchConfig = serde_json::from_str(r#"{"max_deals": 5, "seed": 9}"#).unwrap();
        assert_eq!(config.max_deals, 5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_level_advance, 3);
    }

    #[test]
    #[serial]
    fn env_overrides_defaults() {
        clear_vars();
        env::set_var("GUANDAN_MAX_DEALS", "12");
        env::set_var("GUANDAN_SEED", "77");
        let config = MatchConfig::from_env().unwrap();
        assert_eq!(config.max_deals, 12);
        assert_eq!(config.seed, Some(77));
        clear_vars();
    }

    #[test]
    #[serial]
    fn env_rejects_garbage() {
        clear_vars();
        env::set_var("GUANDAN_STARTING_LEVEL", "ace");
        let err = MatchConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("GUANDAN_STARTING_LEVEL"));
        clear_vars();
    }
}
