//! Decision maker configuration.
//!
//! Standard fields are typed; anything else stays in `custom` for the
//! algorithm that wants it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Wait applied to human input when none is configured.
pub const DEFAULT_HUMAN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_timeout_ms: Option<u64>,

    #[serde(flatten)]
    pub custom: JsonValue,
}

impl DecisionConfig {
    /// Parse a JSON config, falling back to an empty config when it does not fit.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_else(Self::empty)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn human_timeout(&self) -> Duration {
        self.human_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_HUMAN_TIMEOUT)
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }

    pub fn empty() -> Self {
        Self {
            seed: None,
            human_timeout_ms: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::empty()
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self::empty()
    }
}
