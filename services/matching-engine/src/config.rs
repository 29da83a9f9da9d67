//! Engine configuration
//!
//! The engine needs nothing to run; every field has a default. A driver
//! that keeps its settings in JSON can load them with
//! [`EngineConfig::from_json_str`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("first_order_id must be >= 1")]
    InvalidFirstOrderId,
}

/// Configuration for the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Identifier handed to the first submitted order.
    pub first_order_id: u64,
    /// Run the book self-check after every mutating call and abort on failure.
    pub verify_invariants: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            first_order_id: 1,
            verify_invariants: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_order_id == 0 {
            return Err(ConfigError::InvalidFirstOrderId);
        }
        Ok(())
    }
}
