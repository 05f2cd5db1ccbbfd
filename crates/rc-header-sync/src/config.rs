//! # Header Sync Configuration
//!
//! Operator bootstrap keys, quorum rule and per-call limits.

use crate::domain::{invariant_valid_signer_list, QuorumRule};
use serde::{Deserialize, Serialize};
use shared_crypto::PublicKey;
use thiserror::Error;

/// Default maximum headers per `syncBlockHeader` call.
pub const DEFAULT_MAX_HEADERS_PER_CALL: usize = 2000;

/// Default maximum messages per `syncCrossChainMsg` call.
pub const DEFAULT_MAX_MSGS_PER_CALL: usize = 2000;

/// Default maximum raw input size (8 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 8 * 1024 * 1024;

/// Default maximum signers in one peer set.
pub const DEFAULT_MAX_PEER_SET_SIZE: usize = 256;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds an unusable value.
    #[error("Invalid config field `{field}`: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong
        reason: String,
    },
}

/// Header sync configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSyncConfig {
    /// Home chain genesis bookkeepers; the operator identity derives from them.
    pub operator_bookkeepers: Vec<PublicKey>,

    /// Threshold rule applied to every peer set.
    pub quorum_rule: QuorumRule,

    /// Maximum headers in one call.
    pub max_headers_per_call: usize,

    /// Maximum cross-chain messages in one call.
    pub max_msgs_per_call: usize,

    /// Maximum size of the raw input and of each encoded item.
    pub max_input_bytes: usize,

    /// Maximum signers in one peer set.
    pub max_peer_set_size: usize,
}

impl Default for HeaderSyncConfig {
    fn default() -> Self {
        Self {
            operator_bookkeepers: Vec::new(),
            quorum_rule: QuorumRule::Byzantine,
            max_headers_per_call: DEFAULT_MAX_HEADERS_PER_CALL,
            max_msgs_per_call: DEFAULT_MAX_MSGS_PER_CALL,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_peer_set_size: DEFAULT_MAX_PEER_SET_SIZE,
        }
    }
}

impl HeaderSyncConfig {
    /// Create a config for testing (smaller limits).
    pub fn for_testing() -> Self {
        Self {
            operator_bookkeepers: Vec::new(),
            quorum_rule: QuorumRule::Byzantine,
            max_headers_per_call: 64,
            max_msgs_per_call: 64,
            max_input_bytes: 256 * 1024,
            max_peer_set_size: 32,
        }
    }

    /// Set the operator bookkeeper keys.
    pub fn with_operator_bookkeepers(mut self, bookkeepers: Vec<PublicKey>) -> Self {
        self.operator_bookkeepers = bookkeepers;
        self
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        invariant_valid_signer_list(&self.operator_bookkeepers, usize::MAX).map_err(|e| {
            ConfigError::Invalid {
                field: "operator_bookkeepers",
                reason: e.to_string(),
            }
        })?;

        let limits = [
            ("max_headers_per_call", self.max_headers_per_call),
            ("max_msgs_per_call", self.max_msgs_per_call),
            ("max_input_bytes", self.max_input_bytes),
            ("max_peer_set_size", self.max_peer_set_size),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be non-zero".to_string(),
                });
            }
        }
        Ok(())
    }
}
