//! Configuration for the bundle executor
//!
//! Loaded from TOML files with serde defaulting; the defaults reproduce the
//! published mainnet constants (eight tip accounts, six block-engine
//! endpoints, five broadcast rounds).

use serde::{Deserialize, Serialize};
use solana_sdk::{commitment_config::CommitmentConfig, native_token::LAMPORTS_PER_SOL};
use std::str::FromStr;
use std::time::Duration;

use crate::executor::broadcast::MAINNET_BLOCK_ENGINE_URLS;
use crate::executor::errors::ExecutorError;
use crate::executor::tip::MAINNET_TIP_ACCOUNTS;

/// Executor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Tip paid per bundle, in SOL
    pub tip_sol: f64,

    /// Tip receiver addresses (base58)
    #[serde(default = "default_tip_accounts")]
    pub tip_accounts: Vec<String>,

    /// Block-engine bundle endpoints
    #[serde(default = "default_block_engine_urls")]
    pub block_engine_urls: Vec<String>,

    /// Broadcast round ceiling
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Delay between broadcast rounds in milliseconds (0 = back-to-back)
    #[serde(default)]
    pub round_delay_ms: u64,

    /// Per-request timeout toward block-engine endpoints, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Commitment level required for confirmation
    #[serde(default = "default_commitment")]
    pub commitment: String,

    /// Signature status poll interval in milliseconds
    #[serde(default = "default_confirm_poll_ms")]
    pub confirm_poll_ms: u64,

    /// Overall confirmation timeout in seconds
    #[serde(default = "default_confirm_timeout_secs")]
    pub confirm_timeout_secs: u64,
}

// Default value functions
fn default_tip_accounts() -> Vec<String> {
    MAINNET_TIP_ACCOUNTS.iter().map(|a| a.to_string()).collect()
}
fn default_block_engine_urls() -> Vec<String> {
    MAINNET_BLOCK_ENGINE_URLS
        .iter()
        .map(|u| u.to_string())
        .collect()
}
fn default_max_rounds() -> u32 {
    5
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_commitment() -> String {
    "finalized".to_string()
}
fn default_confirm_poll_ms() -> u64 {
    500
}
fn default_confirm_timeout_secs() -> u64 {
    60
}

impl ExecutorConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Validate value ranges that serde cannot express
    ///
    /// `tip_sol` must be a finite, non-negative number (a negative or NaN
    /// value would silently saturate to a 0-lamport tip through the cast in
    /// `tip_lamports`) and at least one broadcast round must be allowed.
    pub fn validate(&self) -> Result<(), ExecutorError> {
        if !self.tip_sol.is_finite() || self.tip_sol < 0.0 {
            return Err(ExecutorError::Configuration(format!(
                "tip_sol must be a finite non-negative number, got {}",
                self.tip_sol
            )));
        }
        if self.max_rounds == 0 {
            return Err(ExecutorError::Configuration(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Tip amount in lamports, floored to an integer
    pub fn tip_lamports(&self) -> u64 {
        (self.tip_sol * LAMPORTS_PER_SOL as f64).floor() as u64
    }

    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn confirm_poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirm_poll_ms)
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    /// Parse the configured commitment level
    pub fn commitment_config(&self) -> Result<CommitmentConfig, ExecutorError> {
        CommitmentConfig::from_str(&self.commitment).map_err(|e| {
            ExecutorError::Configuration(format!(
                "invalid commitment level {}: {}",
                self.commitment, e
            ))
        })
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            tip_sol: 0.0001,
            tip_accounts: default_tip_accounts(),
            block_engine_urls: default_block_engine_urls(),
            max_rounds: default_max_rounds(),
            round_delay_ms: 0,
            request_timeout_secs: default_request_timeout_secs(),
            commitment: default_commitment(),
            confirm_poll_ms: default_confirm_poll_ms(),
            confirm_timeout_secs: default_confirm_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_mainnet_constants() {
        let config = ExecutorConfig::default();
        assert_eq!(config.tip_accounts.len(), 8);
        assert_eq!(config.block_engine_urls.len(), 6);
        assert_eq!(config.max_rounds, 5);
        assert_eq!(config.round_delay_ms, 0);
    }

    #[test]
    fn test_tip_lamports_floors() {
        let config = ExecutorConfig {
            tip_sol: 0.0001,
            ..Default::default()
        };
        assert_eq!(config.tip_lamports(), 100_000);

        // Fractional lamports are floored, never rounded up
        let config = ExecutorConfig {
            tip_sol: 0.0000000015,
            ..Default::default()
        };
        assert_eq!(config.tip_lamports(), 1);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: ExecutorConfig = toml::from_str("tip_sol = 0.001").unwrap();
        assert_eq!(config.tip_lamports(), 1_000_000);
        assert_eq!(config.max_rounds, 5);
        assert_eq!(config.commitment, "finalized");
        assert!(config.commitment_config().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_tip_and_zero_rounds() {
        assert!(ExecutorConfig::default().validate().is_ok());

        let negative = ExecutorConfig {
            tip_sol: -0.001,
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ExecutorError::Configuration(_))
        ));

        let nan = ExecutorConfig {
            tip_sol: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(nan.validate(), Err(ExecutorError::Configuration(_))));

        let no_rounds = ExecutorConfig {
            max_rounds: 0,
            ..Default::default()
        };
        assert!(matches!(
            no_rounds.validate(),
            Err(ExecutorError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_commitment_rejected() {
        let config = ExecutorConfig {
            commitment: "sorta-final".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.commitment_config(),
            Err(ExecutorError::Configuration(_))
        ));
    }
}
