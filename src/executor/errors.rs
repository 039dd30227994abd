//! Error types for the bundle executor
//!
//! Errors are designed to be:
//! - Informative: rich context for debugging and monitoring
//! - Composable: easy to convert from underlying error types
//! - Observable: categorized for metrics and tracing

use thiserror::Error;

/// Error type covering the bundle execution lifecycle
///
/// Broadcast-level transport errors are absorbed by the retry coordinator and
/// never surface from `execute_and_confirm`; the remaining variants are caught
/// at the outermost boundary and reported through `ExecutionResult::failed`.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Failed to compile or sign the tip transaction
    #[error("Tip transaction build failed: {0}")]
    TipBuild(String),

    /// Failed to serialize a transaction for the relay wire format
    #[error("Bundle serialization failed: {0}")]
    Serialization(String),

    /// A single relay endpoint rejected the bundle or was unreachable
    ///
    /// Tolerated per endpoint; a round fails only when every endpoint
    /// returns this.
    #[error("Relay error ({endpoint}): {reason}")]
    Relay {
        /// The block-engine URL that failed
        endpoint: String,
        /// Detailed reason for the failure
        reason: String,
    },

    /// The confirmation call itself faulted (transport failure or timeout)
    ///
    /// Terminal for the execution; the caller may retry the whole operation
    /// with a fresh blockhash.
    #[error("Confirmation error: {0}")]
    Confirmation(String),

    /// Invalid executor configuration
    ///
    /// This includes:
    /// - Empty tip-account pool or relay endpoint list
    /// - Unparseable tip-account addresses or commitment level
    /// - HTTP client construction failure
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Wrapped error from external crates
    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl ExecutorError {
    /// Check if this error is potentially retryable
    ///
    /// Returns `true` if retrying the operation might succeed,
    /// `false` if the error is fatal or non-retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            // A single relay failing is transient; other relays or later
            // rounds may still accept the bundle
            Self::Relay { .. } => true,

            // Confirmation faults are terminal for this bundle: the same tip
            // transaction cannot be resubmitted once its blockhash window
            // closes. The caller retries the whole operation instead.
            Self::Confirmation(_) => false,
            Self::TipBuild(_) => false,
            Self::Serialization(_) => false,
            Self::Configuration(_) => false,
            Self::External(_) => false,
        }
    }

    /// Get the error category for metrics and observability
    pub fn category(&self) -> &'static str {
        match self {
            Self::TipBuild(_) => "tip",
            Self::Serialization(_) => "serialization",
            Self::Relay { .. } => "relay",
            Self::Confirmation(_) => "confirmation",
            Self::Configuration(_) => "config",
            Self::External(_) => "external",
        }
    }
}
