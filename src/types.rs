//! Shared type definitions for the bundle executor

use serde::{Deserialize, Serialize};
use solana_sdk::hash::Hash;

/// A recent blockhash paired with the last block height at which it is valid.
///
/// Supplied externally per execution (typically from
/// `RpcClient::get_latest_blockhash_with_commitment`). The pair is never
/// mutated; callers replace it wholesale when they fetch a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockhashWithExpiry {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

impl BlockhashWithExpiry {
    pub fn new(blockhash: Hash, last_valid_block_height: u64) -> Self {
        Self {
            blockhash,
            last_valid_block_height,
        }
    }
}

/// Outcome of a single `execute_and_confirm` call.
///
/// Immutable once constructed. `signature` is the base58 signature of the tip
/// transaction when one was built and broadcast; `error` carries the message
/// of any fault caught at the outer boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Tip transaction finalized with no on-chain error.
    pub fn confirmed(signature: String) -> Self {
        Self {
            confirmed: true,
            signature: Some(signature),
            error: None,
        }
    }

    /// No relay ever accepted the bundle; nothing landed on chain.
    pub fn unconfirmed() -> Self {
        Self {
            confirmed: false,
            signature: None,
            error: None,
        }
    }

    /// The bundle was accepted but the tip transaction finalized with an
    /// on-chain error or its blockhash window closed before inclusion.
    pub fn rejected(signature: String) -> Self {
        Self {
            confirmed: false,
            signature: Some(signature),
            error: None,
        }
    }

    /// An unexpected fault was caught at the outer boundary.
    pub fn failed(error: String) -> Self {
        Self {
            confirmed: false,
            signature: None,
            error: Some(error),
        }
    }
}
