//! Bundle transaction executor
//!
//! Submits time-sensitive transactions through the Jito block-engine relay
//! layer: a tip transfer is built and signed locally, placed first in an
//! ordered bundle with the caller's pre-signed transactions, fanned out
//! concurrently to six geographically distributed endpoints, retried across
//! bounded rounds, and confirmed against the ledger.
//!
//! The component is split into focused modules:
//! - **errors**: error taxonomy with retryability and category hooks
//! - **tip**: tip account pool and tip transaction construction
//! - **broadcast**: bundle wire encoding and concurrent relay fan-out
//! - **retry**: bounded-round retry coordination
//! - **confirm**: ledger confirmation seam and RPC poller
//! - **core**: the public `execute_and_confirm` operation
//!
//! Failure semantics: transport failures toward individual relays are
//! absorbed and retried; on-chain rejections are terminal for the bundle
//! (the tip transaction cannot be resubmitted once its blockhash window
//! closes); everything else is caught at the outer boundary and reported
//! through the returned `ExecutionResult`. Nothing here persists failures
//! beyond returning them; the caller owns alerting.

pub mod broadcast;
pub mod confirm;
pub mod core;
pub mod errors;
pub mod retry;
pub mod tip;

pub use broadcast::{BundleBroadcaster, BundleRelay, MAINNET_BLOCK_ENGINE_URLS};
pub use confirm::{RpcConfirmer, TipConfirmation, TransactionConfirmer};
pub use self::core::BundleExecutor;
pub use errors::ExecutorError;
pub use retry::{BroadcastOutcome, RetryCoordinator, DEFAULT_MAX_ROUNDS};
pub use tip::{build_tip_transaction, SignedTip, TipAccountPool, MAINNET_TIP_ACCOUNTS};
