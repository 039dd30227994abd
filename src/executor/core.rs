//! The bundle executor's public operation
//!
//! `execute_and_confirm` packages a tip transfer ahead of the caller's
//! pre-signed transactions, fans the bundle out to every configured
//! block-engine endpoint across bounded retry rounds, and confirms the tip
//! signature on the ledger. The method itself never returns `Err`: every
//! fault is folded into the returned `ExecutionResult`.

use std::sync::Arc;

use parking_lot::RwLock;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, transaction::VersionedTransaction};
use tracing::{debug, warn};

use crate::config::ExecutorConfig;
use crate::executor::broadcast::BundleBroadcaster;
use crate::executor::confirm::{RpcConfirmer, TipConfirmation, TransactionConfirmer};
use crate::executor::errors::ExecutorError;
use crate::executor::retry::{BroadcastOutcome, RetryCoordinator};
use crate::executor::tip::{build_tip_transaction, TipAccountPool};
use crate::types::{BlockhashWithExpiry, ExecutionResult};

/// Executes transaction bundles through the Jito relay layer.
///
/// The tip pool, endpoint list, and HTTP client are built once at
/// construction and read-only afterwards. Concurrent `execute_and_confirm`
/// calls on one instance are allowed; the only shared mutable state is the
/// remembered tip account, which is cosmetic bookkeeping (each call closes
/// over its own locally selected account).
pub struct BundleExecutor<C: TransactionConfirmer> {
    config: ExecutorConfig,
    tip_pool: TipAccountPool,
    broadcaster: BundleBroadcaster,
    coordinator: RetryCoordinator,
    confirmer: C,
    // Overwritten per call; racing concurrent callers is benign
    last_tip_account: RwLock<Option<Pubkey>>,
}

impl BundleExecutor<RpcConfirmer> {
    /// Executor confirming through the given RPC node.
    pub fn new(config: ExecutorConfig, rpc: Arc<RpcClient>) -> Result<Self, ExecutorError> {
        let confirmer = RpcConfirmer::new(
            rpc,
            config.commitment_config()?,
            config.confirm_poll_interval(),
            config.confirm_timeout(),
        );
        Self::with_confirmer(config, confirmer)
    }
}

impl<C: TransactionConfirmer> BundleExecutor<C> {
    /// Executor with a caller-supplied confirmation backend.
    pub fn with_confirmer(config: ExecutorConfig, confirmer: C) -> Result<Self, ExecutorError> {
        config.validate()?;
        let tip_pool = TipAccountPool::new(&config.tip_accounts)?;
        let broadcaster =
            BundleBroadcaster::new(config.block_engine_urls.clone(), config.request_timeout())?;
        let coordinator = RetryCoordinator::new(config.max_rounds, config.round_delay());

        Ok(Self {
            config,
            tip_pool,
            broadcaster,
            coordinator,
            confirmer,
            last_tip_account: RwLock::new(None),
        })
    }

    /// The tip account selected by the most recent execution, if any.
    pub fn last_tip_account(&self) -> Option<Pubkey> {
        *self.last_tip_account.read()
    }

    /// Submit `transactions` bundled behind a freshly built tip transfer and
    /// confirm the tip signature.
    ///
    /// All transactions are treated as opaque signed blobs; only the tip
    /// transfer is built and signed here, and the tip is paid once no matter
    /// how many endpoints the broadcast fans out to. Unexpected faults are
    /// caught at this boundary and reported as `ExecutionResult::failed`.
    pub async fn execute_and_confirm(
        &self,
        transactions: &[VersionedTransaction],
        payer: &Keypair,
        blockhash: BlockhashWithExpiry,
    ) -> ExecutionResult {
        match self.try_execute(transactions, payer, &blockhash).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, category = e.category(), "bundle execution failed");
                ExecutionResult::failed(e.to_string())
            }
        }
    }

    async fn try_execute(
        &self,
        transactions: &[VersionedTransaction],
        payer: &Keypair,
        blockhash: &BlockhashWithExpiry,
    ) -> Result<ExecutionResult, ExecutorError> {
        let tip_account = self.tip_pool.pick();
        *self.last_tip_account.write() = Some(tip_account);

        let tip = build_tip_transaction(
            payer,
            &tip_account,
            self.config.tip_lamports(),
            blockhash,
        )?;
        debug!(
            tip_account = %tip_account,
            tip_lamports = self.config.tip_lamports(),
            tip_signature = %tip.signature,
            bundle_len = transactions.len() + 1,
            "built tip transaction"
        );

        let bundle = BundleBroadcaster::encode_bundle(&tip.transaction, transactions)?;

        match self.coordinator.run(&self.broadcaster, &bundle).await {
            BroadcastOutcome::Exhausted { rounds } => {
                warn!(rounds, "bundle broadcast exhausted");
                Ok(ExecutionResult::unconfirmed())
            }
            BroadcastOutcome::Accepted { .. } => {
                match self.confirmer.confirm(&tip.signature, blockhash).await? {
                    TipConfirmation::Finalized { err: None } => {
                        debug!(signature = %tip.signature, "tip transaction confirmed");
                        Ok(ExecutionResult::confirmed(tip.signature.to_string()))
                    }
                    TipConfirmation::Finalized { err: Some(err) } => {
                        warn!(signature = %tip.signature, %err, "tip transaction failed on chain");
                        Ok(ExecutionResult::rejected(tip.signature.to_string()))
                    }
                    TipConfirmation::Expired => {
                        warn!(signature = %tip.signature, "blockhash expired before confirmation");
                        Ok(ExecutionResult::rejected(tip.signature.to_string()))
                    }
                }
            }
        }
    }
}
