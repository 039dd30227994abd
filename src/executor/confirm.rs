//! Tip transaction confirmation against the ledger
//!
//! Once a relay accepts the bundle, the only observable handle on it is the
//! tip transaction's signature. The poller watches that signature until it
//! reaches the configured commitment, the blockhash validity window closes,
//! or the poll itself faults.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, signature::Signature};
use solana_transaction_status::TransactionStatus;
use tokio::time::Instant;
use tracing::debug;

use crate::executor::errors::ExecutorError;
use crate::types::BlockhashWithExpiry;

/// Ledger-level verdict on the tip transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipConfirmation {
    /// The signature reached the requested commitment. `err` carries the
    /// on-chain error, if any (e.g. insufficient funds).
    Finalized { err: Option<String> },
    /// The ledger height passed `last_valid_block_height` before the
    /// signature landed; the transaction can never confirm.
    Expired,
}

/// Seam over the ledger-reading service.
///
/// `Err` means the confirmation call itself faulted (transport failure or
/// timeout) and is terminal for the execution; a single RPC node reporting
/// an unlanded signature is not treated as proof of failure until the
/// blockhash window has closed.
#[async_trait]
pub trait TransactionConfirmer: Send + Sync {
    async fn confirm(
        &self,
        signature: &Signature,
        blockhash: &BlockhashWithExpiry,
    ) -> Result<TipConfirmation, ExecutorError>;
}

/// Polls an RPC node for signature status until commitment or expiry.
pub struct RpcConfirmer {
    rpc: Arc<RpcClient>,
    commitment: CommitmentConfig,
    poll_interval: Duration,
    timeout: Duration,
}

impl RpcConfirmer {
    pub fn new(
        rpc: Arc<RpcClient>,
        commitment: CommitmentConfig,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            rpc,
            commitment,
            poll_interval,
            timeout,
        }
    }
}

#[async_trait]
impl TransactionConfirmer for RpcConfirmer {
    async fn confirm(
        &self,
        signature: &Signature,
        blockhash: &BlockhashWithExpiry,
    ) -> Result<TipConfirmation, ExecutorError> {
        let started = Instant::now();

        loop {
            let statuses = self
                .rpc
                .get_signature_statuses(&[*signature])
                .await
                .map_err(|e| ExecutorError::Confirmation(e.to_string()))?;

            if let Some(status) = statuses.value.first().and_then(|s| s.as_ref()) {
                if let Some(verdict) = ledger_verdict(status, self.commitment) {
                    return Ok(verdict);
                }
            }

            let height = self
                .rpc
                .get_block_height()
                .await
                .map_err(|e| ExecutorError::Confirmation(e.to_string()))?;
            if height > blockhash.last_valid_block_height {
                debug!(
                    %signature,
                    height,
                    last_valid_block_height = blockhash.last_valid_block_height,
                    "blockhash window closed before confirmation"
                );
                return Ok(TipConfirmation::Expired);
            }

            if started.elapsed() >= self.timeout {
                return Err(ExecutorError::Confirmation(format!(
                    "timed out after {:?} waiting for signature {}",
                    self.timeout, signature
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Map a reported status to a verdict once it reaches `commitment`.
///
/// `None` means the signature has not landed deep enough yet and polling
/// continues.
fn ledger_verdict(
    status: &TransactionStatus,
    commitment: CommitmentConfig,
) -> Option<TipConfirmation> {
    if !status.satisfies_commitment(commitment) {
        return None;
    }
    Some(TipConfirmation::Finalized {
        err: status.err.as_ref().map(|e| e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::hash::Hash;

    fn confirmer(server_url: String, timeout: Duration) -> RpcConfirmer {
        RpcConfirmer::new(
            Arc::new(RpcClient::new(server_url)),
            CommitmentConfig::finalized(),
            Duration::from_millis(10),
            timeout,
        )
    }

    fn status_body(confirmation_status: &str, err: serde_json::Value) -> String {
        let status = if err.is_null() {
            serde_json::json!({ "Ok": null })
        } else {
            serde_json::json!({ "Err": err })
        };
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "context": { "slot": 100 },
                "value": [{
                    "slot": 98,
                    "confirmations": null,
                    "status": status,
                    "err": err,
                    "confirmationStatus": confirmation_status,
                }]
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_finalized_signature_without_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "method": "getSignatureStatuses"
            })))
            .with_body(status_body("finalized", serde_json::Value::Null))
            .create_async()
            .await;

        let blockhash = BlockhashWithExpiry::new(Hash::new_unique(), 500);
        let verdict = confirmer(server.url(), Duration::from_secs(5))
            .confirm(&Signature::default(), &blockhash)
            .await
            .unwrap();

        assert_eq!(verdict, TipConfirmation::Finalized { err: None });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_finalized_signature_with_on_chain_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "method": "getSignatureStatuses"
            })))
            .with_body(status_body(
                "finalized",
                serde_json::json!({ "InstructionError": [0, { "Custom": 1 }] }),
            ))
            .create_async()
            .await;

        let blockhash = BlockhashWithExpiry::new(Hash::new_unique(), 500);
        let verdict = confirmer(server.url(), Duration::from_secs(5))
            .confirm(&Signature::default(), &blockhash)
            .await
            .unwrap();

        match verdict {
            TipConfirmation::Finalized { err: Some(_) } => {}
            other => panic!("expected finalized-with-error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_expired_blockhash_window() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "method": "getSignatureStatuses"
            })))
            .with_body(
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "result": { "context": { "slot": 100 }, "value": [null] }
                })
                .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "method": "getBlockHeight"
            })))
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":501}"#)
            .create_async()
            .await;

        let blockhash = BlockhashWithExpiry::new(Hash::new_unique(), 500);
        let verdict = confirmer(server.url(), Duration::from_secs(5))
            .confirm(&Signature::default(), &blockhash)
            .await
            .unwrap();

        assert_eq!(verdict, TipConfirmation::Expired);
    }

    #[tokio::test]
    async fn test_poll_timeout_is_propagated_as_confirmation_error() {
        let mut server = mockito::Server::new_async().await;
        // Signature stays below the requested commitment on every poll
        server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "method": "getSignatureStatuses"
            })))
            .with_body(
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "result": {
                        "context": { "slot": 100 },
                        "value": [{
                            "slot": 98,
                            "confirmations": 1,
                            "status": { "Ok": null },
                            "err": null,
                            "confirmationStatus": "processed",
                        }]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;
        // Window still open, so expiry never fires
        server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "method": "getBlockHeight"
            })))
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":100}"#)
            .create_async()
            .await;

        let blockhash = BlockhashWithExpiry::new(Hash::new_unique(), 500);
        let err = confirmer(server.url(), Duration::from_millis(30))
            .confirm(&Signature::default(), &blockhash)
            .await
            .unwrap_err();

        match err {
            ExecutorError::Confirmation(msg) => {
                assert!(msg.contains("timed out"), "got: {}", msg)
            }
            other => panic!("expected confirmation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_fault_is_propagated() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(502)
            .create_async()
            .await;

        let blockhash = BlockhashWithExpiry::new(Hash::new_unique(), 500);
        let err = confirmer(server.url(), Duration::from_secs(5))
            .confirm(&Signature::default(), &blockhash)
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutorError::Confirmation(_)));
    }
}
