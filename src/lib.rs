//! Bundle transaction executor for the Jito relay network
//!
//! Submits already-signed Solana transactions as atomic bundles through the
//! Jito block-engine layer, paying a priority tip for inclusion. The executor
//! builds and signs the tip transfer, broadcasts the bundle redundantly to
//! all configured relay endpoints, retries across bounded rounds, and
//! confirms on-chain settlement of the tip signature.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use jito_executor::{BundleExecutor, BlockhashWithExpiry, ExecutorConfig};
//! use solana_client::nonblocking::rpc_client::RpcClient;
//! use solana_sdk::signature::Keypair;
//!
//! # async fn example(transactions: Vec<solana_sdk::transaction::VersionedTransaction>) -> anyhow::Result<()> {
//! let rpc = Arc::new(RpcClient::new("https://api.mainnet-beta.solana.com".to_string()));
//! let config = ExecutorConfig::default();
//! let payer = Keypair::new();
//!
//! let blockhash = rpc.get_latest_blockhash_with_commitment(Default::default()).await?;
//! let executor = BundleExecutor::new(config, Arc::clone(&rpc))?;
//! let result = executor
//!     .execute_and_confirm(
//!         &transactions,
//!         &payer,
//!         BlockhashWithExpiry::new(blockhash.0, blockhash.1),
//!     )
//!     .await;
//!
//! if result.confirmed {
//!     println!("landed: {}", result.signature.unwrap());
//! }
//! # Ok(())
//! # }
//! ```

pub mod balances;
pub mod config;
pub mod executor;
pub mod types;
pub mod wallet;

pub use config::ExecutorConfig;
pub use executor::{
    BundleExecutor, ExecutorError, RpcConfirmer, TipConfirmation, TransactionConfirmer,
};
pub use types::{BlockhashWithExpiry, ExecutionResult};

// Re-export commonly used types
pub use solana_sdk::{pubkey::Pubkey, signature::Signature};
