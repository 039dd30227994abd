//! Balance inspection helpers
//!
//! Thin read-only wrappers over the RPC client for SOL and SPL token
//! balances, plus base-unit conversions.

use anyhow::{Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use spl_associated_token_account::get_associated_token_address;

/// SOL balance of an account, in lamports.
pub async fn sol_balance(rpc: &RpcClient, pubkey: &Pubkey) -> Result<u64> {
    rpc.get_balance(pubkey)
        .await
        .with_context(|| format!("failed to fetch SOL balance for {}", pubkey))
}

/// UI-denominated SPL token balance for `owner`'s associated token account.
///
/// Returns `None` when the associated account does not exist yet.
pub async fn spl_balance(
    rpc: &RpcClient,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Option<f64>> {
    let ata = get_associated_token_address(owner, mint);
    match rpc
        .get_token_account_balance_with_commitment(&ata, CommitmentConfig::processed())
        .await
    {
        Ok(response) => Ok(response.value.ui_amount),
        // Missing account is the common case for fresh wallets, not a fault
        Err(_) => Ok(None),
    }
}

/// Convert a UI amount to base units for a mint with `decimals`.
pub fn base_to_value(base: f64, decimals: u8) -> f64 {
    base * 10f64.powi(decimals as i32)
}

/// Convert base units back to a UI amount for a mint with `decimals`.
pub fn value_to_base(value: f64, decimals: u8) -> f64 {
    value / 10f64.powi(decimals as i32)
}
