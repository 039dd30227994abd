//! Tip account selection and tip transaction construction
//!
//! Jito prioritizes bundles by the value transferred to one of its well-known
//! tip accounts. The tip transfer must travel in the same atomic bundle as the
//! transactions it pays for, so the executor builds and signs it locally and
//! places it first in the bundle.

use rand::Rng;
use solana_sdk::{
    message::{v0::Message as MessageV0, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_instruction,
    transaction::VersionedTransaction,
};

use crate::executor::errors::ExecutorError;
use crate::types::BlockhashWithExpiry;

/// The eight mainnet tip accounts published by Jito.
///
/// https://jito-labs.gitbook.io/mev/searcher-resources/json-rpc-api-reference/bundles/gettipaccounts
pub const MAINNET_TIP_ACCOUNTS: [&str; 8] = [
    "96gYZGLnJYVFmbjzopPSU6QiEV5fGqZNyN9nmNhvrZU5",
    "HFqU5x63VTqvQss8hp11i4wVV8bD44PvwucfZ2bU7gRe",
    "Cw8CFyM9FkoMi7K7Crf6HNQqf4uEMzpKw6QNghXLvLkY",
    "ADaUMid9yfUytqMBgopwjb2DTLSokTSzL1zt6iGPaS49",
    "DfXygSm4jCyNCybVYYK6DwvWqjKee8pbDmJGcLWNDXjh",
    "ADuUkR4vqLUMWXxW9gh6D6L8pMSawimctcNZ5pGwDcEt",
    "DttWaMuVvTiduZRnguLF7jNxTgiMBZ1hyAumKUiL2KRL",
    "3AVi9Tg9Uo68tJfuvoKvqKNWKkC5wPdSSdeBnizKZ6jT",
];

/// Fixed, ordered pool of tip receiver addresses.
///
/// Immutable for the lifetime of the executor. Selection is uniform per call
/// to spread contention across the accounts.
#[derive(Debug, Clone)]
pub struct TipAccountPool {
    accounts: Vec<Pubkey>,
}

impl TipAccountPool {
    /// Build a pool from base58 address strings.
    ///
    /// Fails on an empty list or an unparseable address, so a constructed
    /// pool is always non-empty.
    pub fn new<S: AsRef<str>>(accounts: &[S]) -> Result<Self, ExecutorError> {
        if accounts.is_empty() {
            return Err(ExecutorError::Configuration(
                "tip account pool must not be empty".to_string(),
            ));
        }
        let accounts = accounts
            .iter()
            .map(|a| {
                a.as_ref().parse::<Pubkey>().map_err(|e| {
                    ExecutorError::Configuration(format!(
                        "invalid tip account {}: {}",
                        a.as_ref(),
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { accounts })
    }

    /// Pool of the published mainnet tip accounts.
    pub fn mainnet() -> Self {
        Self::new(&MAINNET_TIP_ACCOUNTS).expect("published mainnet tip accounts are valid")
    }

    /// Pick one account uniformly at random.
    ///
    /// The choice is per call and never cached here; callers own any
    /// bookkeeping of the selected account.
    pub fn pick(&self) -> Pubkey {
        let idx = rand::thread_rng().gen_range(0..self.accounts.len());
        self.accounts[idx]
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, account: &Pubkey) -> bool {
        self.accounts.contains(account)
    }
}

/// A signed tip transaction plus its signature for confirmation lookup.
#[derive(Debug, Clone)]
pub struct SignedTip {
    pub transaction: VersionedTransaction,
    pub signature: Signature,
}

/// Build and sign the tip transfer.
///
/// Compiles a single `system_instruction::transfer` from the payer to the tip
/// account into a v0 message anchored at the supplied blockhash and signs it
/// with the payer. Deterministic given identical inputs; never touches any
/// caller-supplied transaction.
pub fn build_tip_transaction(
    payer: &Keypair,
    tip_account: &Pubkey,
    tip_lamports: u64,
    blockhash: &BlockhashWithExpiry,
) -> Result<SignedTip, ExecutorError> {
    let transfer = system_instruction::transfer(&payer.pubkey(), tip_account, tip_lamports);
    let message = MessageV0::try_compile(&payer.pubkey(), &[transfer], &[], blockhash.blockhash)
        .map_err(|e| ExecutorError::TipBuild(e.to_string()))?;
    let transaction = VersionedTransaction::try_new(VersionedMessage::V0(message), &[payer])
        .map_err(|e| ExecutorError::TipBuild(e.to_string()))?;
    let signature = transaction.signatures[0];

    Ok(SignedTip {
        transaction,
        signature,
    })
}
