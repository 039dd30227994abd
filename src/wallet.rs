//! Keypair file management
//!
//! Keyfiles are JSON objects holding a base58-encoded 64-byte secret key and
//! the matching base58 public key.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::{signature::Keypair, signer::Signer};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeypairFile {
    secret_key: String,
    public_key: String,
}

/// Load a keypair from `<dir>/<name>.json`, generating and persisting a new
/// one if the file does not exist.
pub fn get_or_create_keypair(dir: &Path, name: &str) -> Result<Keypair> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create key directory {}", dir.display()))?;
    let path = dir.join(format!("{}.json", name));

    if path.exists() {
        return load_keypair(&path);
    }

    let keypair = Keypair::new();
    let file = KeypairFile {
        secret_key: bs58::encode(keypair.to_bytes()).into_string(),
        public_key: keypair.pubkey().to_string(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write keyfile {}", path.display()))?;

    Ok(keypair)
}

fn load_keypair(path: &Path) -> Result<Keypair> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read keyfile {}", path.display()))?;
    let file: KeypairFile = serde_json::from_str(&content)
        .with_context(|| format!("invalid keyfile {}", path.display()))?;

    let bytes = bs58::decode(&file.secret_key)
        .into_vec()
        .context("secretKey is not valid base58")?;
    if bytes.len() != 64 {
        bail!(
            "invalid secret key length: expected 64 bytes, got {}",
            bytes.len()
        );
    }
    if bytes.iter().all(|&b| b == 0) {
        bail!("invalid keypair: all-zero key rejected");
    }

    Keypair::try_from(bytes.as_slice()).context("invalid keypair bytes")
}
