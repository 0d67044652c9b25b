//! Common types for mint interactions.

use std::fmt;

use game_core::{StatBlock, TokenId, Wallet};
use serde::{Deserialize, Serialize};

/// Transaction hash on whatever chain backs the minter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Everything a backend needs to mint one cat token.
///
/// The DNA string is the flat on-chain form with cosmetics and stats
/// interleaved; `seed` is recorded so a mint can be audited against the
/// roll that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    pub owner: Wallet,
    pub stats: StatBlock,
    pub dna: String,
    pub seed: u64,
    pub metadata_uri: Option<String>,
    pub parents: Option<(TokenId, TokenId)>,
}

/// Outcome of a successful mint: the token the backend assigned and the
/// transaction that carried it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintReceipt {
    pub token: TokenId,
    pub tx: TxHash,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_hash_renders_prefixed_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let rendered = TxHash(bytes).to_string();
        assert!(rendered.starts_with("0xab00"));
        assert!(rendered.ends_with("01"));
        assert_eq!(rendered.len(), 2 + 64);
    }
}
