//! In-memory minter for tests and chainless deployments.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use game_core::TokenId;
use sha2::{Digest, Sha256};

use crate::traits::{CatMinter, MintError};
use crate::types::{MintReceipt, MintRequest, TxHash};

/// [`CatMinter`] that assigns sequential tokens and fabricates transaction
/// hashes. Stat blocks are range-checked the way a real contract would
/// check them; every accepted request is kept for inspection.
#[derive(Clone)]
pub struct MockMinter {
    next_token: Arc<Mutex<u64>>,
    minted: Arc<Mutex<Vec<MintRequest>>>,
}

impl MockMinter {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start the token counter at a chosen value, for seeding tests around
    /// pre-existing tokens.
    pub fn starting_at(first_token: u64) -> Self {
        Self {
            next_token: Arc::new(Mutex::new(first_token)),
            minted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests accepted so far, in mint order.
    pub fn minted(&self) -> Vec<MintRequest> {
        self.minted.lock().unwrap().clone()
    }

    fn fake_tx(token: u64, request: &MintRequest) -> TxHash {
        let mut hasher = Sha256::new();
        hasher.update(token.to_be_bytes());
        hasher.update(request.owner.as_str().as_bytes());
        hasher.update(request.seed.to_be_bytes());
        TxHash(hasher.finalize().into())
    }
}

impl Default for MockMinter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatMinter for MockMinter {
    async fn mint(&self, request: MintRequest) -> Result<MintReceipt, MintError> {
        request
            .stats
            .validate()
            .map_err(|err| MintError::Rejected(err.to_string()))?;

        let token = {
            let mut next = self.next_token.lock().unwrap();
            let token = *next;
            *next += 1;
            token
        };
        let tx = Self::fake_tx(token, &request);
        self.minted.lock().unwrap().push(request);
        Ok(MintReceipt {
            token: TokenId(token),
            tx,
        })
    }

    async fn health_check(&self) -> Result<(), MintError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{StatBlock, Wallet};

    fn request(owner: &str, seed: u64) -> MintRequest {
        MintRequest {
            owner: Wallet::new(owner),
            stats: StatBlock::uniform(3),
            dna: "1,2,3,3,3,3,3".to_string(),
            seed,
            metadata_uri: None,
            parents: None,
        }
    }

    #[tokio::test]
    async fn tokens_are_sequential_and_requests_recorded() {
        let minter = MockMinter::new();
        let first = minter.mint(request("0xA", 1)).await.unwrap();
        let second = minter.mint(request("0xB", 2)).await.unwrap();

        assert_eq!(first.token, TokenId(1));
        assert_eq!(second.token, TokenId(2));
        assert_ne!(first.tx, second.tx);

        let minted = minter.minted();
        assert_eq!(minted.len(), 2);
        assert_eq!(minted[0].owner.as_str(), "0xa");
    }

    #[tokio::test]
    async fn counter_start_is_configurable() {
        let minter = MockMinter::starting_at(100);
        let receipt = minter.mint(request("0xA", 7)).await.unwrap();
        assert_eq!(receipt.token, TokenId(100));
    }

    #[tokio::test]
    async fn clones_share_the_counter() {
        let minter = MockMinter::new();
        let other = minter.clone();
        minter.mint(request("0xA", 1)).await.unwrap();
        let receipt = other.mint(request("0xB", 2)).await.unwrap();
        assert_eq!(receipt.token, TokenId(2));
    }

    #[tokio::test]
    async fn out_of_range_stats_are_rejected() {
        let minter = MockMinter::new();
        let mut bad = request("0xA", 1);
        bad.stats = StatBlock::new(5, 5, 5, 5, 11);

        let err = minter.mint(bad).await.unwrap_err();
        assert!(matches!(err, MintError::Rejected(_)));
        assert!(minter.minted().is_empty());

        // A rejected request does not burn a token id.
        let receipt = minter.mint(request("0xA", 1)).await.unwrap();
        assert_eq!(receipt.token, TokenId(1));
    }
}
