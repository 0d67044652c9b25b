//! The minting seam the game runtime drives.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{MintReceipt, MintRequest};

#[derive(Debug, Error)]
pub enum MintError {
    /// The backend looked at the request and said no (bad DNA encoding,
    /// unknown collection, paused contract).
    #[error("mint rejected: {0}")]
    Rejected(String),

    /// Could not reach the backend at all.
    #[error("network error: {0}")]
    Network(String),

    /// The backend accepted the call but failed internally.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Token minting backend.
///
/// The runtime treats minting as the commit point of a claim: nothing is
/// written to game state until `mint` returns a receipt, and a failed mint
/// leaves no trace. Implementations must assign token ids that never
/// repeat across the lifetime of the backend.
#[async_trait]
pub trait CatMinter: Send + Sync {
    /// Mint one cat and return the assigned token plus transaction hash.
    async fn mint(&self, request: MintRequest) -> Result<MintReceipt, MintError>;

    /// Cheap connectivity probe for startup checks.
    async fn health_check(&self) -> Result<(), MintError>;
}
