//! Typed requests for the mutating game operations.
//!
//! The serializing layer (HTTP, RPC, plugin bridge) deserializes into
//! these instead of passing loose strings; wallets canonicalize on the way
//! in via `Wallet`'s `From<String>`.
use game_core::{BattleId, BattleReason, TokenId, Wallet};
use serde::{Deserialize, Serialize};

/// Claim a genesis cat for a wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub wallet: Wallet,
    /// Metadata URI recorded with the mint, if the caller hosts one.
    pub metadata_uri: Option<String>,
}

/// Mark one of the wallet's cats as its active battler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveRequest {
    pub wallet: Wallet,
    pub token: TokenId,
}

/// Manually delete one of the wallet's cats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub wallet: Wallet,
    pub token: TokenId,
}

/// Challenge another wallet to a battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRequest {
    pub challenger: Wallet,
    pub challenged: Wallet,
    pub challenger_cat: TokenId,
    pub challenged_cat: TokenId,
}

/// Accept a pending challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptRequest {
    pub battle: BattleId,
    pub wallet: Wallet,
}

/// Report the outcome of an in-progress battle.
///
/// `winner` and `loser` are required for death/quit outcomes and must be
/// absent for a timeout draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub battle: BattleId,
    pub reason: BattleReason,
    pub winner: Option<Wallet>,
    pub loser: Option<Wallet>,
}
