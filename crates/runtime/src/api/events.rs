//! Events emitted by the game runtime for front-ends to observe.
//!
//! Consumers subscribe to [`GameEvent`] to react to mints, evictions and
//! battle progress without blocking the worker loop.
use chain_core::TxHash;
use game_core::{BattleId, BattleReason, TokenId, Wallet};

/// Events emitted by the runtime as game state changes.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A cat was minted, by genesis claim or battle breeding.
    CatMinted {
        token: TokenId,
        owner: Wallet,
        tx: TxHash,
    },
    /// A cat was auto-evicted to make room in a full inventory.
    CatEvicted { token: TokenId, owner: Wallet },
    /// A challenge was issued and is waiting on the challenged wallet.
    ChallengeIssued {
        battle: BattleId,
        challenger: Wallet,
        challenged: Wallet,
    },
    /// A pending challenge lapsed unaccepted.
    ChallengeExpired { battle: BattleId },
    /// A challenge was accepted; the fight is on.
    BattleStarted { battle: BattleId },
    /// An in-progress battle was resolved, decisively or as a draw.
    BattleResolved {
        battle: BattleId,
        reason: BattleReason,
        winner: Option<Wallet>,
        child: Option<TokenId>,
    },
}
