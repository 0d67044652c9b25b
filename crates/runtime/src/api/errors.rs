//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule violations from game-core, storage and minting failures, and
//! worker coordination faults so clients deal with one error enum.
use std::fmt;

use chain_core::MintError;
use game_core::{AdmissionError, BattleError, BattleId, BattleState, StatError, Timestamp, TokenId, Wallet};
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("cat {0} not found")]
    CatNotFound(TokenId),

    #[error("battle {0} not found")]
    BattleNotFound(BattleId),

    #[error("cat {token} is not owned by {wallet}")]
    NotYourCat { token: TokenId, wallet: Wallet },

    #[error("only the challenged wallet may accept")]
    NotChallenged,

    #[error("{0} is not a participant in this battle")]
    NotAParticipant(Wallet),

    #[error("battle is {actual}, expected {expected}")]
    InvalidState {
        expected: BattleState,
        actual: BattleState,
    },

    #[error("challenge acceptance window has expired")]
    ChallengeExpired,

    #[error("cat {token} is on cooldown until {until}")]
    OnCooldown { token: TokenId, until: Timestamp },

    #[error("{0} is already in a battle")]
    AlreadyBusy(Wallet),

    #[error("inventory is full and no cat is eligible for eviction")]
    CapacityViolation,

    #[error("daily claim limit reached for this wallet")]
    DailyClaimLimit,

    #[error("daily spawn cap reached")]
    SpawnCapReached,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Stats(#[from] StatError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("mint failed: {0}")]
    Mint(#[from] MintError),

    #[error("game worker command channel closed")]
    CommandChannelClosed,

    #[error("game worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("game worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl From<BattleError> for GameError {
    fn from(err: BattleError) -> Self {
        match err {
            BattleError::InvalidState { expected, actual } => {
                Self::InvalidState { expected, actual }
            }
            BattleError::NotChallenged => Self::NotChallenged,
            BattleError::AcceptWindowExpired => Self::ChallengeExpired,
            BattleError::NotAParticipant(wallet) => Self::NotAParticipant(wallet),
            BattleError::WinnerIsLoser => {
                Self::Validation("winner and loser must be different wallets".to_string())
            }
        }
    }
}

impl From<AdmissionError> for GameError {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::NoEvictionCandidate => Self::CapacityViolation,
        }
    }
}

impl GameError {
    /// Coarse category for the serializing layer to map onto status codes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CatNotFound(_) | Self::BattleNotFound(_) => ErrorKind::NotFound,
            Self::NotYourCat { .. } | Self::NotChallenged | Self::NotAParticipant(_) => {
                ErrorKind::Unauthorized
            }
            Self::InvalidState { .. } | Self::AlreadyBusy(_) => ErrorKind::InvalidState,
            Self::ChallengeExpired | Self::OnCooldown { .. } => ErrorKind::Expired,
            Self::CapacityViolation | Self::DailyClaimLimit | Self::SpawnCapReached => {
                ErrorKind::CapacityViolation
            }
            Self::Validation(_) | Self::Stats(_) => ErrorKind::Validation,
            Self::Repository(_)
            | Self::Mint(_)
            | Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_) => ErrorKind::Internal,
        }
    }
}

/// The operational error categories plus `Internal` for infrastructure
/// faults (storage, minting, worker channels).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    InvalidState,
    Expired,
    CapacityViolation,
    Validation,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::Expired => "expired",
            ErrorKind::CapacityViolation => "capacity_violation",
            ErrorKind::Validation => "validation",
            ErrorKind::Internal => "internal",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battle_errors_map_onto_game_errors() {
        let err: GameError = BattleError::AcceptWindowExpired.into();
        assert_eq!(err.kind(), ErrorKind::Expired);

        let err: GameError = BattleError::NotChallenged.into();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err: GameError = AdmissionError::NoEvictionCandidate.into();
        assert_eq!(err.kind(), ErrorKind::CapacityViolation);
    }

    #[test]
    fn kinds_cover_the_quota_errors() {
        assert_eq!(GameError::DailyClaimLimit.kind(), ErrorKind::CapacityViolation);
        assert_eq!(GameError::SpawnCapReached.kind(), ErrorKind::CapacityViolation);
        assert_eq!(
            GameError::OnCooldown {
                token: TokenId(1),
                until: Timestamp(5)
            }
            .kind(),
            ErrorKind::Expired
        );
    }

    #[test]
    fn kind_labels_are_snake_case() {
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(ErrorKind::CapacityViolation.to_string(), "capacity_violation");
    }
}
