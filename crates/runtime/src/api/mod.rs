//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or infrastructure.

pub mod errors;
pub mod events;
pub mod handle;
pub mod requests;
pub mod views;

pub use errors::{ErrorKind, GameError, Result};
pub use events::GameEvent;
pub use handle::GameHandle;
pub use requests::{
    AcceptRequest, ChallengeRequest, ClaimRequest, ReleaseRequest, ResolveRequest,
    SetActiveRequest,
};
pub use views::{BattleView, CatView, ClaimReceipt, InventoryView, ResolutionReport, SpawnGrant};
