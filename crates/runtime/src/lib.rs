//! Runtime orchestration for the cat game backend.
//!
//! This crate wires together the game rules, the minting seam, the
//! repositories, and the worker task into a cohesive runtime API.
//! Consumers embed [`Runtime`] to process claims and battles, subscribe
//! to events, and interact with the game through [`GameHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`service`] holds the game rules the worker executes
//! - [`repository`] provides the persistence layer
//! - [`clock`] abstracts time so tests can drive the windows
pub mod api;
pub mod clock;
pub mod repository;
pub mod runtime;
pub mod service;

mod workers;

pub use api::{
    AcceptRequest, BattleView, CatView, ChallengeRequest, ClaimReceipt, ClaimRequest, ErrorKind,
    GameError, GameEvent, GameHandle, InventoryView, ReleaseRequest, ResolutionReport,
    ResolveRequest, Result, SetActiveRequest, SpawnGrant,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use repository::{
    BattleStore, CatStore, FileStore, GameStore, InventoryStore, MemoryStore, RepositoryError,
    StoreSnapshot,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use service::GameService;
