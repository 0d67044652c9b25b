//! Storage layer for game records.
//!
//! Stores hold the data that changes during play: cat records, per-wallet
//! inventories and battle records. Two implementations ship: an in-memory
//! store for tests and local runs, and a file-backed store that mirrors
//! every mutation to a JSON snapshot.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStore;
pub use memory::{MemoryStore, StoreSnapshot};
pub use traits::{BattleStore, CatStore, GameStore, InventoryStore};
