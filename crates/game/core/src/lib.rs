//! Deterministic game rules and data types shared across the stack.
//!
//! `game-core` defines the canonical cat model (stats, rarity, DNA, names)
//! and the pure rule functions over it: breeding, roster admission and the
//! battle state machine. Everything here is synchronous and side-effect
//! free; persistence, minting and clocks live in the crates that depend on
//! the types re-exported here.
pub mod battle;
pub mod breeding;
pub mod cat;
pub mod config;
pub mod dna;
pub mod inventory;
pub mod naming;
pub mod rarity;
pub mod rng;
pub mod stats;
pub mod types;

pub use battle::{Battle, BattleCast, BattleError, BattleReason, BattleState};
pub use breeding::{breed, child_generation, generation_bonus, genesis_stats};
pub use cat::{Cat, TEXTURE_BASE_URL, texture_url};
pub use config::GameConfig;
pub use dna::Dna;
pub use inventory::{AdmissionError, Inventory, select_eviction};
pub use naming::give_name;
pub use rarity::{Perk, RarityTier, perks};
pub use rng::{PcgRng, RngOracle, mix_seed};
pub use stats::{StatBlock, StatError};
pub use types::{BattleId, Timestamp, TokenId, Wallet};
