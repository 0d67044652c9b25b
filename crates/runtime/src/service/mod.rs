//! Game operations against the store, the minter and the clock.
//!
//! [`GameService`] is the single writer: the worker owns one instance and
//! feeds it commands sequentially, so every operation here runs as an
//! uninterrupted critical section. Operations compute every fallible
//! result before the first store write, keeping each resolution
//! all-or-nothing.
//!
//! Roster operations (claiming, activation, inventory reads) live in
//! `roster.rs`; battle operations in `arena.rs`.

mod arena;
mod roster;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use chain_core::CatMinter;
use game_core::{Battle, BattleId, Cat, GameConfig, Inventory, PcgRng, Timestamp, TokenId, Wallet};

use crate::api::{GameError, GameEvent, Result};
use crate::clock::Clock;
use crate::repository::{GameStore, RepositoryError};

/// Counter for one UTC day, reset lazily when the day bucket rolls over.
#[derive(Debug, Clone, Copy, Default)]
struct DailyQuota {
    day: i64,
    count: u32,
}

impl DailyQuota {
    fn used(&self, now: Timestamp) -> u32 {
        if self.day == now.day_bucket() {
            self.count
        } else {
            0
        }
    }

    fn record(&mut self, now: Timestamp) {
        let bucket = now.day_bucket();
        if self.day == bucket {
            self.count += 1;
        } else {
            self.day = bucket;
            self.count = 1;
        }
    }
}

/// The game rules wired to their collaborators.
pub struct GameService {
    config: GameConfig,
    store: Arc<dyn GameStore>,
    minter: Arc<dyn CatMinter>,
    clock: Arc<dyn Clock>,
    rng: PcgRng,
    seed_source: Box<dyn FnMut() -> u64 + Send>,
    event_tx: broadcast::Sender<GameEvent>,
    claim_quotas: HashMap<Wallet, DailyQuota>,
    spawn_quota: DailyQuota,
}

impl GameService {
    pub fn new(
        config: GameConfig,
        store: Arc<dyn GameStore>,
        minter: Arc<dyn CatMinter>,
        clock: Arc<dyn Clock>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            config,
            store,
            minter,
            clock,
            rng: PcgRng,
            seed_source: Box::new(rand::random::<u64>),
            event_tx,
            claim_quotas: HashMap::new(),
            spawn_quota: DailyQuota::default(),
        }
    }

    /// Replace the entropy source behind genesis rolls and breeding.
    /// Tests pin this to make outcomes reproducible.
    pub fn with_seed_source(mut self, source: impl FnMut() -> u64 + Send + 'static) -> Self {
        self.seed_source = Box::new(source);
        self
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn next_seed(&mut self) -> u64 {
        (self.seed_source)()
    }

    fn emit(&self, event: GameEvent) {
        // No subscribers is fine.
        let _ = self.event_tx.send(event);
    }

    fn require_cat(&self, token: TokenId) -> Result<Cat> {
        self.store.cat(token)?.ok_or(GameError::CatNotFound(token))
    }

    fn require_owned_cat(&self, token: TokenId, wallet: &Wallet) -> Result<Cat> {
        let cat = self.require_cat(token)?;
        if cat.owner != *wallet {
            return Err(GameError::NotYourCat {
                token,
                wallet: wallet.clone(),
            });
        }
        Ok(cat)
    }

    fn require_battle(&self, id: BattleId) -> Result<Battle> {
        self.store
            .battle(id)?
            .ok_or(GameError::BattleNotFound(id))
    }

    /// The inventory as (token, score) pairs for the admission policy.
    /// Every listed token must have a record.
    fn scored_roster(&self, inventory: &Inventory) -> Result<Vec<(TokenId, u32)>> {
        let mut scored = Vec::with_capacity(inventory.len());
        for &token in inventory.tokens() {
            let cat = self.store.cat(token)?.ok_or_else(|| {
                GameError::Repository(RepositoryError::CorruptedData(format!(
                    "inventory references missing token {token}"
                )))
            })?;
            scored.push((token, cat.rarity_score));
        }
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_counts_within_one_day_and_resets_on_rollover() {
        let mut quota = DailyQuota::default();
        let morning = Timestamp(Timestamp::DAY_MS * 400 + 1_000);
        let evening = morning.plus_millis(10 * 60 * 60 * 1_000);
        let next_day = Timestamp(Timestamp::DAY_MS * 401);

        assert_eq!(quota.used(morning), 0);
        quota.record(morning);
        quota.record(evening);
        assert_eq!(quota.used(evening), 2);

        assert_eq!(quota.used(next_day), 0);
        quota.record(next_day);
        assert_eq!(quota.used(next_day), 1);
    }
}
