//! In-memory GameStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use game_core::{Battle, BattleId, BattleState, Cat, Inventory, Timestamp, TokenId, Wallet};
use serde::{Deserialize, Serialize};

use crate::repository::{BattleStore, CatStore, InventoryStore, RepositoryError, Result};

/// Serializable image of a whole store, used by the file-backed store.
///
/// Records are kept as sorted vectors rather than maps so the JSON output
/// is stable run over run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub next_token: u64,
    pub next_battle: u64,
    pub cats: Vec<Cat>,
    pub inventories: Vec<Inventory>,
    pub battles: Vec<Battle>,
}

/// In-memory implementation of the game store.
///
/// Cat records, inventories and battles live in `RwLock`ed maps; the two
/// id counters only ever move forward, so token and battle ids are never
/// reused even after deletions.
pub struct MemoryStore {
    cats: RwLock<HashMap<TokenId, Cat>>,
    inventories: RwLock<HashMap<Wallet, Inventory>>,
    battles: RwLock<HashMap<BattleId, Battle>>,
    next_token: AtomicU64,
    next_battle: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            cats: RwLock::new(HashMap::new()),
            inventories: RwLock::new(HashMap::new()),
            battles: RwLock::new(HashMap::new()),
            next_token: AtomicU64::new(1),
            next_battle: AtomicU64::new(1),
        }
    }

    /// Rebuild a store from a snapshot. Counters are bumped past every
    /// recorded id, so a hand-edited snapshot cannot cause id reuse.
    pub fn restore(snapshot: StoreSnapshot) -> Self {
        let mut next_token = snapshot.next_token.max(1);
        for cat in &snapshot.cats {
            next_token = next_token.max(cat.token.0 + 1);
        }
        let mut next_battle = snapshot.next_battle.max(1);
        for battle in &snapshot.battles {
            next_battle = next_battle.max(battle.id.0 + 1);
        }

        Self {
            cats: RwLock::new(snapshot.cats.into_iter().map(|c| (c.token, c)).collect()),
            inventories: RwLock::new(
                snapshot
                    .inventories
                    .into_iter()
                    .map(|i| (i.wallet.clone(), i))
                    .collect(),
            ),
            battles: RwLock::new(snapshot.battles.into_iter().map(|b| (b.id, b)).collect()),
            next_token: AtomicU64::new(next_token),
            next_battle: AtomicU64::new(next_battle),
        }
    }

    /// Capture the current contents as a snapshot.
    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        let cats = self.cats.read().map_err(|_| RepositoryError::LockPoisoned)?;
        let inventories = self
            .inventories
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let battles = self
            .battles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut cats: Vec<Cat> = cats.values().cloned().collect();
        cats.sort_unstable_by_key(|c| c.token);
        let mut inventories: Vec<Inventory> = inventories.values().cloned().collect();
        inventories.sort_unstable_by(|a, b| a.wallet.as_str().cmp(b.wallet.as_str()));
        let mut battles: Vec<Battle> = battles.values().cloned().collect();
        battles.sort_unstable_by_key(|b| b.id);

        Ok(StoreSnapshot {
            next_token: self.next_token.load(Ordering::SeqCst),
            next_battle: self.next_battle.load(Ordering::SeqCst),
            cats,
            inventories,
            battles,
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatStore for MemoryStore {
    fn insert_cat(&self, cat: Cat) -> Result<()> {
        let mut cats = self.cats.write().map_err(|_| RepositoryError::LockPoisoned)?;
        if cats.contains_key(&cat.token) {
            return Err(RepositoryError::CorruptedData(format!(
                "token {} already exists",
                cat.token
            )));
        }

        let mut inventories = self
            .inventories
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let inventory = inventories
            .entry(cat.owner.clone())
            .or_insert_with(|| Inventory::new(cat.owner.clone()));
        if !inventory.insert(cat.token) {
            return Err(RepositoryError::CorruptedData(format!(
                "inventory overflow for {}",
                cat.owner
            )));
        }

        self.next_token.fetch_max(cat.token.0 + 1, Ordering::SeqCst);
        cats.insert(cat.token, cat);
        Ok(())
    }

    fn cat(&self, token: TokenId) -> Result<Option<Cat>> {
        let cats = self.cats.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(cats.get(&token).cloned())
    }

    fn remove_cat(&self, token: TokenId) -> Result<Option<Cat>> {
        let mut cats = self.cats.write().map_err(|_| RepositoryError::LockPoisoned)?;
        let Some(cat) = cats.remove(&token) else {
            return Ok(None);
        };

        let mut inventories = self
            .inventories
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if let Some(inventory) = inventories.get_mut(&cat.owner) {
            inventory.remove(token);
        }
        Ok(Some(cat))
    }

    fn set_cooldown(&self, token: TokenId, until: Timestamp) -> Result<()> {
        let mut cats = self.cats.write().map_err(|_| RepositoryError::LockPoisoned)?;
        match cats.get_mut(&token) {
            Some(cat) => {
                cat.cooldown_until = until;
                Ok(())
            }
            None => Err(RepositoryError::CorruptedData(format!(
                "cooldown set on unknown token {token}"
            ))),
        }
    }

    fn next_token_id(&self) -> Result<TokenId> {
        Ok(TokenId(self.next_token.load(Ordering::SeqCst)))
    }
}

impl InventoryStore for MemoryStore {
    fn inventory(&self, wallet: &Wallet) -> Result<Inventory> {
        let inventories = self
            .inventories
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(inventories
            .get(wallet)
            .cloned()
            .unwrap_or_else(|| Inventory::new(wallet.clone())))
    }

    fn set_active(&self, wallet: &Wallet, token: TokenId) -> Result<bool> {
        let mut inventories = self
            .inventories
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(inventories
            .get_mut(wallet)
            .is_some_and(|inventory| inventory.set_active(token)))
    }
}

impl BattleStore for MemoryStore {
    fn reserve_battle_id(&self) -> Result<BattleId> {
        Ok(BattleId(self.next_battle.fetch_add(1, Ordering::SeqCst)))
    }

    fn battle(&self, id: BattleId) -> Result<Option<Battle>> {
        let battles = self
            .battles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(battles.get(&id).cloned())
    }

    fn put_battle(&self, battle: Battle) -> Result<()> {
        let mut battles = self
            .battles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        battles.insert(battle.id, battle);
        Ok(())
    }

    fn pending_for(&self, wallet: &Wallet) -> Result<Option<Battle>> {
        let battles = self
            .battles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(battles
            .values()
            .find(|b| b.state == BattleState::Pending && b.challenged == *wallet)
            .cloned())
    }

    fn in_progress_for(&self, wallet: &Wallet) -> Result<Option<Battle>> {
        let battles = self
            .battles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(battles
            .values()
            .find(|b| b.state == BattleState::InProgress && b.involves(wallet))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Dna, GameConfig, StatBlock};

    fn cat(token: u64, owner: &str) -> Cat {
        Cat::genesis(
            TokenId(token),
            Wallet::new(owner),
            Dna::new(1, 1),
            StatBlock::uniform(3),
            Timestamp(1_000),
        )
    }

    #[test]
    fn insert_registers_in_inventory_and_remove_detaches() {
        let store = MemoryStore::new();
        store.insert_cat(cat(1, "0xA")).unwrap();
        store.insert_cat(cat(2, "0xA")).unwrap();

        let inventory = store.inventory(&Wallet::new("0xA")).unwrap();
        assert_eq!(inventory.len(), 2);
        assert!(inventory.contains(TokenId(1)));

        let removed = store.remove_cat(TokenId(1)).unwrap().unwrap();
        assert_eq!(removed.token, TokenId(1));
        assert!(store.cat(TokenId(1)).unwrap().is_none());
        assert!(!store.inventory(&Wallet::new("0xA")).unwrap().contains(TokenId(1)));
    }

    #[test]
    fn insert_rejects_duplicates_and_overflow() {
        let store = MemoryStore::new();
        for token in 1..=GameConfig::MAX_CATS as u64 {
            store.insert_cat(cat(token, "0xA")).unwrap();
        }

        assert!(store.insert_cat(cat(1, "0xB")).is_err());
        assert!(store.insert_cat(cat(99, "0xA")).is_err());
        // The failed insert left no record behind.
        assert!(store.cat(TokenId(99)).unwrap().is_none());
    }

    #[test]
    fn token_high_water_mark_never_rewinds() {
        let store = MemoryStore::new();
        assert_eq!(store.next_token_id().unwrap(), TokenId(1));

        store.insert_cat(cat(7, "0xA")).unwrap();
        assert_eq!(store.next_token_id().unwrap(), TokenId(8));

        store.remove_cat(TokenId(7)).unwrap();
        assert_eq!(store.next_token_id().unwrap(), TokenId(8));
    }

    #[test]
    fn set_active_requires_membership() {
        let store = MemoryStore::new();
        store.insert_cat(cat(1, "0xA")).unwrap();

        assert!(store.set_active(&Wallet::new("0xA"), TokenId(1)).unwrap());
        assert!(!store.set_active(&Wallet::new("0xA"), TokenId(2)).unwrap());
        assert!(!store.set_active(&Wallet::new("0xB"), TokenId(1)).unwrap());
        assert_eq!(
            store.inventory(&Wallet::new("0xA")).unwrap().active(),
            Some(TokenId(1))
        );
    }

    #[test]
    fn battle_queries_are_directional() {
        let store = MemoryStore::new();
        let alice = Wallet::new("0xA");
        let bob = Wallet::new("0xB");

        let id = store.reserve_battle_id().unwrap();
        let battle = Battle::open(id, alice.clone(), bob.clone(), TokenId(1), TokenId(2), Timestamp(0));
        store.put_battle(battle.clone()).unwrap();

        // Pending challenges are found from the challenged side only.
        assert!(store.pending_for(&bob).unwrap().is_some());
        assert!(store.pending_for(&alice).unwrap().is_none());
        assert!(store.in_progress_for(&alice).unwrap().is_none());

        let accepted = battle.accept(&bob, Timestamp(1_000)).unwrap();
        store.put_battle(accepted).unwrap();

        assert!(store.pending_for(&bob).unwrap().is_none());
        assert!(store.in_progress_for(&alice).unwrap().is_some());
        assert!(store.in_progress_for(&bob).unwrap().is_some());
    }

    #[test]
    fn battle_ids_are_sequential() {
        let store = MemoryStore::new();
        assert_eq!(store.reserve_battle_id().unwrap(), BattleId(1));
        assert_eq!(store.reserve_battle_id().unwrap(), BattleId(2));
    }

    #[test]
    fn snapshot_round_trips_and_guards_counters() {
        let store = MemoryStore::new();
        store.insert_cat(cat(3, "0xA")).unwrap();
        store.set_active(&Wallet::new("0xA"), TokenId(3)).unwrap();
        let id = store.reserve_battle_id().unwrap();
        store
            .put_battle(Battle::open(
                id,
                Wallet::new("0xA"),
                Wallet::new("0xB"),
                TokenId(3),
                TokenId(9),
                Timestamp(5),
            ))
            .unwrap();

        let snapshot = store.snapshot().unwrap();
        let restored = MemoryStore::restore(snapshot);

        assert_eq!(restored.cat(TokenId(3)).unwrap().unwrap().owner, Wallet::new("0xA"));
        assert_eq!(
            restored.inventory(&Wallet::new("0xA")).unwrap().active(),
            Some(TokenId(3))
        );
        assert!(restored.battle(id).unwrap().is_some());
        assert_eq!(restored.next_token_id().unwrap(), TokenId(4));
        assert_eq!(restored.reserve_battle_id().unwrap(), BattleId(id.0 + 1));
    }
}
