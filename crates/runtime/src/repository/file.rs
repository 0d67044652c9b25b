//! File-backed GameStore implementation.
//!
//! Wraps a [`MemoryStore`] and mirrors it to a single JSON snapshot file
//! after every mutation. JSON keeps the save hand-inspectable; writes go
//! through a temp file and an atomic rename so a crash mid-write leaves
//! the previous snapshot intact.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::{Battle, BattleId, Cat, Inventory, Timestamp, TokenId, Wallet};

use crate::repository::memory::{MemoryStore, StoreSnapshot};
use crate::repository::{BattleStore, CatStore, InventoryStore, RepositoryError, Result};

/// File-backed implementation of the game store.
pub struct FileStore {
    inner: MemoryStore,
    path: PathBuf,
}

impl FileStore {
    /// Open a store at the given snapshot path, loading existing contents
    /// if the file is present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }

        let inner = if path.exists() {
            let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
            let snapshot: StoreSnapshot = serde_json::from_slice(&bytes)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
            tracing::debug!(
                target: "runtime::repository",
                path = %path.display(),
                cats = snapshot.cats.len(),
                battles = snapshot.battles.len(),
                "loaded store snapshot"
            );
            MemoryStore::restore(snapshot)
        } else {
            MemoryStore::new()
        };

        Ok(Self { inner, path })
    }

    fn persist(&self) -> Result<()> {
        let snapshot = self.inner.snapshot()?;
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            target: "runtime::repository",
            path = %self.path.display(),
            "saved store snapshot"
        );
        Ok(())
    }
}

impl CatStore for FileStore {
    fn insert_cat(&self, cat: Cat) -> Result<()> {
        self.inner.insert_cat(cat)?;
        self.persist()
    }

    fn cat(&self, token: TokenId) -> Result<Option<Cat>> {
        self.inner.cat(token)
    }

    fn remove_cat(&self, token: TokenId) -> Result<Option<Cat>> {
        let removed = self.inner.remove_cat(token)?;
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }

    fn set_cooldown(&self, token: TokenId, until: Timestamp) -> Result<()> {
        self.inner.set_cooldown(token, until)?;
        self.persist()
    }

    fn next_token_id(&self) -> Result<TokenId> {
        self.inner.next_token_id()
    }
}

impl InventoryStore for FileStore {
    fn inventory(&self, wallet: &Wallet) -> Result<Inventory> {
        self.inner.inventory(wallet)
    }

    fn set_active(&self, wallet: &Wallet, token: TokenId) -> Result<bool> {
        let changed = self.inner.set_active(wallet, token)?;
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }
}

impl BattleStore for FileStore {
    fn reserve_battle_id(&self) -> Result<BattleId> {
        // Persisted immediately so a restart cannot hand the id out again.
        let id = self.inner.reserve_battle_id()?;
        self.persist()?;
        Ok(id)
    }

    fn battle(&self, id: BattleId) -> Result<Option<Battle>> {
        self.inner.battle(id)
    }

    fn put_battle(&self, battle: Battle) -> Result<()> {
        self.inner.put_battle(battle)?;
        self.persist()
    }

    fn pending_for(&self, wallet: &Wallet) -> Result<Option<Battle>> {
        self.inner.pending_for(wallet)
    }

    fn in_progress_for(&self, wallet: &Wallet) -> Result<Option<Battle>> {
        self.inner.in_progress_for(wallet)
    }
}
