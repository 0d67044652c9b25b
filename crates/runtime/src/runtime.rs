//! High-level runtime orchestrator.
//!
//! The runtime owns the game worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the game backend.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use chain_core::{CatMinter, MockMinter};
use game_core::GameConfig;

use crate::api::{GameError, GameEvent, GameHandle, Result};
use crate::clock::{Clock, SystemClock};
use crate::repository::{FileStore, GameStore, MemoryStore};
use crate::service::GameService;
use crate::workers::{Command, GameWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Snapshot file backing the store. `None` keeps state in memory
    /// only.
    pub data_file: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            data_file: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BLOCKCATS_DATA_FILE` - Snapshot file path (default: memory only)
    /// - `BLOCKCATS_DAILY_CLAIM_LIMIT` - Genesis claims per wallet per day (default: 1)
    /// - `BLOCKCATS_DAILY_SPAWN_CAP` - Ambient spawn rolls per day (default: 10)
    /// - `BLOCKCATS_EVENT_BUFFER` - Event channel capacity (default: 100)
    /// - `BLOCKCATS_COMMAND_BUFFER` - Command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_file = env::var("BLOCKCATS_DATA_FILE").ok().map(PathBuf::from);

        if let Some(limit) = read_env::<u32>("BLOCKCATS_DAILY_CLAIM_LIMIT") {
            config.game_config.daily_claim_limit = limit;
        }
        if let Some(cap) = read_env::<u32>("BLOCKCATS_DAILY_SPAWN_CAP") {
            config.game_config.daily_spawn_cap = cap;
        }
        if let Some(capacity) = read_env::<usize>("BLOCKCATS_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("BLOCKCATS_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }
}

/// Main runtime that orchestrates the game backend.
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`GameHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: GameHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Start a runtime with the given configuration and default
    /// collaborators.
    pub async fn start(config: RuntimeConfig) -> Result<Runtime> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    /// Subscribe to game events
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.handle.subscribe_events()
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(GameError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    store: Option<Arc<dyn GameStore>>,
    minter: Option<Arc<dyn CatMinter>>,
    clock: Option<Arc<dyn Clock>>,
    seed_source: Option<Box<dyn FnMut() -> u64 + Send>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            store: None,
            minter: None,
            clock: None,
            seed_source: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific store instead of the one the config implies.
    pub fn store(mut self, store: Arc<dyn GameStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a specific minter. Defaults to a [`MockMinter`] whose token
    /// counter continues past everything the store already holds.
    pub fn minter(mut self, minter: Arc<dyn CatMinter>) -> Self {
        self.minter = Some(minter);
        self
    }

    /// Use a specific clock. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Pin the entropy source behind genesis rolls and breeding.
    pub fn seed_source(mut self, source: impl FnMut() -> u64 + Send + 'static) -> Self {
        self.seed_source = Some(Box::new(source));
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let store: Arc<dyn GameStore> = match self.store {
            Some(store) => store,
            None => match &self.config.data_file {
                Some(path) => Arc::new(FileStore::open(path)?),
                None => Arc::new(MemoryStore::new()),
            },
        };

        let minter: Arc<dyn CatMinter> = match self.minter {
            Some(minter) => minter,
            // Seed past persisted tokens so ids never repeat across
            // restarts.
            None => Arc::new(MockMinter::starting_at(store.next_token_id()?.0)),
        };

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) = broadcast::channel::<GameEvent>(self.config.event_buffer_size);

        let handle = GameHandle::new(command_tx, event_tx.clone());

        let mut service =
            GameService::new(self.config.game_config, store, minter, clock, event_tx);
        if let Some(source) = self.seed_source {
            service = service.with_seed_source(source);
        }

        let worker = GameWorker::new(service, command_rx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
