//! Cloneable façade for issuing commands to the runtime.
//!
//! [`GameHandle`] hides the channel plumbing: each method packages a
//! command, sends it to the worker and waits for the reply. Handles are
//! cheap to clone and safe to share across tasks; the worker serializes
//! everything behind them.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{BattleId, TokenId, Wallet};

use super::errors::{GameError, Result};
use super::events::GameEvent;
use super::requests::{
    AcceptRequest, ChallengeRequest, ClaimRequest, ReleaseRequest, ResolveRequest,
    SetActiveRequest,
};
use super::views::{
    BattleView, CatView, ClaimReceipt, InventoryView, ResolutionReport, SpawnGrant,
};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct GameHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl GameHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Claim a genesis cat for a wallet.
    pub async fn claim_genesis(&self, request: ClaimRequest) -> Result<ClaimReceipt> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::ClaimGenesis {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Roll cosmetics for an ambient spawn under the global daily cap.
    pub async fn spawn_dna(&self) -> Result<SpawnGrant> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SpawnDna { reply: reply_tx })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Mark one of the wallet's cats active. Returns the previously
    /// active token, if any.
    pub async fn set_active(&self, request: SetActiveRequest) -> Result<Option<TokenId>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SetActive {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Delete a non-active cat from its owner's roster.
    pub async fn release_cat(&self, request: ReleaseRequest) -> Result<CatView> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::ReleaseCat {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Query a wallet's roster.
    pub async fn inventory(&self, wallet: Wallet) -> Result<InventoryView> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Inventory {
                wallet,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Query one cat.
    pub async fn cat(&self, token: TokenId) -> Result<CatView> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Cat {
                token,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Issue a challenge.
    pub async fn challenge(&self, request: ChallengeRequest) -> Result<BattleView> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Challenge {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Accept a pending challenge as the challenged wallet.
    pub async fn accept(&self, request: AcceptRequest) -> Result<BattleView> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Accept {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Resolve an in-progress battle from the game client's report.
    pub async fn resolve(&self, request: ResolveRequest) -> Result<ResolutionReport> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Resolve {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Query one battle.
    pub async fn battle(&self, id: BattleId) -> Result<BattleView> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Battle {
                id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Query the live pending challenge directed at a wallet.
    pub async fn pending_challenge(&self, wallet: Wallet) -> Result<Option<BattleView>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::PendingChallenge {
                wallet,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Query the battle a wallet is currently fighting, if any.
    pub async fn current_battle(&self, wallet: Wallet) -> Result<Option<BattleView>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::CurrentBattle {
                wallet,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::CommandChannelClosed)?;

        reply_rx.await.map_err(GameError::ReplyChannelClosed)?
    }

    /// Subscribe to game events.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut events = handle.subscribe_events();
    /// while let Ok(event) = events.recv().await {
    ///     // React to mints, evictions and battle outcomes.
    /// }
    /// ```
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.event_tx.subscribe()
    }
}
