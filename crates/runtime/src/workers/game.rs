//! Worker task that owns the [`GameService`] and executes commands.
//!
//! Receives commands from [`crate::api::GameHandle`], runs them against
//! the single service instance, and replies over oneshot channels. One
//! worker per runtime; sequential execution is what makes game
//! operations atomic without locks around the store.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use game_core::{BattleId, TokenId, Wallet};

use crate::api::{
    AcceptRequest, BattleView, CatView, ChallengeRequest, ClaimReceipt, ClaimRequest, ErrorKind,
    InventoryView, ReleaseRequest, ResolutionReport, ResolveRequest, Result, SetActiveRequest,
    SpawnGrant,
};
use crate::service::GameService;

/// Commands that can be sent to the game worker.
pub enum Command {
    /// Claim a genesis cat for a wallet.
    ClaimGenesis {
        request: ClaimRequest,
        reply: oneshot::Sender<Result<ClaimReceipt>>,
    },
    /// Roll cosmetics for an ambient spawn.
    SpawnDna {
        reply: oneshot::Sender<Result<SpawnGrant>>,
    },
    /// Mark a cat active; replies with the previously active token.
    SetActive {
        request: SetActiveRequest,
        reply: oneshot::Sender<Result<Option<TokenId>>>,
    },
    /// Delete a non-active cat from its owner's roster.
    ReleaseCat {
        request: ReleaseRequest,
        reply: oneshot::Sender<Result<CatView>>,
    },
    /// Query a wallet's roster (read-only).
    Inventory {
        wallet: Wallet,
        reply: oneshot::Sender<Result<InventoryView>>,
    },
    /// Query one cat (read-only).
    Cat {
        token: TokenId,
        reply: oneshot::Sender<Result<CatView>>,
    },
    /// Issue a challenge.
    Challenge {
        request: ChallengeRequest,
        reply: oneshot::Sender<Result<BattleView>>,
    },
    /// Accept a pending challenge.
    Accept {
        request: AcceptRequest,
        reply: oneshot::Sender<Result<BattleView>>,
    },
    /// Resolve an in-progress battle from the game client's report.
    Resolve {
        request: ResolveRequest,
        reply: oneshot::Sender<Result<ResolutionReport>>,
    },
    /// Query one battle; lapsed pending challenges cancel on inspection.
    Battle {
        id: BattleId,
        reply: oneshot::Sender<Result<BattleView>>,
    },
    /// Query the live challenge directed at a wallet.
    PendingChallenge {
        wallet: Wallet,
        reply: oneshot::Sender<Result<Option<BattleView>>>,
    },
    /// Query the battle a wallet is currently fighting.
    CurrentBattle {
        wallet: Wallet,
        reply: oneshot::Sender<Result<Option<BattleView>>>,
    },
}

/// Background task that processes game commands sequentially.
pub struct GameWorker {
    service: GameService,
    command_rx: mpsc::Receiver<Command>,
}

impl GameWorker {
    pub fn new(service: GameService, command_rx: mpsc::Receiver<Command>) -> Self {
        Self {
            service,
            command_rx,
        }
    }

    /// Main worker loop. Exits when every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                else => break,
            }
        }
        debug!(target: "runtime::worker", "command channel closed, worker exiting");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::ClaimGenesis { request, reply } => {
                Self::respond(
                    "claim_genesis",
                    self.service.claim_genesis(request).await,
                    reply,
                );
            }
            Command::SpawnDna { reply } => {
                Self::respond("spawn_dna", self.service.spawn_dna(), reply);
            }
            Command::SetActive { request, reply } => {
                Self::respond("set_active", self.service.set_active(request), reply);
            }
            Command::ReleaseCat { request, reply } => {
                Self::respond("release_cat", self.service.release_cat(request), reply);
            }
            Command::Inventory { wallet, reply } => {
                Self::respond("inventory", self.service.inventory(&wallet), reply);
            }
            Command::Cat { token, reply } => {
                Self::respond("cat", self.service.cat(token), reply);
            }
            Command::Challenge { request, reply } => {
                Self::respond("challenge", self.service.challenge(request), reply);
            }
            Command::Accept { request, reply } => {
                Self::respond("accept", self.service.accept(request), reply);
            }
            Command::Resolve { request, reply } => {
                Self::respond("resolve", self.service.resolve(request).await, reply);
            }
            Command::Battle { id, reply } => {
                Self::respond("battle", self.service.battle(id), reply);
            }
            Command::PendingChallenge { wallet, reply } => {
                Self::respond(
                    "pending_challenge",
                    self.service.pending_challenge(&wallet),
                    reply,
                );
            }
            Command::CurrentBattle { wallet, reply } => {
                Self::respond(
                    "current_battle",
                    self.service.current_battle(&wallet),
                    reply,
                );
            }
        }
    }

    /// Log the outcome and reply. Rule rejections are expected traffic
    /// and stay at debug; only internal faults log as errors.
    fn respond<T>(op: &str, result: Result<T>, reply: oneshot::Sender<Result<T>>) {
        if let Err(err) = &result {
            match err.kind() {
                ErrorKind::Internal => {
                    error!(target: "runtime::worker", op, error = %err, "command failed");
                }
                kind => {
                    debug!(target: "runtime::worker", op, kind = %kind, error = %err, "command rejected");
                }
            }
        }
        if reply.send(result).is_err() {
            debug!(target: "runtime::worker", op, "reply channel closed (caller dropped)");
        }
    }
}
