//! Battle operations: challenge, accept, resolve.

use chain_core::MintRequest;
use game_core::{
    Battle, BattleId, BattleReason, BattleState, Cat, Dna, GameConfig, Wallet, breed,
    child_generation, select_eviction,
};
use tracing::{debug, info};

use crate::api::{
    AcceptRequest, BattleView, CatView, ChallengeRequest, GameError, GameEvent, ResolutionReport,
    ResolveRequest, Result,
};
use crate::service::GameService;

impl GameService {
    /// Issue a challenge. Both cats must exist, belong to the named
    /// wallets and be off cooldown, and neither wallet may already be
    /// engaged (a live pending challenge against the challenged wallet,
    /// or an in-progress battle on either side).
    pub fn challenge(&self, request: ChallengeRequest) -> Result<BattleView> {
        if request.challenger == request.challenged {
            return Err(GameError::Validation(
                "a wallet cannot challenge itself".to_string(),
            ));
        }

        let now = self.now();
        let challenger_cat = self.require_owned_cat(request.challenger_cat, &request.challenger)?;
        let challenged_cat = self.require_owned_cat(request.challenged_cat, &request.challenged)?;

        if challenger_cat.on_cooldown(now) {
            return Err(GameError::OnCooldown {
                token: challenger_cat.token,
                until: challenger_cat.cooldown_until,
            });
        }
        if challenged_cat.on_cooldown(now) {
            return Err(GameError::OnCooldown {
                token: challenged_cat.token,
                until: challenged_cat.cooldown_until,
            });
        }

        self.expire_stale_challenge(&request.challenged)?;
        if self.store.pending_for(&request.challenged)?.is_some() {
            return Err(GameError::AlreadyBusy(request.challenged));
        }
        if self.store.in_progress_for(&request.challenger)?.is_some() {
            return Err(GameError::AlreadyBusy(request.challenger));
        }
        if self.store.in_progress_for(&request.challenged)?.is_some() {
            return Err(GameError::AlreadyBusy(request.challenged));
        }

        let id = self.store.reserve_battle_id()?;
        let battle = Battle::open(
            id,
            request.challenger.clone(),
            request.challenged.clone(),
            request.challenger_cat,
            request.challenged_cat,
            now,
        );
        self.store.put_battle(battle.clone())?;

        info!(
            target: "runtime::service",
            battle = %id,
            challenger = %battle.challenger,
            challenged = %battle.challenged,
            "challenge issued"
        );
        self.emit(GameEvent::ChallengeIssued {
            battle: id,
            challenger: battle.challenger.clone(),
            challenged: battle.challenged.clone(),
        });
        Ok(BattleView::project(&battle))
    }

    /// Accept a pending challenge. A challenge past its window is
    /// cancelled on the spot and the acceptance fails as expired.
    pub fn accept(&self, request: AcceptRequest) -> Result<BattleView> {
        let battle = self.require_battle(request.battle)?;
        let now = self.now();

        if let Some(expired) = battle.expire_if_overdue(now) {
            self.store.put_battle(expired)?;
            debug!(
                target: "runtime::service",
                battle = %request.battle,
                "challenge expired before acceptance"
            );
            self.emit(GameEvent::ChallengeExpired {
                battle: request.battle,
            });
            return Err(GameError::ChallengeExpired);
        }

        let accepted = battle.accept(&request.wallet, now)?;
        self.store.put_battle(accepted.clone())?;

        info!(
            target: "runtime::service",
            battle = %accepted.id,
            accepter = %request.wallet,
            "battle started"
        );
        self.emit(GameEvent::BattleStarted { battle: accepted.id });
        Ok(BattleView::project(&accepted))
    }

    /// Resolve an in-progress battle from the game client's report.
    ///
    /// A timeout report closes the battle as a draw with no other
    /// effects. A death or quit report breeds a child for the winner
    /// (minted through the collaborator, admitted under the eviction
    /// policy) and puts the loser's cat on cooldown. All writes happen
    /// after every fallible step has succeeded; a completed battle
    /// cannot be resolved again.
    pub async fn resolve(&mut self, request: ResolveRequest) -> Result<ResolutionReport> {
        let battle = self.inspect_battle(request.battle)?;
        if battle.state != BattleState::InProgress {
            return Err(GameError::InvalidState {
                expected: BattleState::InProgress,
                actual: battle.state,
            });
        }
        let now = self.now();

        match request.reason {
            BattleReason::Timeout => {
                if request.winner.is_some() || request.loser.is_some() {
                    return Err(GameError::Validation(
                        "a timeout resolution carries no winner or loser".to_string(),
                    ));
                }
                let drawn = battle.resolve_draw(now)?;
                self.store.put_battle(drawn.clone())?;

                info!(
                    target: "runtime::service",
                    battle = %drawn.id,
                    "battle drawn on timeout"
                );
                self.emit(GameEvent::BattleResolved {
                    battle: drawn.id,
                    reason: BattleReason::Timeout,
                    winner: None,
                    child: None,
                });
                Ok(ResolutionReport {
                    battle: BattleView::project(&drawn),
                    child: None,
                    evicted: None,
                    loser_cat: None,
                    cooldown_until: None,
                })
            }
            reason => {
                let (Some(winner), Some(loser)) = (request.winner.clone(), request.loser.clone())
                else {
                    return Err(GameError::Validation(
                        "a decisive resolution requires winner and loser".to_string(),
                    ));
                };
                let cast = battle.casting(&winner, &loser)?;

                // Parent order follows challenge roles, not the outcome.
                let parent1 = self.require_cat(battle.challenger_cat)?;
                let parent2 = self.require_cat(battle.challenged_cat)?;

                let seed = self.next_seed();
                let stats = breed(
                    &parent1.stats,
                    &parent2.stats,
                    parent1.generation,
                    parent2.generation,
                    &self.rng,
                    seed,
                );
                let generation = child_generation(parent1.generation, parent2.generation);
                let dna = Dna::inherit(parent1.dna, parent2.dna);

                let inventory = self.store.inventory(&winner)?;
                let scored = self.scored_roster(&inventory)?;
                let evicted = select_eviction(&scored, inventory.active())?;

                let receipt = self
                    .minter
                    .mint(MintRequest {
                        owner: winner.clone(),
                        stats,
                        dna: dna.encode(&stats),
                        seed,
                        metadata_uri: None,
                        parents: Some((parent1.token, parent2.token)),
                    })
                    .await?;

                let cooldown_until = now.plus_millis(GameConfig::COOLDOWN_MS);
                let completed =
                    battle.complete(winner.clone(), loser.clone(), reason, receipt.token, evicted, now)?;

                if let Some(token) = evicted {
                    self.store.remove_cat(token)?;
                    self.emit(GameEvent::CatEvicted {
                        token,
                        owner: winner.clone(),
                    });
                }
                let child = Cat::bred(
                    receipt.token,
                    winner.clone(),
                    dna,
                    stats,
                    generation,
                    (parent1.token, parent2.token),
                    now,
                );
                self.store.insert_cat(child.clone())?;
                self.store.set_cooldown(cast.loser_cat, cooldown_until)?;
                self.store.put_battle(completed.clone())?;

                info!(
                    target: "runtime::service",
                    battle = %completed.id,
                    winner = %winner,
                    child = %child.token,
                    evicted = ?evicted,
                    "battle resolved"
                );
                self.emit(GameEvent::CatMinted {
                    token: child.token,
                    owner: winner.clone(),
                    tx: receipt.tx,
                });
                self.emit(GameEvent::BattleResolved {
                    battle: completed.id,
                    reason,
                    winner: Some(winner.clone()),
                    child: Some(child.token),
                });

                let active = self.store.inventory(&winner)?.active();
                Ok(ResolutionReport {
                    battle: BattleView::project(&completed),
                    child: Some(CatView::project(&child, now, active)),
                    evicted,
                    loser_cat: Some(cast.loser_cat),
                    cooldown_until: Some(cooldown_until),
                })
            }
        }
    }

    /// Look up a battle, cancelling it first if it is a lapsed pending
    /// challenge.
    pub fn battle(&self, id: BattleId) -> Result<BattleView> {
        Ok(BattleView::project(&self.inspect_battle(id)?))
    }

    /// The live pending challenge directed at a wallet. A lapsed one is
    /// cancelled on inspection and not returned.
    pub fn pending_challenge(&self, wallet: &Wallet) -> Result<Option<BattleView>> {
        self.expire_stale_challenge(wallet)?;
        Ok(self
            .store
            .pending_for(wallet)?
            .as_ref()
            .map(BattleView::project))
    }

    /// The battle a wallet is currently fighting, if any.
    pub fn current_battle(&self, wallet: &Wallet) -> Result<Option<BattleView>> {
        Ok(self
            .store
            .in_progress_for(wallet)?
            .as_ref()
            .map(BattleView::project))
    }

    fn inspect_battle(&self, id: BattleId) -> Result<Battle> {
        let battle = self.require_battle(id)?;
        if let Some(expired) = battle.expire_if_overdue(self.now()) {
            self.store.put_battle(expired.clone())?;
            debug!(
                target: "runtime::service",
                battle = %id,
                "pending challenge expired on inspection"
            );
            self.emit(GameEvent::ChallengeExpired { battle: id });
            return Ok(expired);
        }
        Ok(battle)
    }

    fn expire_stale_challenge(&self, wallet: &Wallet) -> Result<()> {
        if let Some(battle) = self.store.pending_for(wallet)?
            && let Some(expired) = battle.expire_if_overdue(self.now())
        {
            self.store.put_battle(expired)?;
            debug!(
                target: "runtime::service",
                battle = %battle.id,
                "stale challenge expired"
            );
            self.emit(GameEvent::ChallengeExpired { battle: battle.id });
        }
        Ok(())
    }
}
