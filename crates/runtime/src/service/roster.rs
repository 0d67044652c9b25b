//! Collection operations: claiming, spawning, activation, release.

use chain_core::MintRequest;
use game_core::{Cat, Dna, TokenId, Wallet, genesis_stats, select_eviction};
use tracing::{debug, info};

use crate::api::{
    CatView, ClaimReceipt, ClaimRequest, GameError, GameEvent, InventoryView, ReleaseRequest,
    Result, SetActiveRequest, SpawnGrant,
};
use crate::repository::RepositoryError;
use crate::service::GameService;

impl GameService {
    /// Claim a genesis cat: roll stats and cosmetics, mint through the
    /// collaborator, and admit the new cat to the wallet's inventory,
    /// evicting the weakest non-active cat if it is full.
    ///
    /// The admission decision is made before minting, so a roster that
    /// cannot make room rejects the claim without burning a mint.
    pub async fn claim_genesis(&mut self, request: ClaimRequest) -> Result<ClaimReceipt> {
        let now = self.now();
        let used = self
            .claim_quotas
            .get(&request.wallet)
            .map_or(0, |quota| quota.used(now));
        if used >= self.config.daily_claim_limit {
            return Err(GameError::DailyClaimLimit);
        }

        let seed = self.next_seed();
        let stats = genesis_stats(&self.rng, seed);
        let dna = Dna::roll(&self.rng, seed);

        let inventory = self.store.inventory(&request.wallet)?;
        let scored = self.scored_roster(&inventory)?;
        let evicted = select_eviction(&scored, inventory.active())?;

        let receipt = self
            .minter
            .mint(MintRequest {
                owner: request.wallet.clone(),
                stats,
                dna: dna.encode(&stats),
                seed,
                metadata_uri: request.metadata_uri.clone(),
                parents: None,
            })
            .await?;

        if let Some(token) = evicted {
            self.store.remove_cat(token)?;
            self.emit(GameEvent::CatEvicted {
                token,
                owner: request.wallet.clone(),
            });
        }

        let cat = Cat::genesis(receipt.token, request.wallet.clone(), dna, stats, now);
        self.store.insert_cat(cat.clone())?;
        self.claim_quotas
            .entry(request.wallet.clone())
            .or_default()
            .record(now);

        info!(
            target: "runtime::service",
            wallet = %request.wallet,
            token = %cat.token,
            tx = %receipt.tx,
            "genesis cat claimed"
        );
        self.emit(GameEvent::CatMinted {
            token: cat.token,
            owner: cat.owner.clone(),
            tx: receipt.tx,
        });

        let active = self.store.inventory(&request.wallet)?.active();
        Ok(ClaimReceipt {
            cat: CatView::project(&cat, now, active),
            tx: receipt.tx.to_string(),
            evicted,
        })
    }

    /// Roll cosmetics for an ambient spawn, bounded by the global daily
    /// cap. No token is minted; the game client renders the result.
    pub fn spawn_dna(&mut self) -> Result<SpawnGrant> {
        let now = self.now();
        if self.spawn_quota.used(now) >= self.config.daily_spawn_cap {
            return Err(GameError::SpawnCapReached);
        }

        let seed = self.next_seed();
        let dna = Dna::roll(&self.rng, seed);
        self.spawn_quota.record(now);

        debug!(
            target: "runtime::service",
            variant = dna.variant,
            collar = dna.collar,
            spawned_today = self.spawn_quota.used(now),
            "ambient spawn rolled"
        );
        Ok(SpawnGrant {
            dna,
            spawned_today: self.spawn_quota.used(now),
        })
    }

    /// Mark one of the wallet's cats active. Returns the previously
    /// active token, if any.
    pub fn set_active(&self, request: SetActiveRequest) -> Result<Option<TokenId>> {
        self.require_owned_cat(request.token, &request.wallet)?;
        let previous = self.store.inventory(&request.wallet)?.active();
        if !self.store.set_active(&request.wallet, request.token)? {
            return Err(GameError::Repository(RepositoryError::CorruptedData(
                format!(
                    "cat {} owned by {} but missing from its inventory",
                    request.token, request.wallet
                ),
            )));
        }
        Ok(previous)
    }

    /// Manually delete one of the wallet's cats. The active cat is
    /// refused; deactivate first.
    pub fn release_cat(&self, request: ReleaseRequest) -> Result<CatView> {
        let cat = self.require_owned_cat(request.token, &request.wallet)?;
        let inventory = self.store.inventory(&request.wallet)?;
        if inventory.active() == Some(request.token) {
            return Err(GameError::Validation(
                "the active cat cannot be released".to_string(),
            ));
        }

        self.store.remove_cat(request.token)?;
        info!(
            target: "runtime::service",
            wallet = %request.wallet,
            token = %request.token,
            "cat released"
        );
        Ok(CatView::project(&cat, self.now(), None))
    }

    /// A wallet's full roster with derived, client-facing fields.
    pub fn inventory(&self, wallet: &Wallet) -> Result<InventoryView> {
        let now = self.now();
        let inventory = self.store.inventory(wallet)?;
        let mut cats = Vec::with_capacity(inventory.len());
        for &token in inventory.tokens() {
            let cat = self.store.cat(token)?.ok_or_else(|| {
                GameError::Repository(RepositoryError::CorruptedData(format!(
                    "inventory references missing token {token}"
                )))
            })?;
            cats.push(CatView::project(&cat, now, inventory.active()));
        }
        Ok(InventoryView::new(wallet.clone(), cats, inventory.active()))
    }

    /// One cat with derived fields.
    pub fn cat(&self, token: TokenId) -> Result<CatView> {
        let cat = self.require_cat(token)?;
        let active = self.store.inventory(&cat.owner)?.active();
        Ok(CatView::project(&cat, self.now(), active))
    }
}
