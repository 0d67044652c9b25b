//! Read models returned by the game operations.
//!
//! Views are projections of store records with the derived, caller-facing
//! fields (tier, perks, deadlines, eligibility flags) computed at read
//! time against the injected clock.
use game_core::{
    Battle, BattleId, BattleReason, BattleState, Cat, Dna, GameConfig, Perk, RarityTier, StatBlock,
    Timestamp, TokenId, Wallet, perks,
};
use serde::{Deserialize, Serialize};

/// One cat as the game client sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatView {
    pub token: TokenId,
    pub owner: Wallet,
    pub name: String,
    pub dna: String,
    pub stats: StatBlock,
    pub generation: u32,
    pub is_genesis: bool,
    pub parent1: Option<TokenId>,
    pub parent2: Option<TokenId>,
    pub rarity_score: u32,
    pub tier: RarityTier,
    pub perks: Vec<Perk>,
    pub cooldown_until: Timestamp,
    pub can_battle: bool,
    pub is_active: bool,
    pub minted_at: Timestamp,
    pub texture: String,
}

impl CatView {
    /// Project a cat record at a moment in time, flagged against the
    /// owner's active selection.
    pub fn project(cat: &Cat, now: Timestamp, active: Option<TokenId>) -> Self {
        Self {
            token: cat.token,
            owner: cat.owner.clone(),
            name: cat.name.clone(),
            dna: cat.dna_string(),
            stats: cat.stats,
            generation: cat.generation,
            is_genesis: cat.is_genesis,
            parent1: cat.parent1,
            parent2: cat.parent2,
            rarity_score: cat.rarity_score,
            tier: cat.tier(),
            perks: perks(&cat.stats),
            cooldown_until: cat.cooldown_until,
            can_battle: cat.can_battle(now),
            is_active: active == Some(cat.token),
            minted_at: cat.minted_at,
            texture: cat.texture.clone(),
        }
    }
}

/// A wallet's roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryView {
    pub wallet: Wallet,
    pub cats: Vec<CatView>,
    pub active: Option<TokenId>,
    pub count: usize,
    pub max_count: usize,
}

impl InventoryView {
    pub fn new(wallet: Wallet, cats: Vec<CatView>, active: Option<TokenId>) -> Self {
        let count = cats.len();
        Self {
            wallet,
            cats,
            active,
            count,
            max_count: GameConfig::MAX_CATS,
        }
    }
}

/// One battle as the game client sees it.
///
/// `accept_deadline` is present only while pending and `battle_deadline`
/// only while in progress; the game client enforces the play window
/// against the latter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleView {
    pub id: BattleId,
    pub challenger: Wallet,
    pub challenged: Wallet,
    pub challenger_cat: TokenId,
    pub challenged_cat: TokenId,
    pub state: BattleState,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub accept_deadline: Option<Timestamp>,
    pub battle_deadline: Option<Timestamp>,
    pub winner: Option<Wallet>,
    pub loser: Option<Wallet>,
    pub reason: Option<BattleReason>,
    pub child: Option<TokenId>,
    pub evicted: Option<TokenId>,
}

impl BattleView {
    pub fn project(battle: &Battle) -> Self {
        let accept_deadline =
            (battle.state == BattleState::Pending).then(|| battle.accept_deadline());
        let battle_deadline =
            (battle.state == BattleState::InProgress).then(|| battle.battle_deadline());
        Self {
            id: battle.id,
            challenger: battle.challenger.clone(),
            challenged: battle.challenged.clone(),
            challenger_cat: battle.challenger_cat,
            challenged_cat: battle.challenged_cat,
            state: battle.state,
            started_at: battle.started_at,
            ended_at: battle.ended_at,
            accept_deadline,
            battle_deadline,
            winner: battle.winner.clone(),
            loser: battle.loser.clone(),
            reason: battle.reason,
            child: battle.child,
            evicted: battle.evicted,
        }
    }
}

/// Outcome of a genesis claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimReceipt {
    pub cat: CatView,
    /// Mint transaction hash, prefixed hex.
    pub tx: String,
    pub evicted: Option<TokenId>,
}

/// Outcome of an ambient spawn roll: cosmetics for the game client to
/// render, no token minted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnGrant {
    pub dna: Dna,
    pub spawned_today: u32,
}

/// Outcome of a battle resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub battle: BattleView,
    /// Bred for the winner on a decisive outcome.
    pub child: Option<CatView>,
    pub evicted: Option<TokenId>,
    pub loser_cat: Option<TokenId>,
    pub cooldown_until: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cat_view_derives_flags_at_read_time() {
        let mut cat = Cat::genesis(
            TokenId(4),
            Wallet::new("0xA"),
            Dna::new(1, 2),
            StatBlock::new(8, 3, 3, 3, 9),
            Timestamp(100),
        );
        cat.cooldown_until = Timestamp(5_000);

        let view = CatView::project(&cat, Timestamp(1_000), Some(TokenId(4)));
        assert!(view.is_active);
        assert!(!view.can_battle);
        assert_eq!(view.tier, RarityTier::Uncommon);
        assert_eq!(view.perks, vec![Perk::SwiftCompanion, Perk::FortuneAura]);
        assert_eq!(view.dna, cat.dna_string());

        let later = CatView::project(&cat, Timestamp(6_000), None);
        assert!(later.can_battle);
        assert!(!later.is_active);
    }

    #[test]
    fn battle_view_surfaces_one_deadline_per_phase() {
        let battle = Battle::open(
            BattleId(1),
            Wallet::new("0xA"),
            Wallet::new("0xB"),
            TokenId(1),
            TokenId(2),
            Timestamp(0),
        );
        let view = BattleView::project(&battle);
        assert_eq!(view.accept_deadline, Some(Timestamp(30_000)));
        assert_eq!(view.battle_deadline, None);

        let accepted = battle.accept(&Wallet::new("0xB"), Timestamp(10_000)).unwrap();
        let view = BattleView::project(&accepted);
        assert_eq!(view.accept_deadline, None);
        assert_eq!(view.battle_deadline, Some(Timestamp(310_000)));

        let drawn = accepted.resolve_draw(Timestamp(20_000)).unwrap();
        let view = BattleView::project(&drawn);
        assert_eq!(view.accept_deadline, None);
        assert_eq!(view.battle_deadline, None);
    }
}
