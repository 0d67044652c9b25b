//! The cat record: the minted unit every other module operates on.

use crate::dna::Dna;
use crate::naming::give_name;
use crate::rarity::RarityTier;
use crate::stats::StatBlock;
use crate::types::{Timestamp, TokenId, Wallet};

/// Avatar service the texture URL points at.
pub const TEXTURE_BASE_URL: &str = "https://api.dicebear.com/7.x/lorelei/png";

/// Deterministic portrait URL for a token.
pub fn texture_url(token: TokenId) -> String {
    format!("{TEXTURE_BASE_URL}?seed={}", token.0)
}

/// A minted cat.
///
/// Name, rarity score and texture are derived from the stats and token at
/// mint time and then frozen; they never change even if derivation rules
/// do. `cooldown_until` is the only mutable field after mint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cat {
    pub token: TokenId,
    pub owner: Wallet,
    pub name: String,
    pub dna: Dna,
    pub stats: StatBlock,
    pub generation: u32,
    pub is_genesis: bool,
    pub parent1: Option<TokenId>,
    pub parent2: Option<TokenId>,
    pub rarity_score: u32,
    pub cooldown_until: Timestamp,
    pub minted_at: Timestamp,
    pub texture: String,
}

impl Cat {
    /// Mint a generation-zero cat with no lineage.
    pub fn genesis(
        token: TokenId,
        owner: Wallet,
        dna: Dna,
        stats: StatBlock,
        minted_at: Timestamp,
    ) -> Self {
        let score = stats.rarity_score();
        Self {
            token,
            owner,
            name: give_name(score, token),
            dna,
            stats,
            generation: 0,
            is_genesis: true,
            parent1: None,
            parent2: None,
            rarity_score: score,
            cooldown_until: Timestamp::ZERO,
            minted_at,
            texture: texture_url(token),
        }
    }

    /// Mint a bred cat with its lineage recorded.
    pub fn bred(
        token: TokenId,
        owner: Wallet,
        dna: Dna,
        stats: StatBlock,
        generation: u32,
        parents: (TokenId, TokenId),
        minted_at: Timestamp,
    ) -> Self {
        let score = stats.rarity_score();
        Self {
            token,
            owner,
            name: give_name(score, token),
            dna,
            stats,
            generation,
            is_genesis: false,
            parent1: Some(parents.0),
            parent2: Some(parents.1),
            rarity_score: score,
            cooldown_until: Timestamp::ZERO,
            minted_at,
            texture: texture_url(token),
        }
    }

    /// Flat DNA string carrying cosmetics and stats together.
    pub fn dna_string(&self) -> String {
        self.dna.encode(&self.stats)
    }

    pub fn tier(&self) -> RarityTier {
        RarityTier::from_score(self.rarity_score)
    }

    /// A cat whose cooldown has elapsed (or was never set) may fight.
    pub fn can_battle(&self, now: Timestamp) -> bool {
        self.cooldown_until <= now
    }

    pub fn on_cooldown(&self, now: Timestamp) -> bool {
        !self.can_battle(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> Wallet {
        Wallet::new("0xAbCd")
    }

    #[test]
    fn genesis_mint_derives_every_frozen_field() {
        let stats = StatBlock::new(3, 4, 5, 4, 3);
        let cat = Cat::genesis(TokenId(7), wallet(), Dna::new(2, 9), stats, Timestamp(1_000));

        assert_eq!(cat.rarity_score, 19);
        assert_eq!(cat.tier(), RarityTier::Common);
        assert_eq!(cat.name, give_name(19, TokenId(7)));
        assert_eq!(cat.texture, "https://api.dicebear.com/7.x/lorelei/png?seed=7");
        assert_eq!(cat.generation, 0);
        assert!(cat.is_genesis);
        assert_eq!(cat.parent1, None);
        assert_eq!(cat.parent2, None);
        assert_eq!(cat.cooldown_until, Timestamp::ZERO);
        assert_eq!(cat.owner.as_str(), "0xabcd");
    }

    #[test]
    fn bred_mint_records_lineage() {
        let stats = StatBlock::new(8, 8, 8, 8, 8);
        let cat = Cat::bred(
            TokenId(42),
            wallet(),
            Dna::new(1, 3),
            stats,
            3,
            (TokenId(5), TokenId(9)),
            Timestamp(2_000),
        );

        assert!(!cat.is_genesis);
        assert_eq!(cat.generation, 3);
        assert_eq!(cat.parent1, Some(TokenId(5)));
        assert_eq!(cat.parent2, Some(TokenId(9)));
        assert_eq!(cat.tier(), RarityTier::Legendary);
    }

    #[test]
    fn dna_string_interleaves_cosmetics_and_stats() {
        let cat = Cat::genesis(
            TokenId(1),
            wallet(),
            Dna::new(4, 15),
            StatBlock::new(6, 7, 8, 9, 10),
            Timestamp::ZERO,
        );
        assert_eq!(cat.dna_string(), "4,15,6,10,7,9,8");
    }

    #[test]
    fn cooldown_gates_battles_until_it_elapses() {
        let mut cat = Cat::genesis(
            TokenId(2),
            wallet(),
            Dna::new(0, 0),
            StatBlock::uniform(3),
            Timestamp::ZERO,
        );
        assert!(cat.can_battle(Timestamp::ZERO));

        cat.cooldown_until = Timestamp(500);
        assert!(cat.on_cooldown(Timestamp(499)));
        assert!(cat.can_battle(Timestamp(500)));
        assert!(cat.can_battle(Timestamp(501)));
    }
}
