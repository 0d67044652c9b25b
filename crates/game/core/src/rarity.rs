//! Rarity tiers and stat-derived perks.

use strum::{AsRefStr, Display, EnumString};

use crate::stats::StatBlock;

/// Rarity tier derived from a cat's score.
///
/// Thresholds partition the [5,50] score range exactly at 20/30/40.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl RarityTier {
    pub const UNCOMMON_MIN: u32 = 20;
    pub const RARE_MIN: u32 = 30;
    pub const LEGENDARY_MIN: u32 = 40;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::LEGENDARY_MIN {
            Self::Legendary
        } else if score >= Self::RARE_MIN {
            Self::Rare
        } else if score >= Self::UNCOMMON_MIN {
            Self::Uncommon
        } else {
            Self::Common
        }
    }
}

/// Gameplay bonus unlocked when a single attribute reaches
/// [`Perk::THRESHOLD`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Perk {
    SwiftCompanion,
    FortuneAura,
    BattleCat,
    HealingPresence,
    Guardian,
}

impl Perk {
    /// Minimum attribute value that unlocks its perk.
    pub const THRESHOLD: u8 = 8;

    /// In-game label shown to players.
    pub fn label(self) -> &'static str {
        match self {
            Perk::SwiftCompanion => "Swift Companion",
            Perk::FortuneAura => "Fortune Aura",
            Perk::BattleCat => "Battle Cat",
            Perk::HealingPresence => "Healing Presence",
            Perk::Guardian => "Guardian",
        }
    }
}

/// Perks granted by a stat block.
pub fn perks(stats: &StatBlock) -> Vec<Perk> {
    let grants = [
        (stats.speed, Perk::SwiftCompanion),
        (stats.luck, Perk::FortuneAura),
        (stats.strength, Perk::BattleCat),
        (stats.regen, Perk::HealingPresence),
        (stats.defense, Perk::Guardian),
    ];
    grants
        .into_iter()
        .filter(|(value, _)| *value >= Perk::THRESHOLD)
        .map(|(_, perk)| perk)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds_partition_at_boundaries() {
        assert_eq!(RarityTier::from_score(5), RarityTier::Common);
        assert_eq!(RarityTier::from_score(19), RarityTier::Common);
        assert_eq!(RarityTier::from_score(20), RarityTier::Uncommon);
        assert_eq!(RarityTier::from_score(29), RarityTier::Uncommon);
        assert_eq!(RarityTier::from_score(30), RarityTier::Rare);
        assert_eq!(RarityTier::from_score(39), RarityTier::Rare);
        assert_eq!(RarityTier::from_score(40), RarityTier::Legendary);
        assert_eq!(RarityTier::from_score(50), RarityTier::Legendary);
    }

    #[test]
    fn tier_renders_snake_case() {
        assert_eq!(RarityTier::Legendary.to_string(), "legendary");
        assert_eq!(RarityTier::Uncommon.as_ref(), "uncommon");
    }

    #[test]
    fn perks_require_the_threshold() {
        assert!(perks(&StatBlock::uniform(7)).is_empty());

        let swift = StatBlock::new(8, 1, 1, 1, 1);
        assert_eq!(perks(&swift), vec![Perk::SwiftCompanion]);

        let bulky = StatBlock::new(1, 9, 10, 1, 1);
        assert_eq!(perks(&bulky), vec![Perk::BattleCat, Perk::Guardian]);

        let all = perks(&StatBlock::uniform(10));
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn perk_labels_match_attributes() {
        assert_eq!(Perk::FortuneAura.label(), "Fortune Aura");
        assert_eq!(Perk::HealingPresence.label(), "Healing Presence");
    }
}
