//! Cosmetic genome carried by every cat.

use crate::config::GameConfig;
use crate::rng::{RngOracle, mix_seed};
use crate::stats::StatBlock;

/// Cosmetic fields rendered by the game client.
///
/// Not part of the numeric breeding algorithm: children inherit these
/// positionally instead of rolling them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dna {
    /// Coat variant, `0..=GameConfig::VARIANT_MAX`.
    pub variant: u8,
    /// Collar color, `0..=GameConfig::COLLAR_MAX`.
    pub collar: u8,
}

impl Dna {
    // Streams 0-4 of a shared seed are the stat rolls; cosmetics draw above
    // them so one seed covers a whole genesis cat.
    const VARIANT_STREAM: u32 = 5;
    const COLLAR_STREAM: u32 = 6;

    pub fn new(variant: u8, collar: u8) -> Self {
        Self { variant, collar }
    }

    /// Roll a fresh cosmetic genome for a genesis or ambient-spawn cat.
    pub fn roll(rng: &impl RngOracle, seed: u64) -> Self {
        Self {
            variant: rng.range(
                mix_seed(seed, Self::VARIANT_STREAM),
                0,
                GameConfig::VARIANT_MAX as u32,
            ) as u8,
            collar: rng.range(
                mix_seed(seed, Self::COLLAR_STREAM),
                0,
                GameConfig::COLLAR_MAX as u32,
            ) as u8,
        }
    }

    /// Positional inheritance: coat from the first parent, collar from the
    /// second.
    pub fn inherit(parent1: Dna, parent2: Dna) -> Self {
        Self {
            variant: parent1.variant,
            collar: parent2.collar,
        }
    }

    /// Render the genome alongside stats as the on-chain metadata string:
    /// `"{variant},{collar},{speed},{luck},{strength},{regen},{defense}"`.
    pub fn encode(&self, stats: &StatBlock) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.variant,
            self.collar,
            stats.speed,
            stats.luck,
            stats.strength,
            stats.regen,
            stats.defense
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    #[test]
    fn roll_stays_in_cosmetic_ranges() {
        let rng = PcgRng;
        for seed in 0..500 {
            let dna = Dna::roll(&rng, seed);
            assert!(dna.variant <= GameConfig::VARIANT_MAX);
            assert!(dna.collar <= GameConfig::COLLAR_MAX);
        }
    }

    #[test]
    fn roll_is_reproducible_per_seed() {
        let rng = PcgRng;
        assert_eq!(Dna::roll(&rng, 77), Dna::roll(&rng, 77));
    }

    #[test]
    fn inherit_is_positional() {
        let sire = Dna::new(3, 12);
        let dam = Dna::new(9, 1);
        assert_eq!(Dna::inherit(sire, dam), Dna::new(3, 1));
        assert_eq!(Dna::inherit(dam, sire), Dna::new(9, 12));
    }

    #[test]
    fn encode_orders_fields_for_the_chain() {
        let dna = Dna::new(4, 15);
        let stats = StatBlock::new(6, 7, 8, 9, 10);
        // Order is variant, collar, speed, luck, strength, regen, defense.
        assert_eq!(dna.encode(&stats), "4,15,6,10,7,9,8");
    }
}
