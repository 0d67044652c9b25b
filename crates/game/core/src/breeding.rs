//! Stat inheritance for bred offspring and genesis rolls.

use crate::config::GameConfig;
use crate::rng::{RngOracle, mix_seed};
use crate::stats::StatBlock;

/// Mutation step for one attribute, from a uniform roll in `[0,100)`.
///
/// The table is deliberately biased upward: 75% of rolls land on +1 or +2
/// and only the bottom 5% penalize, so lineages trend stronger over
/// generations.
fn mutation(roll: u32) -> i32 {
    if roll < 5 {
        -1
    } else if roll < 25 {
        0
    } else if roll < 65 {
        1
    } else {
        2
    }
}

/// Flat bonus added to every attribute of one litter, derived from the
/// higher-generation parent.
pub fn generation_bonus(gen1: u32, gen2: u32) -> i32 {
    (gen1.max(gen2) / 2) as i32
}

/// Child lineage depth: one past the deeper parent.
pub fn child_generation(gen1: u32, gen2: u32) -> u32 {
    gen1.max(gen2) + 1
}

/// Breed child stats from two parents.
///
/// Per attribute, independently: average the parents (floor), add a
/// mutation from the biased table, add the generation bonus, then clamp as
/// the final step. The five rolls come from distinct streams of `seed`, so
/// one seed decides the whole litter and a pinned seed reproduces it
/// exactly.
///
/// Generation and genesis flags are the caller's to assign (see
/// [`child_generation`]); cosmetics inherit separately.
pub fn breed(
    parent1: &StatBlock,
    parent2: &StatBlock,
    gen1: u32,
    gen2: u32,
    rng: &impl RngOracle,
    seed: u64,
) -> StatBlock {
    let bonus = generation_bonus(gen1, gen2);
    let pairs = [
        (parent1.speed, parent2.speed),
        (parent1.strength, parent2.strength),
        (parent1.defense, parent2.defense),
        (parent1.regen, parent2.regen),
        (parent1.luck, parent2.luck),
    ];

    let mut values = [0u8; 5];
    for (stream, (a, b)) in pairs.into_iter().enumerate() {
        let base = (a as i32 + b as i32) / 2;
        let roll = rng.percent(mix_seed(seed, stream as u32));
        values[stream] = StatBlock::clamp(base + mutation(roll) + bonus);
    }

    StatBlock {
        speed: values[0],
        strength: values[1],
        defense: values[2],
        regen: values[3],
        luck: values[4],
    }
}

/// Roll genesis stats, each attribute uniform in the genesis band.
pub fn genesis_stats(rng: &impl RngOracle, seed: u64) -> StatBlock {
    let mut values = [0u8; 5];
    for (stream, slot) in values.iter_mut().enumerate() {
        *slot = rng.range(
            mix_seed(seed, stream as u32),
            GameConfig::GENESIS_STAT_MIN as u32,
            GameConfig::GENESIS_STAT_MAX as u32,
        ) as u8;
    }

    StatBlock {
        speed: values[0],
        strength: values[1],
        defense: values[2],
        regen: values[3],
        luck: values[4],
    }
}
