//! Heritable attribute block and its range invariant.

use thiserror::Error;

use crate::config::GameConfig;

/// Errors raised when a stat block arriving from the boundary violates the
/// range contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatError {
    #[error("stat {name} value {value} is outside the valid range")]
    OutOfRange { name: &'static str, value: u8 },
}

/// The five heritable attributes.
///
/// Invariant: at rest every value lies in
/// `[GameConfig::STAT_MIN, GameConfig::STAT_MAX]`. Intermediate breeding
/// arithmetic may leave the range; [`StatBlock::clamp`] is applied as the
/// last step of every stat-producing computation and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub speed: u8,
    pub strength: u8,
    pub defense: u8,
    pub regen: u8,
    pub luck: u8,
}

impl StatBlock {
    pub fn new(speed: u8, strength: u8, defense: u8, regen: u8, luck: u8) -> Self {
        Self {
            speed,
            strength,
            defense,
            regen,
            luck,
        }
    }

    /// All five attributes set to the same value.
    pub fn uniform(value: u8) -> Self {
        Self::new(value, value, value, value, value)
    }

    /// Clamp an intermediate stat computation into the legal range,
    /// `min(STAT_MAX, max(STAT_MIN, value))`.
    pub fn clamp(value: i32) -> u8 {
        value.clamp(GameConfig::STAT_MIN as i32, GameConfig::STAT_MAX as i32) as u8
    }

    /// Rarity score: the exact sum of the five attributes.
    ///
    /// Range [5,50] under the block invariant. Derived data: recompute after
    /// any stat change, never patch a stored copy.
    pub fn rarity_score(&self) -> u32 {
        self.values().iter().map(|&v| v as u32).sum()
    }

    /// Validate a block arriving from outside the rules engine.
    pub fn validate(&self) -> Result<(), StatError> {
        for (name, value) in self.named() {
            if !(GameConfig::STAT_MIN..=GameConfig::STAT_MAX).contains(&value) {
                return Err(StatError::OutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// Attribute values in declaration order.
    pub fn values(&self) -> [u8; 5] {
        [self.speed, self.strength, self.defense, self.regen, self.luck]
    }

    /// Attribute values paired with their names, in declaration order.
    pub fn named(&self) -> [(&'static str, u8); 5] {
        [
            ("speed", self.speed),
            ("strength", self.strength),
            ("defense", self.defense),
            ("regen", self.regen),
            ("luck", self.luck),
        ]
    }
}
