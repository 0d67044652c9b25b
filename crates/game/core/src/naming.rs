//! Deterministic display names from rarity and token id.

use crate::rarity::RarityTier;
use crate::types::TokenId;

/// Base name pools per tier. Order matters: selection is `token % len`.
const COMMON: [&str; 5] = ["Boz", "Kara", "Ak", "Sary", "Kyzyl"];
const UNCOMMON: [&str; 5] = ["Tengri", "Issyk", "Naryn", "Asman", "Bermet"];
const RARE: [&str; 5] = ["Cholpon", "Altynai", "Dinara", "Sanjar", "Kubat"];
const LEGENDARY: [&str; 4] = ["Ala-Too", "Manas", "Kurmanjan", "Toktogul"];

/// Suffix pool shared across all tiers.
const SUFFIXES: [&str; 15] = [
    "Paws",
    "Shadow",
    "Runner",
    "Flame",
    "Hunter",
    "Stripes",
    "Eyes",
    "Jumper",
    "Tail",
    "Whiskers",
    "Storm",
    "Thunder",
    "Lightning",
    "Frost",
    "Blaze",
];

fn pool(tier: RarityTier) -> &'static [&'static str] {
    match tier {
        RarityTier::Common => &COMMON,
        RarityTier::Uncommon => &UNCOMMON,
        RarityTier::Rare => &RARE,
        RarityTier::Legendary => &LEGENDARY,
    }
}

/// Compose a display name from a rarity score and token id.
///
/// Pure: the same `(score, token)` pair always yields the same string. Base
/// and suffix come from fixed ordered pools indexed by token-id modulo, so
/// names survive restarts without any stored naming state.
pub fn give_name(score: u32, token: TokenId) -> String {
    let bases = pool(RarityTier::from_score(score));
    let base = bases[(token.0 % bases.len() as u64) as usize];
    let suffix = SUFFIXES[(token.0 % SUFFIXES.len() as u64) as usize];
    format!("{base} {suffix} {token}")
}
