//! Per-wallet roster with a hard capacity and weakest-first eviction.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::config::GameConfig;
use crate::types::{TokenId, Wallet};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdmissionError {
    /// Full roster where every slot is shielded from eviction. The incoming
    /// cat must not be minted.
    #[error("inventory is full and no cat is eligible for eviction")]
    NoEvictionCandidate,
}

/// One wallet's cats, capped at [`GameConfig::MAX_CATS`].
///
/// The inventory only tracks membership and the active selection; stat
/// data lives on the [`Cat`](crate::Cat) records. Eviction decisions are
/// made by [`select_eviction`] from a scored view of the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub wallet: Wallet,
    cats: ArrayVec<TokenId, { GameConfig::MAX_CATS }>,
    active: Option<TokenId>,
}

impl Inventory {
    pub fn new(wallet: Wallet) -> Self {
        Self {
            wallet,
            cats: ArrayVec::new(),
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.cats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cats.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cats.is_full()
    }

    pub fn contains(&self, token: TokenId) -> bool {
        self.cats.contains(&token)
    }

    pub fn tokens(&self) -> &[TokenId] {
        &self.cats
    }

    pub fn active(&self) -> Option<TokenId> {
        self.active
    }

    /// Add a token. Returns false when the roster is already full; callers
    /// must have made room (or chosen an eviction) beforehand.
    pub fn insert(&mut self, token: TokenId) -> bool {
        if self.contains(token) {
            return false;
        }
        self.cats.try_push(token).is_ok()
    }

    /// Mark a token as the active battler. Returns false when the token is
    /// not in this inventory.
    pub fn set_active(&mut self, token: TokenId) -> bool {
        if !self.contains(token) {
            return false;
        }
        self.active = Some(token);
        true
    }

    /// Remove a token, clearing the active mark if it pointed at it.
    /// Returns false when the token was not present.
    pub fn remove(&mut self, token: TokenId) -> bool {
        let Some(index) = self.cats.iter().position(|&t| t == token) else {
            return false;
        };
        self.cats.remove(index);
        if self.active == Some(token) {
            self.active = None;
        }
        true
    }
}

/// Decide whether admitting one more cat requires an eviction, and which.
///
/// `cats` is the current roster as (token, rarity score) pairs. Below
/// capacity no eviction is needed. At capacity the weakest non-active cat
/// goes, ties broken by the lower token id. A full roster where every cat
/// is shielded (degenerate single-slot configurations) fails closed.
pub fn select_eviction(
    cats: &[(TokenId, u32)],
    active: Option<TokenId>,
) -> Result<Option<TokenId>, AdmissionError> {
    if cats.len() < GameConfig::MAX_CATS {
        return Ok(None);
    }

    cats.iter()
        .filter(|(token, _)| active != Some(*token))
        .min_by_key(|(token, score)| (*score, *token))
        .map(|(token, _)| Some(*token))
        .ok_or(AdmissionError::NoEvictionCandidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(scores: &[u32]) -> Vec<(TokenId, u32)> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| (TokenId(i as u64 + 1), score))
            .collect()
    }

    #[test]
    fn below_capacity_admits_without_eviction() {
        let cats = roster(&[15, 20, 25, 30]);
        assert_eq!(select_eviction(&cats, None), Ok(None));
    }

    #[test]
    fn full_roster_evicts_the_weakest() {
        let cats = roster(&[15, 20, 25, 30, 35]);
        assert_eq!(select_eviction(&cats, None), Ok(Some(TokenId(1))));
    }

    #[test]
    fn active_weakest_is_shielded() {
        let cats = roster(&[15, 20, 25, 30, 35]);
        let picked = select_eviction(&cats, Some(TokenId(1)));
        assert_eq!(picked, Ok(Some(TokenId(2))));
    }

    #[test]
    fn score_ties_break_toward_the_lower_token() {
        let cats = vec![
            (TokenId(9), 20),
            (TokenId(3), 15),
            (TokenId(7), 15),
            (TokenId(5), 30),
            (TokenId(2), 35),
        ];
        assert_eq!(select_eviction(&cats, None), Ok(Some(TokenId(3))));
        // Shielding the winner of the tie hands it to the other side.
        assert_eq!(select_eviction(&cats, Some(TokenId(3))), Ok(Some(TokenId(7))));
    }

    #[test]
    fn all_slots_shielded_fails_closed() {
        let cats = vec![(TokenId(1), 10); GameConfig::MAX_CATS];
        assert_eq!(
            select_eviction(&cats, Some(TokenId(1))),
            Err(AdmissionError::NoEvictionCandidate)
        );
    }

    #[test]
    fn insert_rejects_overflow_and_duplicates() {
        let mut inv = Inventory::new(Wallet::new("0xA"));
        for i in 0..GameConfig::MAX_CATS {
            assert!(inv.insert(TokenId(i as u64)));
        }
        assert!(inv.is_full());
        assert!(!inv.insert(TokenId(99)));
        assert!(!inv.insert(TokenId(0)));
        assert_eq!(inv.len(), GameConfig::MAX_CATS);
    }

    #[test]
    fn active_mark_requires_membership_and_clears_on_removal() {
        let mut inv = Inventory::new(Wallet::new("0xA"));
        inv.insert(TokenId(1));
        inv.insert(TokenId(2));

        assert!(!inv.set_active(TokenId(3)));
        assert_eq!(inv.active(), None);

        assert!(inv.set_active(TokenId(2)));
        assert_eq!(inv.active(), Some(TokenId(2)));

        assert!(inv.remove(TokenId(2)));
        assert_eq!(inv.active(), None);
        assert!(!inv.remove(TokenId(2)));
        assert_eq!(inv.len(), 1);
    }
}
