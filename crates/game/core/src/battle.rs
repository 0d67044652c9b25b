//! Battle lifecycle: challenge, acceptance and resolution.
//!
//! A [`Battle`] is an immutable record; transition methods return the
//! updated record and leave the original untouched, so callers stage the
//! change and commit only after the rest of the operation succeeds.

use thiserror::Error;

use crate::config::GameConfig;
use crate::types::{BattleId, Timestamp, TokenId, Wallet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BattleState {
    /// Challenge issued, waiting on the challenged wallet.
    Pending,
    /// Accepted and fighting; waiting on a resolution report.
    InProgress,
    /// Resolved, decisively or as a draw. Terminal.
    Completed,
    /// Challenge lapsed before acceptance. Terminal.
    Cancelled,
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BattleReason {
    /// A cat was knocked out in play.
    Death,
    /// A player conceded.
    Quit,
    /// The window lapsed: acceptance for cancelled battles, play time for
    /// drawn ones.
    Timeout,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BattleError {
    #[error("battle is {actual}, expected {expected}")]
    InvalidState {
        expected: BattleState,
        actual: BattleState,
    },
    #[error("only the challenged wallet may accept")]
    NotChallenged,
    #[error("challenge acceptance window has expired")]
    AcceptWindowExpired,
    #[error("{0} is not a participant in this battle")]
    NotAParticipant(Wallet),
    #[error("winner and loser must be different wallets")]
    WinnerIsLoser,
}

type Result<T> = std::result::Result<T, BattleError>;

/// The cats a decisive outcome assigns to each side, in winner/loser
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleCast {
    pub winner_cat: TokenId,
    pub loser_cat: TokenId,
}

/// One challenge and everything that became of it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    pub id: BattleId,
    pub challenger: Wallet,
    pub challenged: Wallet,
    pub challenger_cat: TokenId,
    pub challenged_cat: TokenId,
    pub state: BattleState,
    /// When the current phase began: challenge issue time while pending,
    /// acceptance time once in progress.
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub winner: Option<Wallet>,
    pub loser: Option<Wallet>,
    pub reason: Option<BattleReason>,
    /// Token bred for the winner on a decisive outcome.
    pub child: Option<TokenId>,
    /// Token the child displaced from the winner's roster, if any.
    pub evicted: Option<TokenId>,
}

impl Battle {
    /// Issue a new challenge.
    pub fn open(
        id: BattleId,
        challenger: Wallet,
        challenged: Wallet,
        challenger_cat: TokenId,
        challenged_cat: TokenId,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            challenger,
            challenged,
            challenger_cat,
            challenged_cat,
            state: BattleState::Pending,
            started_at: now,
            ended_at: None,
            winner: None,
            loser: None,
            reason: None,
            child: None,
            evicted: None,
        }
    }

    fn expect_state(&self, expected: BattleState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(BattleError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    /// Last instant at which a pending challenge may still be accepted.
    pub fn accept_deadline(&self) -> Timestamp {
        self.started_at.plus_millis(GameConfig::ACCEPT_WINDOW_MS)
    }

    /// Last instant at which an in-progress battle may still run.
    pub fn battle_deadline(&self) -> Timestamp {
        self.started_at.plus_millis(GameConfig::BATTLE_WINDOW_MS)
    }

    pub fn involves(&self, wallet: &Wallet) -> bool {
        self.challenger == *wallet || self.challenged == *wallet
    }

    /// Cat the given participant staked, if they are in this battle.
    pub fn participant_cat(&self, wallet: &Wallet) -> Option<TokenId> {
        if self.challenger == *wallet {
            Some(self.challenger_cat)
        } else if self.challenged == *wallet {
            Some(self.challenged_cat)
        } else {
            None
        }
    }

    /// Cancel a pending challenge whose acceptance window has lapsed.
    /// Returns the cancelled record, or `None` if the battle is not a
    /// stale pending challenge.
    pub fn expire_if_overdue(&self, now: Timestamp) -> Option<Battle> {
        if self.state != BattleState::Pending || now <= self.accept_deadline() {
            return None;
        }
        let mut next = self.clone();
        next.state = BattleState::Cancelled;
        next.reason = Some(BattleReason::Timeout);
        next.ended_at = Some(now);
        Some(next)
    }

    /// Accept a pending challenge. Only the challenged wallet may accept,
    /// and only while the window is open.
    pub fn accept(&self, wallet: &Wallet, now: Timestamp) -> Result<Battle> {
        self.expect_state(BattleState::Pending)?;
        if *wallet != self.challenged {
            return Err(BattleError::NotChallenged);
        }
        if now > self.accept_deadline() {
            return Err(BattleError::AcceptWindowExpired);
        }
        let mut next = self.clone();
        next.state = BattleState::InProgress;
        next.started_at = now;
        Ok(next)
    }

    /// Map a reported winner/loser wallet pair onto the cats each side
    /// staked.
    pub fn casting(&self, winner: &Wallet, loser: &Wallet) -> Result<BattleCast> {
        if winner == loser {
            return Err(BattleError::WinnerIsLoser);
        }
        let cat_of = |wallet: &Wallet| {
            self.participant_cat(wallet)
                .ok_or_else(|| BattleError::NotAParticipant(wallet.clone()))
        };
        Ok(BattleCast {
            winner_cat: cat_of(winner)?,
            loser_cat: cat_of(loser)?,
        })
    }

    /// Close an in-progress battle as a draw. No winner, no child.
    pub fn resolve_draw(&self, now: Timestamp) -> Result<Battle> {
        self.expect_state(BattleState::InProgress)?;
        let mut next = self.clone();
        next.state = BattleState::Completed;
        next.reason = Some(BattleReason::Timeout);
        next.ended_at = Some(now);
        Ok(next)
    }

    /// Close an in-progress battle decisively.
    pub fn complete(
        &self,
        winner: Wallet,
        loser: Wallet,
        reason: BattleReason,
        child: TokenId,
        evicted: Option<TokenId>,
        now: Timestamp,
    ) -> Result<Battle> {
        self.expect_state(BattleState::InProgress)?;
        let mut next = self.clone();
        next.state = BattleState::Completed;
        next.winner = Some(winner);
        next.loser = Some(loser);
        next.reason = Some(reason);
        next.child = Some(child);
        next.evicted = evicted;
        next.ended_at = Some(now);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Wallet {
        Wallet::new("0xalice")
    }

    fn bob() -> Wallet {
        Wallet::new("0xbob")
    }

    fn pending() -> Battle {
        Battle::open(BattleId(1), alice(), bob(), TokenId(10), TokenId(20), Timestamp(1_000))
    }

    fn in_progress() -> Battle {
        pending().accept(&bob(), Timestamp(2_000)).unwrap()
    }

    #[test]
    fn open_starts_pending_with_deadlines() {
        let battle = pending();
        assert_eq!(battle.state, BattleState::Pending);
        assert_eq!(battle.accept_deadline(), Timestamp(31_000));
        assert_eq!(battle.winner, None);
        assert_eq!(battle.ended_at, None);
    }

    #[test]
    fn only_the_challenged_wallet_accepts() {
        let battle = pending();
        assert_eq!(
            battle.accept(&alice(), Timestamp(2_000)),
            Err(BattleError::NotChallenged)
        );
        assert_eq!(
            battle.accept(&Wallet::new("0xmallory"), Timestamp(2_000)),
            Err(BattleError::NotChallenged)
        );

        let accepted = battle.accept(&bob(), Timestamp(2_000)).unwrap();
        assert_eq!(accepted.state, BattleState::InProgress);
        // The clock restarts for the play window.
        assert_eq!(accepted.started_at, Timestamp(2_000));
        assert_eq!(accepted.battle_deadline(), Timestamp(302_000));
        // The original record is untouched.
        assert_eq!(battle.state, BattleState::Pending);
    }

    #[test]
    fn acceptance_closes_exactly_past_the_deadline() {
        let battle = pending();
        assert!(battle.accept(&bob(), Timestamp(31_000)).is_ok());
        assert_eq!(
            battle.accept(&bob(), Timestamp(31_001)),
            Err(BattleError::AcceptWindowExpired)
        );
    }

    #[test]
    fn accept_rejects_wrong_states() {
        let battle = in_progress();
        assert_eq!(
            battle.accept(&bob(), Timestamp(3_000)),
            Err(BattleError::InvalidState {
                expected: BattleState::Pending,
                actual: BattleState::InProgress,
            })
        );
    }

    #[test]
    fn stale_pending_challenges_expire() {
        let battle = pending();
        assert!(battle.expire_if_overdue(Timestamp(31_000)).is_none());

        let expired = battle.expire_if_overdue(Timestamp(31_001)).unwrap();
        assert_eq!(expired.state, BattleState::Cancelled);
        assert_eq!(expired.reason, Some(BattleReason::Timeout));
        assert_eq!(expired.ended_at, Some(Timestamp(31_001)));

        // Only pending challenges lapse this way.
        assert!(in_progress().expire_if_overdue(Timestamp(999_999)).is_none());
        assert!(expired.expire_if_overdue(Timestamp(999_999)).is_none());
    }

    #[test]
    fn casting_maps_wallets_onto_staked_cats() {
        let battle = in_progress();
        let cast = battle.casting(&alice(), &bob()).unwrap();
        assert_eq!(cast.winner_cat, TokenId(10));
        assert_eq!(cast.loser_cat, TokenId(20));

        let reversed = battle.casting(&bob(), &alice()).unwrap();
        assert_eq!(reversed.winner_cat, TokenId(20));
        assert_eq!(reversed.loser_cat, TokenId(10));
    }

    #[test]
    fn casting_rejects_outsiders_and_degenerate_pairs() {
        let battle = in_progress();
        assert_eq!(
            battle.casting(&alice(), &alice()),
            Err(BattleError::WinnerIsLoser)
        );
        let mallory = Wallet::new("0xmallory");
        assert_eq!(
            battle.casting(&mallory, &bob()),
            Err(BattleError::NotAParticipant(mallory.clone()))
        );
        assert_eq!(
            battle.casting(&alice(), &mallory),
            Err(BattleError::NotAParticipant(mallory))
        );
    }

    #[test]
    fn draws_complete_without_a_winner() {
        let drawn = in_progress().resolve_draw(Timestamp(10_000)).unwrap();
        assert_eq!(drawn.state, BattleState::Completed);
        assert_eq!(drawn.reason, Some(BattleReason::Timeout));
        assert_eq!(drawn.winner, None);
        assert_eq!(drawn.loser, None);
        assert_eq!(drawn.child, None);
        assert_eq!(drawn.ended_at, Some(Timestamp(10_000)));
    }

    #[test]
    fn decisive_completion_records_everything() {
        let battle = in_progress();
        let done = battle
            .complete(
                bob(),
                alice(),
                BattleReason::Death,
                TokenId(77),
                Some(TokenId(10)),
                Timestamp(50_000),
            )
            .unwrap();
        assert_eq!(done.state, BattleState::Completed);
        assert_eq!(done.winner, Some(bob()));
        assert_eq!(done.loser, Some(alice()));
        assert_eq!(done.reason, Some(BattleReason::Death));
        assert_eq!(done.child, Some(TokenId(77)));
        assert_eq!(done.evicted, Some(TokenId(10)));

        // Terminal states stay terminal.
        assert_eq!(
            done.resolve_draw(Timestamp(60_000)),
            Err(BattleError::InvalidState {
                expected: BattleState::InProgress,
                actual: BattleState::Completed,
            })
        );
        assert!(
            done.complete(
                bob(),
                alice(),
                BattleReason::Quit,
                TokenId(78),
                None,
                Timestamp(60_000)
            )
            .is_err()
        );
    }

    #[test]
    fn pending_battles_cannot_resolve() {
        let battle = pending();
        assert_eq!(
            battle.resolve_draw(Timestamp(5_000)),
            Err(BattleError::InvalidState {
                expected: BattleState::InProgress,
                actual: BattleState::Pending,
            })
        );
    }

    #[test]
    fn involvement_covers_both_sides_only() {
        let battle = pending();
        assert!(battle.involves(&alice()));
        assert!(battle.involves(&bob()));
        assert!(!battle.involves(&Wallet::new("0xmallory")));
        assert_eq!(battle.participant_cat(&alice()), Some(TokenId(10)));
        assert_eq!(battle.participant_cat(&Wallet::new("0xmallory")), None);
    }

    #[test]
    fn states_render_snake_case() {
        assert_eq!(BattleState::InProgress.to_string(), "in_progress");
        assert_eq!(BattleState::Pending.to_string(), "pending");
        assert_eq!(BattleReason::Death.to_string(), "death");
    }
}
