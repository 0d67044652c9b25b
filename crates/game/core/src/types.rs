//! Identity and time primitives shared across the rules.

use std::fmt;

/// Unique NFT token identifier assigned at mint time.
///
/// Token ids are unique and monotonically non-decreasing within a deployment
/// and are never reused, even after a cat is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenId(pub u64);

impl TokenId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique battle identifier assigned at challenge creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleId(pub u64);

impl BattleId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wallet address in canonical form.
///
/// Wallet identity is case-insensitive. The constructor is the single
/// canonicalization point (trim + lowercase), so two `Wallet` values compare
/// equal exactly when they denote the same address; raw strings are never
/// compared anywhere else.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String")
)]
pub struct Wallet(String);

impl Wallet {
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(address.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Wallet {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl From<&str> for Wallet {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix timestamp in milliseconds.
///
/// All lifecycle timing (cooldowns, acceptance windows, daily quotas) is a
/// wall-clock comparison against values of this type, evaluated lazily at
/// inspection points; nothing schedules wakeups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    /// Milliseconds in one day, the granularity of daily quota buckets.
    pub const DAY_MS: i64 = 86_400_000;

    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Offset by a duration in milliseconds, saturating at the numeric bounds.
    pub fn plus_millis(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Day index since the Unix epoch, used to bucket daily quotas.
    pub fn day_bucket(self) -> i64 {
        self.0.div_euclid(Self::DAY_MS)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_normalizes_case_and_whitespace() {
        let canonical = Wallet::new("0xabc123def");
        assert_eq!(Wallet::new("0xABC123DEF"), canonical);
        assert_eq!(Wallet::new("  0xAbC123dEf  "), canonical);
        assert_eq!(canonical.as_str(), "0xabc123def");
    }

    #[test]
    fn wallet_from_string_canonicalizes() {
        let wallet: Wallet = String::from("0xFEED").into();
        assert_eq!(wallet.as_str(), "0xfeed");
    }

    #[test]
    fn day_bucket_rolls_at_midnight() {
        let last_ms_of_day = Timestamp::new(Timestamp::DAY_MS - 1);
        let first_ms_of_next = Timestamp::new(Timestamp::DAY_MS);
        assert_eq!(last_ms_of_day.day_bucket(), 0);
        assert_eq!(first_ms_of_next.day_bucket(), 1);
    }

    #[test]
    fn plus_millis_saturates() {
        let far_future = Timestamp::new(i64::MAX);
        assert_eq!(far_future.plus_millis(1), far_future);
    }
}
