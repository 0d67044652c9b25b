/// Game rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Genesis cats one wallet may claim per UTC day.
    pub daily_claim_limit: u32,
    /// Ambient cat spawns the game client may request per UTC day, across
    /// all wallets.
    pub daily_spawn_cap: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Per-wallet inventory capacity. Admission beyond this evicts the
    /// weakest non-active cat first.
    pub const MAX_CATS: usize = 5;

    // ===== stat ranges =====
    pub const STAT_MIN: u8 = 1;
    pub const STAT_MAX: u8 = 10;
    /// Genesis cats roll every attribute in [1,5]; higher values only come
    /// from breeding.
    pub const GENESIS_STAT_MIN: u8 = 1;
    pub const GENESIS_STAT_MAX: u8 = 5;

    // ===== cosmetic ranges =====
    pub const VARIANT_MAX: u8 = 10;
    pub const COLLAR_MAX: u8 = 15;

    // ===== lifecycle windows (milliseconds) =====
    /// How long the challenged wallet has to accept a pending challenge.
    pub const ACCEPT_WINDOW_MS: i64 = 30_000;
    /// How long an accepted battle may run before the game client reports a
    /// draw. Enforced client-side; surfaced here for deadline arithmetic.
    pub const BATTLE_WINDOW_MS: i64 = 300_000;
    /// Cooldown applied to the loser's cat after a decisive battle.
    pub const COOLDOWN_MS: i64 = 86_400_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DAILY_CLAIM_LIMIT: u32 = 1;
    pub const DEFAULT_DAILY_SPAWN_CAP: u32 = 10;

    pub fn new() -> Self {
        Self {
            daily_claim_limit: Self::DEFAULT_DAILY_CLAIM_LIMIT,
            daily_spawn_cap: Self::DEFAULT_DAILY_SPAWN_CAP,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
