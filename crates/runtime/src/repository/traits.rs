//! Store contracts for the game's three record kinds.
//!
//! Method names are distinct across the traits so the [`GameStore`]
//! composite stays callable through `Arc<dyn GameStore>` without
//! disambiguation.

use game_core::{Battle, BattleId, Cat, Inventory, Timestamp, TokenId, Wallet};

use super::error::Result;

/// Storage for cat records.
///
/// Cat and inventory writes are coupled: inserting a cat registers the
/// token in the owner's inventory and removing one detaches it, so the
/// two record kinds cannot drift apart.
pub trait CatStore: Send + Sync {
    /// Insert a freshly minted cat and register it in the owner's
    /// inventory. The token id must already be assigned. Fails on a
    /// duplicate token or a full inventory; callers evict first.
    fn insert_cat(&self, cat: Cat) -> Result<()>;

    /// Look up a cat by token.
    fn cat(&self, token: TokenId) -> Result<Option<Cat>>;

    /// Remove a cat and detach it from its owner's inventory, clearing
    /// the active designation if it pointed at the token. Returns the
    /// removed record.
    fn remove_cat(&self, token: TokenId) -> Result<Option<Cat>>;

    /// Overwrite a cat's cooldown. Fails if the token is unknown.
    fn set_cooldown(&self, token: TokenId, until: Timestamp) -> Result<()>;

    /// Smallest token id never yet assigned (high-water mark). Ids below
    /// this may have existed and must not be handed out again; external
    /// allocators seed from it after a reload.
    fn next_token_id(&self) -> Result<TokenId>;
}

/// Storage for per-wallet inventories.
pub trait InventoryStore: Send + Sync {
    /// A wallet's inventory, empty if it never acquired a cat.
    fn inventory(&self, wallet: &Wallet) -> Result<Inventory>;

    /// Mark a token as the wallet's active battler. Returns false when
    /// the token is not in the wallet's inventory.
    fn set_active(&self, wallet: &Wallet, token: TokenId) -> Result<bool>;
}

/// Storage for battle records.
pub trait BattleStore: Send + Sync {
    /// Hand out the next battle id. Ids are never reused.
    fn reserve_battle_id(&self) -> Result<BattleId>;

    /// Look up a battle by id.
    fn battle(&self, id: BattleId) -> Result<Option<Battle>>;

    /// Insert or replace a battle record.
    fn put_battle(&self, battle: Battle) -> Result<()>;

    /// The pending challenge directed at a wallet, if any.
    fn pending_for(&self, wallet: &Wallet) -> Result<Option<Battle>>;

    /// The in-progress battle a wallet is fighting on either side, if
    /// any.
    fn in_progress_for(&self, wallet: &Wallet) -> Result<Option<Battle>>;
}

/// Complete storage interface the game service runs against.
pub trait GameStore: CatStore + InventoryStore + BattleStore {}

impl<T: CatStore + InventoryStore + BattleStore> GameStore for T {}
