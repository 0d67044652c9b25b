//! Minting abstraction between the game runtime and a token backend.
//!
//! The runtime only ever talks to [`CatMinter`]; which chain (if any)
//! sits behind it is a deployment concern. [`MockMinter`] is the bundled
//! backend for tests and chainless runs.

pub mod mock;
pub mod traits;
pub mod types;

pub use mock::MockMinter;
pub use traits::{CatMinter, MintError};
pub use types::{MintReceipt, MintRequest, TxHash};
