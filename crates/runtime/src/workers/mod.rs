//! Worker task that backs the runtime orchestration.

mod game;

pub use game::{Command, GameWorker};
