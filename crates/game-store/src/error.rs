use thiserror::Error;

use crate::{GameId, Version};

/// Errors that can occur when interacting with a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A concurrency conflict occurred when saving a game.
    /// The expected version did not match the stored version.
    #[error(
        "Concurrency conflict for game {game_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        game_id: GameId,
        expected: Version,
        actual: Version,
    },

    /// Another player is already registered with this e-mail address.
    #[error("A player with email {email} already exists")]
    DuplicateEmail { email: String },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
