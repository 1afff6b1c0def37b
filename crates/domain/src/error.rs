//! Domain error types.

use common::{GameId, PlayerId};
use game_store::StoreError;
use thiserror::Error;

use crate::game::GameError;
use crate::player::PlayerError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The game rejected the command.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The player aggregate rejected the command.
    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error("Game with id {0} does not exist")]
    GameNotFound(GameId),

    #[error("Player with id {0} not found")]
    PlayerNotFound(PlayerId),

    /// A stored record cannot be turned back into an aggregate.
    #[error("Corrupt record for {aggregate_type} {aggregate_id}: {reason}")]
    CorruptRecord {
        aggregate_type: &'static str,
        aggregate_id: String,
        reason: String,
    },

    /// An event could not be wrapped for publication.
    #[error("Event envelope for {event_type} is missing required fields")]
    IncompleteEnvelope { event_type: &'static str },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    /// Returns true if the error is an expected rejection by an aggregate.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DomainError::Game(_) | DomainError::Player(_))
    }

    /// Returns true if the requested game or player does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::GameNotFound(_) | DomainError::PlayerNotFound(_)
        )
    }
}
