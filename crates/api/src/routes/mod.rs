//! HTTP route handlers.

pub mod games;
pub mod health;
pub mod metrics;
pub mod players;

use std::sync::Arc;

use common::{GameId, PlayerId};
use domain::GameService;
use game_store::{EventBus, GameStore, PlayerStore};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<G: GameStore, P: PlayerStore, B: EventBus> {
    pub game_service: GameService<G, P, B>,
}

/// State handle as extracted by handlers.
pub type SharedState<G, P, B> = Arc<AppState<G, P, B>>;

/// Parses a path or body identifier; only UUIDs are accepted on the wire.
pub(crate) fn parse_game_id(id: &str) -> Result<GameId, ApiError> {
    parse_uuid(id, "game").map(GameId::from)
}

pub(crate) fn parse_player_id(id: &str) -> Result<PlayerId, ApiError> {
    parse_uuid(id, "player").map(PlayerId::from)
}

fn parse_uuid(id: &str, kind: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid {kind} ID format: {e}")))
}
