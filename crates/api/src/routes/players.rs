//! Player registration endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::NewPlayer;
use game_store::{EventBus, GameStore, PlayerStore};
use serde::{Deserialize, Serialize};

use super::SharedState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct NewPlayerRequest {
    pub email: String,
}

#[derive(Serialize)]
pub struct PlayerCreatedResponse {
    pub id: String,
}

/// POST /players: register a player by e-mail address.
#[tracing::instrument(skip(state, req))]
pub async fn create<G, P, B>(
    State(state): State<SharedState<G, P, B>>,
    Json(req): Json<NewPlayerRequest>,
) -> Result<(StatusCode, Json<PlayerCreatedResponse>), ApiError>
where
    G: GameStore + 'static,
    P: PlayerStore + 'static,
    B: EventBus + 'static,
{
    let player_id = state
        .game_service
        .new_player(NewPlayer::new(req.email))
        .await?;

    let response = PlayerCreatedResponse {
        id: player_id.to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}
