//! Game lifecycle endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use domain::{BOARD_SIZE, Game, JoinGame, Mark, NewGame, PlaceMove};
use game_store::{EventBus, GameStore, PlayerStore};
use serde::{Deserialize, Serialize};

use super::{SharedState, parse_game_id, parse_player_id};
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct JoinGameRequest {
    pub player_id: String,
}

#[derive(Deserialize)]
pub struct PlaceMoveRequest {
    pub player_id: String,
    pub row: i64,
    pub column: i64,
    pub mark: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct GameCreatedResponse {
    pub id: String,
}

#[derive(Serialize)]
pub struct PlaceMoveResponse {
    pub state: String,
    pub winner: Option<String>,
}

#[derive(Serialize)]
pub struct GameResponse {
    pub id: String,
    pub players: Vec<String>,
    pub current_player: Option<String>,
    pub state: String,
    pub winner: Option<String>,
    pub board: [[Option<&'static str>; BOARD_SIZE]; BOARD_SIZE],
    pub moves: Vec<MoveResponse>,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub id: String,
    pub player_id: String,
    pub row: i32,
    pub column: i32,
    pub mark: &'static str,
    pub placed_at: DateTime<Utc>,
}

impl From<&Game> for GameResponse {
    fn from(game: &Game) -> Self {
        let state = game.state();
        Self {
            id: game.id().to_string(),
            players: [game.player_one_id(), game.player_two_id()]
                .into_iter()
                .flatten()
                .map(ToString::to_string)
                .collect(),
            current_player: game.current_player().map(ToString::to_string),
            state: state.status.to_string(),
            winner: state.winner.map(|w| w.to_string()),
            board: game
                .board()
                .map(|row| row.map(|cell| cell.map(|mv| mv.mark().as_str()))),
            moves: game
                .moves_from_board()
                .into_iter()
                .map(|mv| MoveResponse {
                    id: mv.id().to_string(),
                    player_id: mv.player_id().to_string(),
                    row: mv.row(),
                    column: mv.column(),
                    mark: mv.mark().as_str(),
                    placed_at: mv.placed_at(),
                })
                .collect(),
        }
    }
}

// -- Handlers --

/// POST /games: create an empty game.
#[tracing::instrument(skip(state))]
pub async fn create<G, P, B>(
    State(state): State<SharedState<G, P, B>>,
) -> Result<(StatusCode, Json<GameCreatedResponse>), ApiError>
where
    G: GameStore + 'static,
    P: PlayerStore + 'static,
    B: EventBus + 'static,
{
    let game_id = state.game_service.new_game(NewGame::new()).await?;

    let response = GameCreatedResponse {
        id: game_id.to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /games/{id}: board view of a game.
#[tracing::instrument(skip(state))]
pub async fn get<G, P, B>(
    State(state): State<SharedState<G, P, B>>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, ApiError>
where
    G: GameStore + 'static,
    P: PlayerStore + 'static,
    B: EventBus + 'static,
{
    let game_id = parse_game_id(&id)?;
    let game = state
        .game_service
        .game(game_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Game with id {id} does not exist")))?;

    Ok(Json(GameResponse::from(&game)))
}

/// POST /games/{id}/join: seat a registered player.
#[tracing::instrument(skip(state, req))]
pub async fn join<G, P, B>(
    State(state): State<SharedState<G, P, B>>,
    Path(id): Path<String>,
    Json(req): Json<JoinGameRequest>,
) -> Result<StatusCode, ApiError>
where
    G: GameStore + 'static,
    P: PlayerStore + 'static,
    B: EventBus + 'static,
{
    let game_id = parse_game_id(&id)?;
    let player_id = parse_player_id(&req.player_id)?;

    state
        .game_service
        .join_game(JoinGame::new(game_id, player_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /games/{id}/moves: place a mark and report the outcome.
#[tracing::instrument(skip(state, req))]
pub async fn place_move<G, P, B>(
    State(state): State<SharedState<G, P, B>>,
    Path(id): Path<String>,
    Json(req): Json<PlaceMoveRequest>,
) -> Result<Json<PlaceMoveResponse>, ApiError>
where
    G: GameStore + 'static,
    P: PlayerStore + 'static,
    B: EventBus + 'static,
{
    let game_id = parse_game_id(&id)?;
    let player_id = parse_player_id(&req.player_id)?;
    let row = parse_coordinate("row", req.row)?;
    let column = parse_coordinate("column", req.column)?;
    let mark = parse_mark(&req.mark)?;

    let game_state = state
        .game_service
        .place_move(PlaceMove::new(game_id, player_id, row, column, mark))
        .await?;

    Ok(Json(PlaceMoveResponse {
        state: game_state.status.to_string(),
        winner: game_state.winner.map(|w| w.to_string()),
    }))
}

fn parse_coordinate(name: &str, value: i64) -> Result<i32, ApiError> {
    i32::try_from(value)
        .ok()
        .filter(|v| (0..BOARD_SIZE as i32).contains(v))
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "{name} must be between 0 and {}, got {value}",
                BOARD_SIZE - 1
            ))
        })
}

fn parse_mark(value: &str) -> Result<Mark, ApiError> {
    value
        .parse()
        .map_err(|e: domain::InvalidMark| ApiError::BadRequest(e.to_string()))
}
