//! Game domain events.

use chrono::{DateTime, Utc};
use common::{GameId, MoveId, PlayerId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

/// Events recorded by the game aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum GameEvent {
    /// A fresh game was created.
    NewGameCreated(NewGameCreatedData),

    /// A player joined (or re-announced presence in) the game.
    PlayerJoined(PlayerJoinedData),

    /// A placement was accepted.
    PlayerMoved(PlayerMovedData),

    /// The game reached a win or a draw.
    GameEnded(GameEndedData),
}

impl DomainEvent for GameEvent {
    fn event_type(&self) -> &'static str {
        match self {
            GameEvent::NewGameCreated(_) => "NewGameCreated",
            GameEvent::PlayerJoined(_) => "PlayerJoined",
            GameEvent::PlayerMoved(_) => "PlayerMoved",
            GameEvent::GameEnded(_) => "GameEnded",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            GameEvent::NewGameCreated(data) => data.timestamp,
            GameEvent::PlayerJoined(data) => data.timestamp,
            GameEvent::PlayerMoved(data) => data.timestamp,
            GameEvent::GameEnded(data) => data.timestamp,
        }
    }
}

/// Data for NewGameCreated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGameCreatedData {
    pub game_id: GameId,
    pub timestamp: DateTime<Utc>,
}

/// Data for PlayerJoined event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerJoinedData {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub timestamp: DateTime<Utc>,
}

/// Data for PlayerMoved event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMovedData {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub move_id: MoveId,
    pub timestamp: DateTime<Utc>,
}

/// Data for GameEnded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEndedData {
    pub game_id: GameId,
    pub timestamp: DateTime<Utc>,
}

// Convenience constructors for events
impl GameEvent {
    /// Creates a NewGameCreated event.
    pub fn new_game_created(game_id: GameId) -> Self {
        GameEvent::NewGameCreated(NewGameCreatedData {
            game_id,
            timestamp: Utc::now(),
        })
    }

    /// Creates a PlayerJoined event.
    pub fn player_joined(game_id: GameId, player_id: PlayerId) -> Self {
        GameEvent::PlayerJoined(PlayerJoinedData {
            game_id,
            player_id,
            timestamp: Utc::now(),
        })
    }

    /// Creates a PlayerMoved event.
    pub fn player_moved(game_id: GameId, player_id: PlayerId, move_id: MoveId) -> Self {
        GameEvent::PlayerMoved(PlayerMovedData {
            game_id,
            player_id,
            move_id,
            timestamp: Utc::now(),
        })
    }

    /// Creates a GameEnded event.
    pub fn game_ended(game_id: GameId) -> Self {
        GameEvent::GameEnded(GameEndedData {
            game_id,
            timestamp: Utc::now(),
        })
    }
}
