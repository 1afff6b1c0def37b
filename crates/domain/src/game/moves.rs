//! Placement records.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::{GameId, MoveId, PlayerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the two placement symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the mark as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing something other than "X" or "O".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid mark: {0} (expected X or O)")]
pub struct InvalidMark(pub String);

impl FromStr for Mark {
    type Err = InvalidMark;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Mark::X),
            "O" => Ok(Mark::O),
            other => Err(InvalidMark(other.to_string())),
        }
    }
}

/// An immutable record of one placement: who, where, what mark, when.
///
/// `row` and `column` are kept as given so that out-of-range placements can
/// be rejected by the game as a domain failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    id: MoveId,
    game_id: GameId,
    player_id: PlayerId,
    row: i32,
    column: i32,
    mark: Mark,
    placed_at: DateTime<Utc>,
}

impl Move {
    /// Creates a move placed now.
    pub fn new(
        id: MoveId,
        game_id: GameId,
        player_id: PlayerId,
        row: i32,
        column: i32,
        mark: Mark,
    ) -> Self {
        Self::restore(id, game_id, player_id, row, column, mark, Utc::now())
    }

    /// Recreates a historical move with its original placement time.
    pub fn restore(
        id: MoveId,
        game_id: GameId,
        player_id: PlayerId,
        row: i32,
        column: i32,
        mark: Mark,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            game_id,
            player_id,
            row,
            column,
            mark,
            placed_at,
        }
    }

    pub fn id(&self) -> &MoveId {
        &self.id
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }
}
