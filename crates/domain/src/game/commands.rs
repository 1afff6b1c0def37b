//! Game commands.

use common::{GameId, PlayerId};
use serde::{Deserialize, Serialize};

use super::Mark;

/// Command to create a new, empty game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGame;

impl NewGame {
    pub fn new() -> Self {
        Self
    }
}

/// Command to seat a player in a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGame {
    pub game_id: GameId,
    pub player_id: PlayerId,
}

impl JoinGame {
    pub fn new(game_id: GameId, player_id: PlayerId) -> Self {
        Self { game_id, player_id }
    }
}

/// Command to place a mark on a game's board.
///
/// `row` and `column` are not range-checked here; the game rejects
/// off-board placements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceMove {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub row: i32,
    pub column: i32,
    pub mark: Mark,
}

impl PlaceMove {
    pub fn new(game_id: GameId, player_id: PlayerId, row: i32, column: i32, mark: Mark) -> Self {
        Self {
            game_id,
            player_id,
            row,
            column,
            mark,
        }
    }
}
