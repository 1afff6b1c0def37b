//! Game aggregate and related types.

mod aggregate;
mod board;
mod commands;
mod events;
mod moves;
mod state;

pub use aggregate::Game;
pub use board::BOARD_SIZE;
pub use commands::{JoinGame, NewGame, PlaceMove};
pub use events::{GameEndedData, GameEvent, NewGameCreatedData, PlayerJoinedData, PlayerMovedData};
pub use moves::{InvalidMark, Mark, Move};
pub use state::{GameState, GameStatus};

use common::PlayerId;
use thiserror::Error;

/// Expected failures of game operations.
///
/// Every variant is a recoverable domain failure; the messages are shown to
/// clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Two distinct players already occupy the slots.
    #[error("Game is full")]
    GameFull,

    /// A win or draw was already reached.
    #[error("Game is ended")]
    GameEnded,

    /// The acting player occupies neither slot.
    #[error("Player with id: {player_id} is not part of the game")]
    NotAMember { player_id: PlayerId },

    /// The acting player is not the current player.
    #[error("Player with id: {player_id} cannot move. Current player turn is: {current_player}")]
    NotPlayersTurn {
        player_id: PlayerId,
        current_player: PlayerId,
    },

    /// Player one already moved and the turn belongs to an empty slot.
    #[error("Player with id: {player_id} cannot move. Waiting for an opponent to join")]
    AwaitingOpponent { player_id: PlayerId },

    /// Row outside `0..BOARD_SIZE`.
    #[error("Row is out of bounds")]
    RowOutOfBounds { row: i32 },

    /// Column outside `0..BOARD_SIZE`.
    #[error("Column is out of bounds")]
    ColumnOutOfBounds { column: i32 },

    /// The target cell already holds a move.
    #[error("Cell is not empty")]
    CellNotEmpty { row: usize, column: usize },
}

/// Outcome of a fallible game operation: the value, or the expected failure.
pub type GameResult<T> = std::result::Result<T, GameError>;
