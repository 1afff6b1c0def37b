//! Game aggregate implementation.

use common::{GameId, PlayerId};
use game_store::Version;

use crate::aggregate::{AggregateRoot, EventLog};

use super::board::{Board, cell_index};
use super::{BOARD_SIZE, GameError, GameEvent, GameResult, GameState, GameStatus, Move};

/// Game aggregate root.
///
/// Owns the move list, the two player slots and the board projection folded
/// from the moves. It is the sole mutator of game state and the sole source
/// of game events. The turn pointer is derived from the move list, never
/// stored.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,

    /// Version the game was loaded at, for optimistic concurrency.
    version: Version,

    player_one_id: Option<PlayerId>,
    player_two_id: Option<PlayerId>,

    /// Placements in play order.
    moves: Vec<Move>,

    board: Board,
    events: EventLog<GameEvent>,
}

impl AggregateRoot for Game {
    type Event = GameEvent;

    fn aggregate_type() -> &'static str {
        "Game"
    }

    fn aggregate_id(&self) -> &str {
        self.id.as_str()
    }

    fn event_log(&self) -> &EventLog<GameEvent> {
        &self.events
    }

    fn event_log_mut(&mut self) -> &mut EventLog<GameEvent> {
        &mut self.events
    }
}

// Construction
impl Game {
    /// Creates a fresh game without players and records `NewGameCreated`.
    pub fn new(id: GameId) -> Self {
        let mut game = Self::reconstruct(id.clone(), None, None, Vec::new());
        game.record(GameEvent::new_game_created(id));
        game
    }

    /// Rehydrates a game from storage.
    ///
    /// Moves may arrive in any order; they are replayed by placement time.
    /// Records no events.
    pub fn reconstruct(
        id: GameId,
        player_one_id: Option<PlayerId>,
        player_two_id: Option<PlayerId>,
        mut moves: Vec<Move>,
    ) -> Self {
        moves.sort_by_key(Move::placed_at);
        let board = Board::from_moves(&moves);

        Self {
            id,
            version: Version::initial(),
            player_one_id,
            player_two_id,
            moves,
            board,
            events: EventLog::new(),
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Sets the version; called by the gateway after loading or saving.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

// Query methods
impl Game {
    pub fn id(&self) -> &GameId {
        &self.id
    }

    pub fn player_one_id(&self) -> Option<&PlayerId> {
        self.player_one_id.as_ref()
    }

    pub fn player_two_id(&self) -> Option<&PlayerId> {
        self.player_two_id.as_ref()
    }

    /// Returns the player entitled to place the next move.
    ///
    /// Player one when no move was placed, otherwise the opponent of the
    /// last move's author (None while that opponent's slot is empty).
    pub fn current_player(&self) -> Option<&PlayerId> {
        match self.moves.last() {
            None => self.player_one_id.as_ref(),
            Some(last) => self.opponent_of(last.player_id()),
        }
    }

    /// Returns true if `player_id` occupies either slot.
    pub fn is_member(&self, player_id: &PlayerId) -> bool {
        self.player_one_id.as_ref() == Some(player_id)
            || self.player_two_id.as_ref() == Some(player_id)
    }

    /// Returns true if both slots are filled.
    pub fn is_full(&self) -> bool {
        self.player_one_id.is_some() && self.player_two_id.is_some()
    }

    /// Returns the full grid.
    pub fn board(&self) -> [[Option<&Move>; BOARD_SIZE]; BOARD_SIZE] {
        self.board.resolve(&self.moves)
    }

    /// Returns the move at a cell; None for empty or off-board cells.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Move> {
        self.board
            .occupant(row, column)
            .and_then(|index| self.moves.get(index))
    }

    pub fn board_is_empty(&self) -> bool {
        self.board.is_empty()
    }

    pub fn board_is_full(&self) -> bool {
        self.board.is_full()
    }

    /// Returns the moves in play order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the moves found on the board, in chronological order.
    pub fn moves_from_board(&self) -> Vec<&Move> {
        let mut placed: Vec<usize> = self.board.occupied().collect();
        placed.sort_by_key(|index| (self.moves[*index].placed_at(), *index));
        placed.into_iter().map(|index| &self.moves[index]).collect()
    }

    /// Evaluates the current outcome from the board.
    pub fn state(&self) -> GameState {
        let status = GameStatus::evaluate(&self.board.marks(&self.moves));
        let winner = if status.is_win() {
            self.moves.last().map(|mv| mv.player_id().clone())
        } else {
            None
        };
        GameState::new(status, winner)
    }

    pub fn is_ended(&self) -> bool {
        self.state().is_ended()
    }

    fn opponent_of(&self, player_id: &PlayerId) -> Option<&PlayerId> {
        if self.player_one_id.as_ref() == Some(player_id) {
            self.player_two_id.as_ref()
        } else {
            self.player_one_id.as_ref()
        }
    }
}

// Command methods
impl Game {
    /// Seats a player.
    ///
    /// Re-joining by a seated player is idempotent and still announces
    /// presence. A third distinct player is rejected.
    pub fn player_join(&mut self, player_id: PlayerId) -> GameResult<()> {
        if !self.is_member(&player_id) {
            if self.is_full() {
                return Err(GameError::GameFull);
            }

            if self.player_one_id.is_none() {
                self.player_one_id = Some(player_id.clone());
            } else {
                self.player_two_id = Some(player_id.clone());
            }
        }

        self.record(GameEvent::player_joined(self.id.clone(), player_id));
        Ok(())
    }

    /// Places a move.
    ///
    /// Checks run in order and the first failure wins: game ended,
    /// membership, turn, row bounds, column bounds, occupancy.
    pub fn place(&mut self, mv: Move) -> GameResult<GameState> {
        if self.is_ended() {
            return Err(GameError::GameEnded);
        }

        let player_id = mv.player_id();
        if !self.is_member(player_id) {
            return Err(GameError::NotAMember {
                player_id: player_id.clone(),
            });
        }

        match self.current_player() {
            Some(current) if current != player_id => {
                return Err(GameError::NotPlayersTurn {
                    player_id: player_id.clone(),
                    current_player: current.clone(),
                });
            }
            None if !self.moves.is_empty() => {
                return Err(GameError::AwaitingOpponent {
                    player_id: player_id.clone(),
                });
            }
            _ => {}
        }

        let row = cell_index(mv.row()).ok_or(GameError::RowOutOfBounds { row: mv.row() })?;
        let column = cell_index(mv.column()).ok_or(GameError::ColumnOutOfBounds {
            column: mv.column(),
        })?;

        if self.board.is_occupied(row, column) {
            return Err(GameError::CellNotEmpty { row, column });
        }

        let event = GameEvent::player_moved(self.id.clone(), player_id.clone(), mv.id().clone());

        self.board.occupy(row, column, self.moves.len());
        self.moves.push(mv);
        self.record(event);

        let state = self.state();
        tracing::debug!(
            game_id = %self.id,
            row,
            column,
            status = %state.status,
            "placement accepted"
        );

        if state.is_ended() {
            self.record(GameEvent::game_ended(self.id.clone()));
        }

        Ok(state)
    }
}
