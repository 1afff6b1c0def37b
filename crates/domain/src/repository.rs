//! Persistence gateways.
//!
//! Translate between aggregates and the records a store keeps. Loading
//! validates the stored history before rehydrating, so an aggregate is
//! never built from a record that breaks its invariants.

use std::collections::HashSet;

use common::{GameId, MoveId, PlayerId};
use game_store::{GameRecord, GameStore, MoveRecord, PlayerRecord, PlayerStore};

use crate::aggregate::AggregateRoot;
use crate::error::DomainError;
use crate::game::{BOARD_SIZE, Game, Mark, Move};
use crate::player::{Email, Player};

/// Gateway for loading and persisting games.
pub struct Games<S: GameStore> {
    store: S,
}

impl<S: GameStore> Games<S> {
    /// Creates a gateway over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn next_identity(&self) -> GameId {
        self.store.next_identity()
    }

    pub fn next_move_identity(&self) -> MoveId {
        self.store.next_move_identity()
    }

    /// Loads a game.
    ///
    /// Returns None if the game doesn't exist.
    pub async fn by_id(&self, id: &GameId) -> Result<Option<Game>, DomainError> {
        let Some(record) = self.store.load(id).await? else {
            return Ok(None);
        };

        let version = record.version;
        let mut game = game_from_record(record)?;
        game.set_version(version);

        Ok(Some(game))
    }

    /// Saves player slots and the full move list.
    ///
    /// Advances the game's version on success; fails with a concurrency
    /// conflict if the game was saved by someone else since it was loaded.
    pub async fn persist(&self, game: &mut Game) -> Result<(), DomainError> {
        let version = self
            .store
            .save(game_to_record(game), game.version())
            .await?;
        game.set_version(version);
        Ok(())
    }
}

/// Gateway for loading and persisting players.
pub struct Players<S: PlayerStore> {
    store: S,
}

impl<S: PlayerStore> Players<S> {
    /// Creates a gateway over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn next_identity(&self) -> PlayerId {
        self.store.next_identity()
    }

    /// Loads a player.
    ///
    /// Returns None if the player doesn't exist.
    pub async fn by_id(&self, id: &PlayerId) -> Result<Option<Player>, DomainError> {
        let Some(record) = self.store.load(id).await? else {
            return Ok(None);
        };

        let email = Email::parse(&record.email).map_err(|_| {
            corrupt::<Player>(record.id.as_str(), format!("invalid email {:?}", record.email))
        })?;

        Ok(Some(Player::reconstruct(record.id, email)))
    }

    pub async fn persist(&self, player: &Player) -> Result<(), DomainError> {
        let record = PlayerRecord {
            id: player.id().clone(),
            email: player.email().to_string(),
        };
        self.store.save(record).await?;
        Ok(())
    }
}

fn corrupt<A: AggregateRoot>(id: &str, reason: impl Into<String>) -> DomainError {
    DomainError::CorruptRecord {
        aggregate_type: A::aggregate_type(),
        aggregate_id: id.to_string(),
        reason: reason.into(),
    }
}

fn game_to_record(game: &Game) -> GameRecord {
    GameRecord {
        id: game.id().clone(),
        player_one_id: game.player_one_id().cloned(),
        player_two_id: game.player_two_id().cloned(),
        moves: game
            .moves()
            .iter()
            .map(|mv| MoveRecord {
                id: mv.id().clone(),
                player_id: mv.player_id().clone(),
                row: mv.row(),
                column: mv.column(),
                mark: mv.mark().to_string(),
                placed_at: mv.placed_at(),
            })
            .collect(),
        version: game.version(),
    }
}

fn game_from_record(record: GameRecord) -> Result<Game, DomainError> {
    let game_id = record.id;
    let fail = |reason: String| corrupt::<Game>(game_id.as_str(), reason);

    if record.moves.len() > BOARD_SIZE * BOARD_SIZE {
        return Err(fail(format!("{} moves on the board", record.moves.len())));
    }

    let is_member = |player_id: &PlayerId| {
        record.player_one_id.as_ref() == Some(player_id)
            || record.player_two_id.as_ref() == Some(player_id)
    };

    let mut cells = HashSet::new();
    let mut moves = Vec::with_capacity(record.moves.len());
    for stored in record.moves.iter() {
        let in_range = |value: i32| (0..BOARD_SIZE as i32).contains(&value);
        if !in_range(stored.row) || !in_range(stored.column) {
            return Err(fail(format!(
                "move {} at ({}, {}) is off the board",
                stored.id, stored.row, stored.column
            )));
        }
        if !cells.insert((stored.row, stored.column)) {
            return Err(fail(format!(
                "cell ({}, {}) holds more than one move",
                stored.row, stored.column
            )));
        }
        if !is_member(&stored.player_id) {
            return Err(fail(format!(
                "move {} was placed by non-member {}",
                stored.id, stored.player_id
            )));
        }
        let mark: Mark = stored
            .mark
            .parse()
            .map_err(|e: crate::game::InvalidMark| fail(e.to_string()))?;

        moves.push(Move::restore(
            stored.id.clone(),
            game_id.clone(),
            stored.player_id.clone(),
            stored.row,
            stored.column,
            mark,
            stored.placed_at,
        ));
    }

    Ok(Game::reconstruct(
        game_id.clone(),
        record.player_one_id,
        record.player_two_id,
        moves,
    ))
}
