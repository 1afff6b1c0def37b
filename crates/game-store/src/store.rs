use async_trait::async_trait;

use crate::{
    EventEnvelope, GameId, GameRecord, MoveId, PlayerId, PlayerRecord, Result, Version,
};

/// Storage for game records.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Issues the identifier for a new game.
    fn next_identity(&self) -> GameId;

    /// Issues the identifier for a new move.
    fn next_move_identity(&self) -> MoveId;

    /// Loads a game record.
    ///
    /// Returns None if the game doesn't exist.
    async fn load(&self, id: &GameId) -> Result<Option<GameRecord>>;

    /// Saves a game record.
    ///
    /// The save is a compare-and-swap: it fails with `ConcurrencyConflict`
    /// unless the stored version equals `expected` (a game that was never
    /// saved is at `Version::initial()`).
    ///
    /// Returns the new version of the record.
    async fn save(&self, record: GameRecord, expected: Version) -> Result<Version>;
}

/// Storage for player records.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Issues the identifier for a new player.
    fn next_identity(&self) -> PlayerId;

    /// Loads a player record.
    ///
    /// Returns None if the player doesn't exist.
    async fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>>;

    /// Saves a player record, replacing any record with the same ID.
    ///
    /// Fails with `DuplicateEmail` if another player owns the address.
    async fn save(&self, record: PlayerRecord) -> Result<()>;
}

/// Destination for domain events drained from aggregates.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publishes a batch of events in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<()>;
}
