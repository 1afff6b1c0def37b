use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    EventBus, EventEnvelope, GameId, GameRecord, GameStore, MoveId, PlayerId, PlayerRecord,
    PlayerStore, Result, StoreError, Version,
};

/// In-memory game store.
///
/// Cheap to clone: clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryGameStore {
    games: Arc<RwLock<HashMap<GameId, GameRecord>>>,
}

impl InMemoryGameStore {
    /// Creates a new empty in-memory game store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored games.
    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }

    /// Removes all games.
    pub async fn clear(&self) {
        self.games.write().await.clear();
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    fn next_identity(&self) -> GameId {
        GameId::generate()
    }

    fn next_move_identity(&self) -> MoveId {
        MoveId::generate()
    }

    async fn load(&self, id: &GameId) -> Result<Option<GameRecord>> {
        let games = self.games.read().await;
        Ok(games.get(id).cloned())
    }

    async fn save(&self, mut record: GameRecord, expected: Version) -> Result<Version> {
        let mut games = self.games.write().await;

        let current = games
            .get(&record.id)
            .map(|stored| stored.version)
            .unwrap_or(Version::initial());

        if current != expected {
            return Err(StoreError::ConcurrencyConflict {
                game_id: record.id,
                expected,
                actual: current,
            });
        }

        let version = current.next();
        record.version = version;
        games.insert(record.id.clone(), record);

        Ok(version)
    }
}

/// In-memory player store.
#[derive(Clone, Default)]
pub struct InMemoryPlayerStore {
    players: Arc<RwLock<HashMap<PlayerId, PlayerRecord>>>,
}

impl InMemoryPlayerStore {
    /// Creates a new empty in-memory player store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored players.
    pub async fn player_count(&self) -> usize {
        self.players.read().await.len()
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    fn next_identity(&self) -> PlayerId {
        PlayerId::generate()
    }

    async fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>> {
        let players = self.players.read().await;
        Ok(players.get(id).cloned())
    }

    async fn save(&self, record: PlayerRecord) -> Result<()> {
        let mut players = self.players.write().await;

        let taken = players
            .values()
            .any(|other| other.id != record.id && other.email.eq_ignore_ascii_case(&record.email));
        if taken {
            return Err(StoreError::DuplicateEmail {
                email: record.email,
            });
        }

        players.insert(record.id.clone(), record);
        Ok(())
    }
}

/// In-memory event bus.
///
/// Keeps every published envelope in publication order so callers (and
/// tests) can inspect what went out.
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    events: Arc<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every published event, oldest first.
    pub async fn published(&self) -> Vec<EventEnvelope> {
        self.events.read().await.clone()
    }

    /// Returns the published events of one type, oldest first.
    pub async fn published_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Returns the total number of published events.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Forgets every published event.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<()> {
        for event in &events {
            tracing::debug!(
                event_type = %event.event_type,
                aggregate_type = %event.aggregate_type,
                aggregate_id = %event.aggregate_id,
                "event published"
            );
        }

        self.events.write().await.extend(events);
        Ok(())
    }
}
