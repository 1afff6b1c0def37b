//! Persistence-neutral records.
//!
//! These are the fields a store must round-trip losslessly. They carry no
//! game rules; the domain layer rebuilds aggregates from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GameId, MoveId, PlayerId};

/// Version number for a stored game, used for optimistic concurrency control.
///
/// A game that has never been saved is at version 0; every successful save
/// increments the version by 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Creates a new version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the initial version (0) for a game that was never saved.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the version (1) after the first save.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Stored form of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub player_one_id: Option<PlayerId>,
    pub player_two_id: Option<PlayerId>,

    /// Every placement, in play order.
    pub moves: Vec<MoveRecord>,

    /// Version of the record as last saved.
    #[serde(default)]
    pub version: Version,
}

impl GameRecord {
    /// Creates an empty record for a game without players.
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            player_one_id: None,
            player_two_id: None,
            moves: Vec::new(),
            version: Version::initial(),
        }
    }
}

/// Stored form of a single placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: MoveId,
    pub player_id: PlayerId,
    pub row: i32,
    pub column: i32,

    /// "X" or "O".
    pub mark: String,

    /// Used to rebuild turn order on load.
    pub placed_at: DateTime<Utc>,
}

/// Stored form of a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub email: String,
}
