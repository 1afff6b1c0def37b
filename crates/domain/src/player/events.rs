//! Player domain events.

use chrono::{DateTime, Utc};
use common::PlayerId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

/// Events recorded by the player aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PlayerEvent {
    /// A player registered.
    NewPlayerCreated(NewPlayerCreatedData),
}

impl DomainEvent for PlayerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PlayerEvent::NewPlayerCreated(_) => "NewPlayerCreated",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PlayerEvent::NewPlayerCreated(data) => data.timestamp,
        }
    }
}

/// Data for NewPlayerCreated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlayerCreatedData {
    pub player_id: PlayerId,
    pub timestamp: DateTime<Utc>,
}

impl PlayerEvent {
    /// Creates a NewPlayerCreated event.
    pub fn new_player_created(player_id: PlayerId) -> Self {
        PlayerEvent::NewPlayerCreated(NewPlayerCreatedData {
            player_id,
            timestamp: Utc::now(),
        })
    }
}
