//! Player aggregate implementation.

use common::PlayerId;

use crate::aggregate::{AggregateRoot, EventLog};

use super::{Email, PlayerEvent};

/// Player aggregate root.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    email: Email,
    events: EventLog<PlayerEvent>,
}

impl Player {
    /// Registers a player and records `NewPlayerCreated`.
    pub fn new(id: PlayerId, email: Email) -> Self {
        let mut player = Self::reconstruct(id.clone(), email);
        player.record(PlayerEvent::new_player_created(id));
        player
    }

    /// Rehydrates a player from storage. Records no events.
    pub fn reconstruct(id: PlayerId, email: Email) -> Self {
        Self {
            id,
            email,
            events: EventLog::new(),
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}

impl AggregateRoot for Player {
    type Event = PlayerEvent;

    fn aggregate_type() -> &'static str {
        "Player"
    }

    fn aggregate_id(&self) -> &str {
        self.id.as_str()
    }

    fn event_log(&self) -> &EventLog<PlayerEvent> {
        &self.events
    }

    fn event_log_mut(&mut self) -> &mut EventLog<PlayerEvent> {
        &mut self.events
    }
}
