pub mod error;
pub mod event;
pub mod memory;
pub mod record;
pub mod store;

pub use common::{GameId, MoveId, PlayerId};
pub use error::{Result, StoreError};
pub use event::{EventEnvelope, EventEnvelopeBuilder, EventId};
pub use memory::{InMemoryEventBus, InMemoryGameStore, InMemoryPlayerStore};
pub use record::{GameRecord, MoveRecord, PlayerRecord, Version};
pub use store::{EventBus, GameStore, PlayerStore};
