//! Identifier value types shared by every layer of the game service.

pub mod types;

pub use types::{GameId, MoveId, PlayerId};
