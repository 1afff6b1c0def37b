//! Player aggregate and related types.

mod aggregate;
mod commands;
mod email;
mod events;

pub use aggregate::Player;
pub use commands::NewPlayer;
pub use email::Email;
pub use events::{NewPlayerCreatedData, PlayerEvent};

use thiserror::Error;

/// Errors that can occur in player operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("Invalid email address")]
    InvalidEmail { email: String },
}
