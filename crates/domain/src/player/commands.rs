//! Player commands.

use serde::{Deserialize, Serialize};

/// Command to register a player.
///
/// The address is validated when the player is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayer {
    pub email: String,
}

impl NewPlayer {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
