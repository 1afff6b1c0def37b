use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares an opaque, string-backed identifier.
///
/// Equality is structural on the wrapped token. Construction never fails:
/// format checks (e.g. UUID shape) belong to the transport layer.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing token.
            pub fn of(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            /// Creates a fresh random identifier (UUID v4 token).
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the wrapped token.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the wrapped token.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(token: String) -> Self {
                Self(token)
            }
        }

        impl From<&str> for $name {
            fn from(token: &str) -> Self {
                Self(token.to_string())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier for a game.
    GameId
);

string_id!(
    /// Unique identifier for a player.
    PlayerId
);

string_id!(
    /// Unique identifier for a single placement on the board.
    MoveId
);
