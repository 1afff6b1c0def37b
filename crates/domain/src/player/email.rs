//! E-mail address value object.

use serde::{Deserialize, Serialize};

use super::PlayerError;

/// A syntactically valid, trimmed e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parses an address.
    ///
    /// Surrounding whitespace is dropped. The address needs exactly one `@`,
    /// a non-empty local part and a dotted domain without empty labels.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, PlayerError> {
        let trimmed = value.as_ref().trim();

        let invalid = || PlayerError::InvalidEmail {
            email: trimmed.to_string(),
        };

        let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') || local.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let mut labels = domain.split('.');
        let valid_domain = domain.contains('.')
            && labels.all(|label| {
                !label.is_empty() && label.chars().all(|c| c.is_alphanumeric() || c == '-')
            });
        if !valid_domain {
            return Err(invalid());
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = PlayerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
