use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Identifier of the user whose avatar the widget manages.
///
/// Supplied by the surrounding session context and injected into the widget
/// at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InternalError(
                "User id must not be empty".to_string(),
            ));
        }

        if trimmed.contains('/') || trimmed.contains('?') || trimmed.contains('#') {
            return Err(DomainError::InternalError(format!(
                "User id contains reserved path characters: {}",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::UserId;

    #[test]
    fn user_id_is_trimmed() {
        assert_eq!(UserId::new(" 42 ").unwrap().as_str(), "42");
    }

    #[test]
    fn user_id_rejects_blank_and_path_segments() {
        assert!(UserId::new("   ").is_err());
        assert!(UserId::new("1/../2").is_err());
    }
}
