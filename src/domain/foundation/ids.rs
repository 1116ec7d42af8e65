//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Longest accepted internal key.
const MAX_KEY_LEN: usize = 128;

/// Opaque, stable identifier of an inbound channel identity.
///
/// Chat identities look like `chat:386965305`; email identities carry a
/// digest of the sender address (`email:9f86d081884c7d65...`). The core
/// never interprets the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InternalKey(String);

impl InternalKey {
    /// Creates a key after checking it is non-empty, bounded and free of whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("internal_key"));
        }
        if value.len() > MAX_KEY_LEN {
            return Err(ValidationError::out_of_range(
                "internal_key_length",
                1,
                MAX_KEY_LEN as i64,
                value.len() as i64,
            ));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "internal_key",
                "whitespace is not allowed",
            ));
        }
        Ok(Self(value))
    }

    /// Builds a key of the form `{channel}:{local}`.
    pub fn scoped(channel: &str, local: impl fmt::Display) -> Result<Self, ValidationError> {
        Self::new(format!("{}:{}", channel, local))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InternalKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for InternalKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InternalKey> for String {
    fn from(key: InternalKey) -> Self {
        key.0
    }
}

/// Sequential, human-facing registration number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantNumber(i64);

impl ParticipantNumber {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// The number issued after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ParticipantNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
