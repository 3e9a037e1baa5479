//! Session

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

/// Errors reading or writing a session slot.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A slot value could not be converted to or from JSON.
    #[error("session slot \"{0}\" could not be encoded: {1}")]
    Encoding(String, #[source] serde_json::Error),
}

/// Per-visitor key-value state that survives across requests.
///
/// The host persists the session after a request only when [`Session::is_modified`]
/// reports a change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    data: BTreeMap<String, Value>,

    #[serde(skip)]
    modified: bool,
}

impl Session {
    /// Create an empty, unmodified session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap previously persisted session data.
    #[must_use]
    pub fn from_data(data: BTreeMap<String, Value>) -> Self {
        Self {
            data,
            modified: false,
        }
    }

    /// Decode the value stored in `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored value does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, slot: &str) -> Result<Option<T>, SessionError> {
        self.data
            .get(slot)
            .map(|value| T::deserialize(value))
            .transpose()
            .map_err(|source| SessionError::Encoding(slot.to_string(), source))
    }

    /// Store `value` in `slot` and mark the session modified.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` cannot be encoded as JSON.
    pub fn insert<T: Serialize>(&mut self, slot: &str, value: &T) -> Result<(), SessionError> {
        let value = serde_json::to_value(value)
            .map_err(|source| SessionError::Encoding(slot.to_string(), source))?;

        self.data.insert(slot.to_string(), value);
        self.modified = true;

        Ok(())
    }

    /// Drop `slot` entirely and mark the session modified.
    pub fn remove(&mut self, slot: &str) -> Option<Value> {
        self.modified = true;

        self.data.remove(slot)
    }

    /// Whether `slot` is present.
    #[must_use]
    pub fn contains(&self, slot: &str) -> bool {
        self.data.contains_key(slot)
    }

    /// Flag the session for persistence.
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Whether anything changed since the session was loaded.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Whether the session holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw slot data, for persistence.
    #[must_use]
    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.data
    }
}
