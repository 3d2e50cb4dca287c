//! Server-assigned identifiers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// Identifier of a remote entity (status, account, notification, ...).
///
/// Servers send IDs as decimal strings, but older servers and the streaming
/// `delete` event may carry a bare number. Both forms compare equal:
/// `EntityId::from(42_u64)` == `EntityId::from("42")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an ID from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the ID as an integer, if it is numeric.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// Build an ID from a scalar JSON value.
    ///
    /// Returns `None` for objects, arrays, booleans, null, and empty strings.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| de::Error::custom(format!("expected string or integer id, got {value}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_forms_are_equal() {
        assert_eq!(EntityId::from(42_u64), EntityId::from("42"));
        assert_eq!(EntityId::from(42_u64).as_u64(), Some(42));
    }

    #[test]
    fn test_from_json_rejects_non_scalars() {
        assert_eq!(EntityId::from_json(&json!(7)), Some(EntityId::from(7_u64)));
        assert_eq!(EntityId::from_json(&json!("109")), Some(EntityId::from(109_u64)));
        assert!(EntityId::from_json(&json!({"id": 1})).is_none());
        assert!(EntityId::from_json(&json!([1])).is_none());
        assert!(EntityId::from_json(&json!(null)).is_none());
        assert!(EntityId::from_json(&json!("")).is_none());
    }

    #[test]
    fn test_deserialize() {
        let id: EntityId = serde_json::from_value(json!(123)).unwrap();
        assert_eq!(id.as_str(), "123");

        let err = serde_json::from_value::<EntityId>(json!(true));
        assert!(err.is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&EntityId::from(5_u64)).unwrap();
        assert_eq!(json, "\"5\"");
    }
}
