//! Best-effort hydration of entities from untyped payloads.
//!
//! Two decoding paths exist side by side:
//!
//! - [`Hydrate::hydrate`] never fails. Extra fields are ignored; missing fields
//!   and fields with an incompatible shape become the field's default.
//! - [`decode`] is the serde schema decode. Required fields must be present and
//!   well-typed.

use chrono::{DateTime, Utc};
use mastodon_common::EntityId;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Lenient construction from an untyped payload.
pub trait Hydrate: Sized {
    /// Build `Self` from `payload`, defaulting anything absent or malformed.
    fn hydrate(payload: &Value) -> Self;
}

/// Strict schema decode.
pub fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload)
}

/// Typed, lenient field accessors over a payload mapping.
///
/// A payload that is not an object reads as an empty mapping.
#[derive(Debug, Clone, Copy)]
pub struct PayloadReader<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> PayloadReader<'a> {
    /// Wrap a payload.
    #[must_use]
    pub fn new(payload: &'a Value) -> Self {
        Self {
            fields: payload.as_object(),
        }
    }

    /// Raw field value, treating JSON `null` as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields?.get(key).filter(|v| !v.is_null())
    }

    /// Scalar identifier field.
    #[must_use]
    pub fn id(&self, key: &str) -> Option<EntityId> {
        self.get(key).and_then(EntityId::from_json)
    }

    /// String field, `None` when absent or not a string.
    #[must_use]
    pub fn opt_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(String::from)
    }

    /// String field, empty when absent or not a string.
    #[must_use]
    pub fn string(&self, key: &str) -> String {
        self.opt_string(key).unwrap_or_default()
    }

    /// Boolean field, `false` when absent or not a boolean.
    #[must_use]
    pub fn bool(&self, key: &str) -> bool {
        self.opt_bool(key).unwrap_or_default()
    }

    /// Boolean field, `None` when absent or not a boolean.
    #[must_use]
    pub fn opt_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Non-negative counter, `0` when absent or not an unsigned integer.
    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        self.get(key).and_then(Value::as_u64).unwrap_or_default()
    }

    /// RFC 3339 timestamp, `None` when absent or unparseable.
    #[must_use]
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Nested entity, `None` when absent.
    #[must_use]
    pub fn entity<T: Hydrate>(&self, key: &str) -> Option<T> {
        self.get(key).filter(|v| v.is_object()).map(T::hydrate)
    }

    /// List of nested entities, empty when absent or not an array.
    /// Elements that are not objects are skipped.
    #[must_use]
    pub fn list<T: Hydrate>(&self, key: &str) -> Vec<T> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|v| v.is_object())
                    .map(T::hydrate)
                    .collect()
            })
            .unwrap_or_default()
    }
}
