//! Request parameter flattening.

use mastodon_common::EntityId;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Scalar value.
    Text(String),
    /// List value, sent as repeated `key[]` pairs.
    List(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<EntityId> for ParamValue {
    fn from(v: EntityId) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<EntityId>> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(|i| i.into().to_string()).collect())
    }
}

/// Ordered key/value request parameters.
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder-style [`Params::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Set `key` only when `value` is present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<ParamValue>>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether `key` is set.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into wire pairs.
    ///
    /// List values are emitted once per element under `key[]`; a key that
    /// already ends in `[]` is used as-is.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                ParamValue::Text(v) => pairs.push((key.clone(), v.clone())),
                ParamValue::List(items) => {
                    let key = if key.ends_with("[]") {
                        key.clone()
                    } else {
                        format!("{key}[]")
                    };
                    pairs.extend(items.iter().map(|v| (key.clone(), v.clone())));
                }
            }
        }
        pairs
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Pagination options for collection endpoints, passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Return results older than this ID.
    pub max_id: Option<EntityId>,
    /// Return results newer than this ID.
    pub since_id: Option<EntityId>,
    /// Maximum number of results.
    pub limit: Option<u32>,
}

impl From<PageOptions> for Params {
    fn from(page: PageOptions) -> Self {
        let mut params = Self::new();
        params.insert_opt("max_id", page.max_id);
        params.insert_opt("since_id", page.since_id);
        params.insert_opt("limit", page.limit);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_list_flattening() {
        let params = Params::new()
            .with("status", "hello")
            .with("media_ids", vec![1_u64, 2]);

        assert_eq!(
            params.to_pairs(),
            vec![
                pair("status", "hello"),
                pair("media_ids[]", "1"),
                pair("media_ids[]", "2"),
            ]
        );
    }

    #[test]
    fn test_suffixed_key_is_not_doubled() {
        let params = Params::new().with("media_ids[]", vec!["9"]);
        assert_eq!(params.to_pairs(), vec![pair("media_ids[]", "9")]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::new().with("a", "1").with("b", "2");
        params.insert("a", "3");
        assert_eq!(params.to_pairs(), vec![pair("a", "3"), pair("b", "2")]);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut params = Params::new().with("a", "1");
        assert_eq!(params.remove("a"), Some(ParamValue::from("1")));
        assert_eq!(params.remove("a"), None);
        assert!(params.is_empty());
    }

    #[test]
    fn test_page_options() {
        let params: Params = PageOptions {
            max_id: Some(EntityId::from(100_u64)),
            since_id: None,
            limit: Some(40),
        }
        .into();

        assert_eq!(params.to_pairs(), vec![pair("max_id", "100"), pair("limit", "40")]);
    }

    #[test]
    fn test_from_iterator() {
        let params: Params = [("limit", "5"), ("max_id", "7")].into_iter().collect();
        assert!(params.contains_key("limit"));
        assert_eq!(params.get("max_id"), Some(&ParamValue::from("7")));
    }
}
