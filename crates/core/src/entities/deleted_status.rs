//! Deletion marker for a status that no longer exists.

use mastodon_common::EntityId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::hydrate::{Hydrate, PayloadReader};

/// A deleted status. Only the identifier survives deletion.
///
/// On the wire the `delete` event carries a bare identifier, but a mapping
/// with an `id` field is accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DeletedStatus {
    /// `None` when the payload carried no usable identifier.
    pub id: Option<EntityId>,
}

impl DeletedStatus {
    /// Create a marker for the given status.
    #[must_use]
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}

impl Hydrate for DeletedStatus {
    fn hydrate(payload: &serde_json::Value) -> Self {
        let id = if payload.is_object() {
            PayloadReader::new(payload).id("id")
        } else {
            EntityId::from_json(payload)
        };
        Self { id }
    }
}

impl<'de> Deserialize<'de> for DeletedStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Bare(EntityId),
            Object { id: EntityId },
        }

        let (Wire::Bare(id) | Wire::Object { id }) = Wire::deserialize(deserializer)?;
        Ok(Self { id: Some(id) })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::hydrate::decode;
    use serde_json::json;

    #[test]
    fn test_hydrate_bare_identifier() {
        assert_eq!(
            DeletedStatus::hydrate(&json!("103270115826048975")),
            DeletedStatus::new("103270115826048975")
        );
        assert_eq!(DeletedStatus::hydrate(&json!(42)), DeletedStatus::new(42_u64));
    }

    #[test]
    fn test_hydrate_mapping() {
        assert_eq!(
            DeletedStatus::hydrate(&json!({ "id": 42 })),
            DeletedStatus::new(42_u64)
        );
    }

    #[test]
    fn test_hydrate_unusable_identifier() {
        assert_eq!(DeletedStatus::hydrate(&json!({ "id": [1, 2] })).id, None);
        assert_eq!(DeletedStatus::hydrate(&json!({})).id, None);
        assert_eq!(DeletedStatus::hydrate(&json!(null)).id, None);
    }

    #[test]
    fn test_decode_requires_identifier() {
        let deleted: DeletedStatus = decode(json!("7")).unwrap();
        assert_eq!(deleted, DeletedStatus::new(7_u64));
        assert!(decode::<DeletedStatus>(json!({})).is_err());
    }
}
