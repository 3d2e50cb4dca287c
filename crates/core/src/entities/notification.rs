//! Notification entity.

use chrono::{DateTime, Utc};
use mastodon_common::EntityId;
use serde::{Deserialize, Serialize};

use super::{account::Account, status::Status};
use crate::hydrate::{Hydrate, PayloadReader};

/// A notification about activity involving the authenticated account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub created_at: DateTime<Utc>,
    pub account: Account,
    /// The status involved, absent for follow-style notifications.
    #[serde(default)]
    pub status: Option<Status>,
}

/// Notification type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Mention,
    Status,
    Reblog,
    Follow,
    FollowRequest,
    Favourite,
    Poll,
    Update,
    /// A notification type this client does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl NotificationType {
    /// Parse a wire name; unrecognized names map to [`NotificationType::Unknown`].
    #[must_use]
    pub fn from_wire(s: &str) -> Self {
        match s {
            "mention" => Self::Mention,
            "status" => Self::Status,
            "reblog" => Self::Reblog,
            "follow" => Self::Follow,
            "follow_request" => Self::FollowRequest,
            "favourite" => Self::Favourite,
            "poll" => Self::Poll,
            "update" => Self::Update,
            _ => Self::Unknown,
        }
    }
}

impl Hydrate for Notification {
    fn hydrate(payload: &serde_json::Value) -> Self {
        let r = PayloadReader::new(payload);
        Self {
            id: r.id("id").unwrap_or_default(),
            notification_type: r
                .opt_string("type")
                .map(|t| NotificationType::from_wire(&t))
                .unwrap_or_default(),
            created_at: r.timestamp("created_at").unwrap_or_default(),
            account: r.entity("account").unwrap_or_default(),
            status: r.entity("status"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::hydrate::decode;
    use serde_json::json;

    #[test]
    fn test_hydrate_favourite_notification() {
        let notification = Notification::hydrate(&json!({
            "id": "34975861",
            "type": "favourite",
            "created_at": "2019-11-23T07:49:02.064Z",
            "account": { "id": "971724", "username": "zsc", "acct": "zsc" },
            "status": { "id": "103186126728896492", "content": "<p>hi</p>" }
        }));

        assert_eq!(notification.notification_type, NotificationType::Favourite);
        assert_eq!(notification.account.username, "zsc");
        assert_eq!(
            notification.status.map(|s| s.content),
            Some("<p>hi</p>".to_string())
        );
    }

    #[test]
    fn test_hydrate_follow_has_no_status() {
        let notification = Notification::hydrate(&json!({ "id": 1, "type": "follow" }));
        assert_eq!(notification.notification_type, NotificationType::Follow);
        assert!(notification.status.is_none());
    }

    #[test]
    fn test_unknown_type_is_tolerated() {
        let notification = Notification::hydrate(&json!({ "type": "admin.sign_up" }));
        assert_eq!(notification.notification_type, NotificationType::Unknown);

        let decoded: Notification = decode(json!({
            "id": "1",
            "type": "admin.sign_up",
            "created_at": "2019-11-23T07:49:02.064Z",
            "account": { "id": "2", "username": "u", "acct": "u" }
        }))
        .unwrap();
        assert_eq!(decoded.notification_type, NotificationType::Unknown);
    }
}
