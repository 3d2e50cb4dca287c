//! Account entity.

use chrono::{DateTime, Utc};
use mastodon_common::EntityId;
use serde::{Deserialize, Serialize};

use super::status::CustomEmoji;
use crate::hydrate::{Hydrate, PayloadReader};

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: EntityId,
    pub username: String,
    pub acct: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub avatar_static: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub header_static: String,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub statuses_count: u64,
    #[serde(default)]
    pub emojis: Vec<CustomEmoji>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Profile metadata field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
}

impl Hydrate for Account {
    fn hydrate(payload: &serde_json::Value) -> Self {
        let r = PayloadReader::new(payload);
        Self {
            id: r.id("id").unwrap_or_default(),
            username: r.string("username"),
            acct: r.string("acct"),
            display_name: r.string("display_name"),
            locked: r.bool("locked"),
            bot: r.bool("bot"),
            created_at: r.timestamp("created_at"),
            note: r.string("note"),
            url: r.string("url"),
            avatar: r.string("avatar"),
            avatar_static: r.string("avatar_static"),
            header: r.string("header"),
            header_static: r.string("header_static"),
            followers_count: r.count("followers_count"),
            following_count: r.count("following_count"),
            statuses_count: r.count("statuses_count"),
            emojis: r.list("emojis"),
            fields: r.list("fields"),
        }
    }
}

impl Hydrate for Field {
    fn hydrate(payload: &serde_json::Value) -> Self {
        let r = PayloadReader::new(payload);
        Self {
            name: r.string("name"),
            value: r.string("value"),
            verified_at: r.timestamp("verified_at"),
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
    fn test_hydrate_account() {
        let account = Account::hydrate(&json!({
            "id": "1",
            "username": "gargron",
            "acct": "Gargron",
            "display_name": "Eugen",
            "bot": false,
            "followers_count": 300,
            "fields": [{ "name": "Patreon", "value": "https://patreon.com/mastodon" }],
            "moved": null,
            "noindex": true
        }));

        assert_eq!(account.id, EntityId::from(1_u64));
        assert_eq!(account.acct, "Gargron");
        assert_eq!(account.followers_count, 300);
        assert_eq!(account.fields.len(), 1);
        assert_eq!(account.fields[0].name, "Patreon");
        assert!(account.created_at.is_none());
    }

    #[test]
    fn test_decode_requires_username() {
        let result = decode::<Account>(json!({ "id": "1", "acct": "a" }));
        assert!(result.is_err());

        let account: Account =
            decode(json!({ "id": "1", "username": "a", "acct": "a@example.com" })).unwrap();
        assert_eq!(account.acct, "a@example.com");
    }
}
