//! Status (post) entity.

use chrono::{DateTime, Utc};
use mastodon_common::EntityId;
use serde::{Deserialize, Serialize};

use super::account::Account;
use crate::hydrate::{Hydrate, PayloadReader};

/// A status (toot).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: EntityId,
    pub uri: String,
    pub created_at: DateTime<Utc>,
    pub account: Account,
    pub content: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub in_reply_to_id: Option<EntityId>,
    #[serde(default)]
    pub in_reply_to_account_id: Option<EntityId>,
    #[serde(default)]
    pub reblog: Option<Box<Status>>,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub spoiler_text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub replies_count: u64,
    #[serde(default)]
    pub reblogs_count: u64,
    #[serde(default)]
    pub favourites_count: u64,
    /// Only present when the request was authenticated.
    #[serde(default)]
    pub reblogged: Option<bool>,
    /// Only present when the request was authenticated.
    #[serde(default)]
    pub favourited: Option<bool>,
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachment>,
    #[serde(default)]
    pub mentions: Vec<Mention>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub emojis: Vec<CustomEmoji>,
}

/// Status visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
    Direct,
    /// A visibility level this client does not know about.
    #[serde(other)]
    Unknown,
}

impl Visibility {
    /// Wire name of this visibility.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlisted => "unlisted",
            Self::Private => "private",
            Self::Direct => "direct",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a wire name; unrecognized names map to [`Visibility::Unknown`].
    #[must_use]
    pub fn from_wire(s: &str) -> Self {
        match s {
            "public" => Self::Public,
            "unlisted" => Self::Unlisted,
            "private" => Self::Private,
            "direct" => Self::Direct,
            _ => Self::Unknown,
        }
    }
}

/// Media attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub remote_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub blurhash: Option<String>,
}

/// Mention in status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub id: EntityId,
    pub username: String,
    pub acct: String,
    #[serde(default)]
    pub url: String,
}

/// Hashtag in status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Custom emoji.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEmoji {
    pub shortcode: String,
    pub url: String,
    #[serde(default)]
    pub static_url: String,
    #[serde(default)]
    pub visible_in_picker: bool,
}

impl Status {
    /// Whether this status is a reblog wrapper around another status.
    #[must_use]
    pub const fn is_reblog(&self) -> bool {
        self.reblog.is_some()
    }
}

impl Hydrate for Status {
    fn hydrate(payload: &serde_json::Value) -> Self {
        let r = PayloadReader::new(payload);
        Self {
            id: r.id("id").unwrap_or_default(),
            uri: r.string("uri"),
            created_at: r.timestamp("created_at").unwrap_or_default(),
            account: r.entity("account").unwrap_or_default(),
            content: r.string("content"),
            visibility: r
                .opt_string("visibility")
                .map(|v| Visibility::from_wire(&v))
                .unwrap_or_default(),
            url: r.opt_string("url"),
            in_reply_to_id: r.id("in_reply_to_id"),
            in_reply_to_account_id: r.id("in_reply_to_account_id"),
            reblog: r.entity::<Self>("reblog").map(Box::new),
            sensitive: r.bool("sensitive"),
            spoiler_text: r.string("spoiler_text"),
            language: r.opt_string("language"),
            replies_count: r.count("replies_count"),
            reblogs_count: r.count("reblogs_count"),
            favourites_count: r.count("favourites_count"),
            reblogged: r.opt_bool("reblogged"),
            favourited: r.opt_bool("favourited"),
            media_attachments: r.list("media_attachments"),
            mentions: r.list("mentions"),
            tags: r.list("tags"),
            emojis: r.list("emojis"),
        }
    }
}

impl Hydrate for MediaAttachment {
    fn hydrate(payload: &serde_json::Value) -> Self {
        let r = PayloadReader::new(payload);
        Self {
            id: r.id("id").unwrap_or_default(),
            media_type: r.string("type"),
            url: r.string("url"),
            preview_url: r.opt_string("preview_url"),
            remote_url: r.opt_string("remote_url"),
            description: r.opt_string("description"),
            blurhash: r.opt_string("blurhash"),
        }
    }
}

impl Hydrate for Mention {
    fn hydrate(payload: &serde_json::Value) -> Self {
        let r = PayloadReader::new(payload);
        Self {
            id: r.id("id").unwrap_or_default(),
            username: r.string("username"),
            acct: r.string("acct"),
            url: r.string("url"),
        }
    }
}

impl Hydrate for Tag {
    fn hydrate(payload: &serde_json::Value) -> Self {
        let r = PayloadReader::new(payload);
        Self {
            name: r.string("name"),
            url: r.string("url"),
        }
    }
}

impl Hydrate for CustomEmoji {
    fn hydrate(payload: &serde_json::Value) -> Self {
        let r = PayloadReader::new(payload);
        Self {
            shortcode: r.string("shortcode"),
            url: r.string("url"),
            static_url: r.string("static_url"),
            visible_in_picker: r.bool("visible_in_picker"),
        }
    }
}
