//! Registry of known streaming message kinds.

use std::fmt;

/// A streaming message kind known to this client.
///
/// This enum is the tag registry: it is fixed at compile time and is the only
/// place that maps wire tags to kinds. Adding a kind means adding a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// `update`: a status was created or appeared on the timeline.
    Update,
    /// `notification`: a notification for the authenticated account.
    Notification,
    /// `delete`: a status was deleted.
    Delete,
}

impl MessageKind {
    /// Every registered kind.
    pub const ALL: [Self; 3] = [Self::Update, Self::Notification, Self::Delete];

    /// Look up a wire tag. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "update" => Some(Self::Update),
            "notification" => Some(Self::Notification),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Wire tag of this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Notification => "notification",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
