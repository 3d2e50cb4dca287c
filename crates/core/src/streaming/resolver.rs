//! Stateless tag/payload resolution.

use serde::Serialize;
use serde_json::Value;

use super::kind::MessageKind;
use crate::entities::{DeletedStatus, Notification, Status};
use crate::hydrate::Hydrate;

/// One message as delivered by the streaming transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    /// Event tag, e.g. `update`.
    pub event: String,
    /// Payload, already parsed from the wire encoding.
    pub payload: Value,
}

impl RawMessage {
    /// Create a raw message.
    #[must_use]
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

/// A resolved streaming message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum StreamEvent {
    /// New or updated status.
    Update(Status),
    /// New notification.
    Notification(Notification),
    /// Deleted status.
    Delete(DeletedStatus),
    /// A tag not in the registry. Not an error: servers add new kinds over time.
    Unrecognized {
        /// The tag as received.
        tag: String,
    },
}

impl StreamEvent {
    /// Kind of this event, `None` when unrecognized.
    #[must_use]
    pub const fn kind(&self) -> Option<MessageKind> {
        match self {
            Self::Update(_) => Some(MessageKind::Update),
            Self::Notification(_) => Some(MessageKind::Notification),
            Self::Delete(_) => Some(MessageKind::Delete),
            Self::Unrecognized { .. } => None,
        }
    }

    /// Whether the tag was found in the registry.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        self.kind().is_some()
    }
}

/// Classify one message and hydrate its entity.
///
/// Pure: no I/O, no logging, no shared state. Unknown tags resolve to
/// [`StreamEvent::Unrecognized`]; payloads for known tags are hydrated
/// leniently and never cause a failure.
#[must_use]
pub fn resolve(tag: &str, payload: Value) -> StreamEvent {
    classify(tag, &payload)
}

/// [`resolve`] taking ownership of a transport message, so an unrecognized
/// tag is moved into the event instead of copied.
#[must_use]
pub fn resolve_message(message: RawMessage) -> StreamEvent {
    classify(message.event, &message.payload)
}

fn classify<T>(tag: T, payload: &Value) -> StreamEvent
where
    T: AsRef<str> + Into<String>,
{
    match MessageKind::from_tag(tag.as_ref()) {
        Some(kind) => hydrate(kind, payload),
        None => StreamEvent::Unrecognized { tag: tag.into() },
    }
}

fn hydrate(kind: MessageKind, payload: &Value) -> StreamEvent {
    match kind {
        MessageKind::Update => StreamEvent::Update(Status::hydrate(payload)),
        MessageKind::Notification => StreamEvent::Notification(Notification::hydrate(payload)),
        MessageKind::Delete => StreamEvent::Delete(DeletedStatus::hydrate(payload)),
    }
}
