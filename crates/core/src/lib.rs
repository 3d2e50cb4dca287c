//! Core domain logic for mastodon-rs.
//!
//! - [`entities`]: statuses, accounts, notifications and deletion markers
//! - [`hydrate`]: lenient and strict construction from untyped payloads
//! - [`streaming`]: classification of streaming messages into [`StreamEvent`]s

pub mod entities;
pub mod hydrate;
pub mod streaming;

pub use entities::{Account, DeletedStatus, Notification, NotificationType, Status, Visibility};
pub use hydrate::{Hydrate, PayloadReader, decode};
pub use streaming::{
    DispatchSummary, MessageKind, RawMessage, StreamEvent, dispatch, resolve, resolve_message,
};
