//! Domain entities returned by the REST API and carried by stream events.
//!
//! Every entity supports both decoding paths described in [`crate::hydrate`].

#![allow(missing_docs)]

pub mod account;
pub mod deleted_status;
pub mod notification;
pub mod status;

pub use account::{Account, Field};
pub use deleted_status::DeletedStatus;
pub use notification::{Notification, NotificationType};
pub use status::{CustomEmoji, MediaAttachment, Mention, Status, Tag, Visibility};
