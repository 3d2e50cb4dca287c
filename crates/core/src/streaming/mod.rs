//! Streaming message classification and dispatch.
//!
//! The streaming API delivers `(event, payload)` pairs. [`resolve`] maps one
//! pair onto a typed [`StreamEvent`]; [`dispatch`] drives a whole feed through
//! it in arrival order.

mod dispatch;
mod kind;
mod resolver;

pub use dispatch::{DispatchSummary, dispatch};
pub use kind::MessageKind;
pub use resolver::{RawMessage, StreamEvent, resolve, resolve_message};
