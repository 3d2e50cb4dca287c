//! Feed-level dispatch loop.

use std::pin::pin;

use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use super::resolver::{RawMessage, StreamEvent, resolve_message};

/// Counts collected over one [`dispatch`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Messages whose tag was found in the registry.
    pub recognized: u64,
    /// Messages with an unregistered tag.
    pub unrecognized: u64,
}

impl DispatchSummary {
    /// Total messages handed to the handler.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.recognized + self.unrecognized
    }
}

/// Resolve every message from `source` in arrival order and pass it to `handler`.
///
/// Unrecognized tags are handed on as [`StreamEvent::Unrecognized`] and never
/// end the loop. Returns when `source` is exhausted; dropping the future
/// cancels dispatch.
pub async fn dispatch<S, F>(source: S, mut handler: F) -> DispatchSummary
where
    S: Stream<Item = RawMessage>,
    F: FnMut(StreamEvent),
{
    let mut source = pin!(source);
    let mut summary = DispatchSummary::default();

    while let Some(message) = source.next().await {
        let event = resolve_message(message);
        match &event {
            StreamEvent::Unrecognized { tag } => {
                debug!(tag = %tag, "Ignoring unrecognized stream event");
                summary.unrecognized += 1;
            }
            known => {
                trace!(kind = ?known.kind(), "Dispatching stream event");
                summary.recognized += 1;
            }
        }
        handler(event);
    }

    summary
}
