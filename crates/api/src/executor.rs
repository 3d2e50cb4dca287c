//! Request execution seam.
//!
//! The resource layer builds requests; a [`RequestExecutor`] sends them and
//! hands back the decoded JSON body.

use async_trait::async_trait;
use mastodon_common::ClientResult;
use reqwest::Method;
use serde_json::Value;

use crate::params::Params;

/// Sends one request and returns its JSON body.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Perform `method` on `path` (relative to the instance root).
    ///
    /// Returns `Ok(None)` when the server answered without a body.
    async fn perform(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> ClientResult<Option<Value>>;
}
