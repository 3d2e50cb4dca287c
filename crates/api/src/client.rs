//! API client and response conversion.

use mastodon_common::{ClientError, ClientResult, Config, DecodeMode};
use mastodon_core::Hydrate;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{collection::Collection, executor::RequestExecutor, http::HttpExecutor, params::Params};

/// Build an API path from segments, percent-encoding each one.
///
/// A segment can never introduce another path component or a query, so an
/// identifier like `1/favourite` stays a single segment (`1%2Ffavourite`).
/// Empty and dot segments are rejected.
pub(crate) fn api_path(segments: &[&str]) -> ClientResult<String> {
    if let Some(bad) = segments
        .iter()
        .find(|segment| matches!(**segment, "" | "." | ".."))
    {
        return Err(ClientError::InvalidUrl(format!(
            "invalid path segment: {bad:?}"
        )));
    }

    let mut url = Url::parse("http://localhost/")?;
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl("cannot build request path".into()))?
        .clear()
        .extend(segments);
    Ok(url.path().to_owned())
}

/// Mastodon REST client.
///
/// Generic over the [`RequestExecutor`] so the transport can be replaced.
#[derive(Debug, Clone)]
pub struct Client<E = HttpExecutor> {
    executor: E,
    decoding: DecodeMode,
}

impl Client<HttpExecutor> {
    /// Create a client backed by [`HttpExecutor`].
    pub fn new(config: &Config) -> ClientResult<Self> {
        Ok(Self {
            executor: HttpExecutor::new(config)?,
            decoding: config.http.decoding,
        })
    }
}

impl<E: RequestExecutor> Client<E> {
    /// Create a client with a custom executor.
    #[must_use]
    pub const fn with_executor(executor: E, decoding: DecodeMode) -> Self {
        Self { executor, decoding }
    }

    /// The underlying executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Response decoding mode.
    #[must_use]
    pub const fn decoding(&self) -> DecodeMode {
        self.decoding
    }

    pub(crate) async fn perform_request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> ClientResult<Option<Value>> {
        self.executor.perform(method, path, params).await
    }

    pub(crate) async fn perform_request_with_object<T>(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> ClientResult<T>
    where
        T: Hydrate + DeserializeOwned,
    {
        let body = self
            .perform_request(method, path, params)
            .await?
            .unwrap_or(Value::Null);
        self.to_object(body)
    }

    pub(crate) async fn perform_request_with_collection<T>(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> ClientResult<Collection<T>>
    where
        T: Hydrate + DeserializeOwned,
    {
        let body = self
            .perform_request(method, path, params)
            .await?
            .unwrap_or(Value::Null);
        self.to_collection(body)
    }

    fn to_object<T>(&self, body: Value) -> ClientResult<T>
    where
        T: Hydrate + DeserializeOwned,
    {
        match self.decoding {
            DecodeMode::Lenient => Ok(T::hydrate(&body)),
            DecodeMode::Strict => Ok(mastodon_core::decode(body)?),
        }
    }

    fn to_collection<T>(&self, body: Value) -> ClientResult<Collection<T>>
    where
        T: Hydrate + DeserializeOwned,
    {
        match self.decoding {
            DecodeMode::Lenient => {
                let Value::Array(items) = body else {
                    debug!("Collection response is not an array, treating as empty");
                    return Ok(Collection::default());
                };
                Ok(items
                    .iter()
                    .filter(|item| item.is_object())
                    .map(T::hydrate)
                    .collect())
            }
            DecodeMode::Strict => Ok(Collection::new(mastodon_core::decode(body)?)),
        }
    }
}
