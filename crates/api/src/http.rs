//! reqwest-backed request executor.

use std::time::Duration;

use async_trait::async_trait;
use mastodon_common::{ClientError, ClientResult, Config};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::{executor::RequestExecutor, params::Params};

/// HTTP executor talking to a single instance.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpExecutor {
    /// Create an executor from configuration.
    pub fn new(config: &Config) -> ClientResult<Self> {
        Self::build(config, Some(Duration::from_secs(config.http.timeout_secs)))
    }

    /// Create an executor with no overall request timeout, for long-lived
    /// streaming responses. The connect timeout still applies.
    pub(crate) fn without_timeout(config: &Config) -> ClientResult<Self> {
        Self::build(config, None)
    }

    fn build(config: &Config, timeout: Option<Duration>) -> ClientResult<Self> {
        let base = Url::parse(&config.instance.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme: {}",
                base.scheme()
            )));
        }

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
            .user_agent(config.http.user_agent.clone());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.instance.base_url.trim_end_matches('/').to_string(),
            access_token: config.instance.access_token.clone(),
        })
    }

    /// Instance root without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request with authentication applied.
    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.client.request(method, url);
        match &self.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn perform(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> ClientResult<Option<Value>> {
        debug!(method = %method, path, params = params.len(), "Making API request");

        let pairs = params.to_pairs();
        let mut req = self.request(method.clone(), path);
        if !pairs.is_empty() {
            req = if method == Method::GET || method == Method::DELETE {
                req.query(&pairs)
            } else {
                req.form(&pairs)
            };
        }

        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(method = %method, path, status = %status, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            debug!(path, status = %status, "API response has no body");
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&body)?))
    }
}
