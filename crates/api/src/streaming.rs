//! Streaming API connection.
//!
//! Opens a long-lived `text/event-stream` response and forwards decoded
//! messages over a channel. Reconnection is left to the caller: the stream
//! simply ends when the connection does.

use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use mastodon_common::{ClientError, ClientResult, Config, StreamingConfig};
use mastodon_core::RawMessage;
use reqwest::Method;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use crate::{http::HttpExecutor, sse::SseDecoder};

/// Streaming timelines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Timeline {
    /// Home timeline and notifications of the authenticated account.
    User,
    /// Federated public timeline.
    Public,
    /// Local public timeline.
    Local,
    /// Public statuses with a hashtag.
    Hashtag(String),
}

impl Timeline {
    /// Endpoint path for this timeline.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::User => "/api/v1/streaming/user",
            Self::Public => "/api/v1/streaming/public",
            Self::Local => "/api/v1/streaming/public/local",
            Self::Hashtag(_) => "/api/v1/streaming/hashtag",
        }
    }

    /// Query parameters for this timeline.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Hashtag(tag) => vec![("tag", tag.clone())],
            _ => Vec::new(),
        }
    }

    /// Pick the timeline named in configuration.
    pub fn from_config(config: &StreamingConfig) -> ClientResult<Self> {
        match config.timeline.as_str() {
            "user" => Ok(Self::User),
            "public" => Ok(Self::Public),
            "local" => Ok(Self::Local),
            "hashtag" => config
                .hashtag
                .clone()
                .filter(|tag| !tag.is_empty())
                .map(Self::Hashtag)
                .ok_or_else(|| ClientError::Config("hashtag timeline needs a hashtag".into())),
            other => Err(ClientError::Config(format!("unknown timeline: {other}"))),
        }
    }
}

/// Streaming API client.
#[derive(Debug, Clone)]
pub struct StreamingClient {
    http: HttpExecutor,
}

impl StreamingClient {
    /// Create a streaming client from configuration.
    pub fn new(config: &Config) -> ClientResult<Self> {
        Ok(Self {
            http: HttpExecutor::without_timeout(config)?,
        })
    }

    /// Connect to a timeline and return its messages in arrival order.
    pub async fn connect(&self, timeline: &Timeline) -> ClientResult<ReceiverStream<RawMessage>> {
        info!(path = timeline.path(), "Connecting to streaming API");

        let response = self
            .http
            .request(Method::GET, timeline.path())
            .query(&timeline.query())
            .header("Accept", "text/event-stream")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Streaming connection rejected");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let (tx, rx) = mpsc::channel(256);
        tokio::spawn(read_stream(response, tx));

        Ok(ReceiverStream::new(rx))
    }
}

/// Decode the response body into messages until either side goes away.
///
/// A dropped receiver closes the connection right away, even when the server
/// is only sending heartbeats.
async fn read_stream(response: reqwest::Response, tx: mpsc::Sender<RawMessage>) {
    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::new();

    loop {
        let chunk = tokio::select! {
            chunk = body.next() => chunk,
            () = tx.closed() => {
                info!("Stream receiver dropped, closing connection");
                return;
            }
        };
        let Some(chunk) = chunk else {
            break;
        };
        let chunk: Bytes = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!(error = %e, "Streaming connection failed");
                return;
            }
        };

        for message in decoder.push(&chunk) {
            debug!(event = %message.event, "Received stream message");
            if tx.send(message).await.is_err() {
                info!("Stream receiver dropped, closing connection");
                return;
            }
        }
    }

    if let Some(message) = decoder.finish() {
        let _ = tx.send(message).await;
    }
    info!("Streaming connection closed");
}
