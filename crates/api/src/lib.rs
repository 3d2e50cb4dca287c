//! REST and streaming client layer for mastodon-rs.
//!
//! This crate provides:
//!
//! - **Client**: typed resource actions via [`Client`]
//! - **Executor**: the [`RequestExecutor`] seam and its reqwest implementation
//! - **Params**: key/value request flattening via [`Params`]
//! - **Streaming**: Server-Sent Events connection via [`StreamingClient`]

pub mod client;
pub mod collection;
pub mod executor;
pub mod http;
pub mod params;
pub mod sse;
pub mod statuses;
pub mod streaming;

pub use client::Client;
pub use collection::Collection;
pub use executor::RequestExecutor;
pub use http::HttpExecutor;
pub use params::{PageOptions, ParamValue, Params};
pub use reqwest::Method;
pub use sse::SseDecoder;
pub use statuses::StatusParams;
pub use streaming::{StreamingClient, Timeline};
