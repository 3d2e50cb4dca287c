//! Common utilities and shared types for mastodon-rs.
//!
//! This crate provides foundational components used across all mastodon-rs crates:
//!
//! - **Configuration**: Client settings via [`Config`]
//! - **Error handling**: Unified error types via [`ClientError`] and [`ClientResult`]
//! - **Identifiers**: Server-assigned IDs via [`EntityId`]
//!
//! # Example
//!
//! ```no_run
//! use mastodon_common::{ClientResult, Config, EntityId};
//!
//! fn example() -> ClientResult<()> {
//!     let config = Config::load()?;
//!     let id = EntityId::from(42_u64);
//!     println!("{} -> {}", config.instance.base_url, id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::{Config, DecodeMode, HttpConfig, InstanceConfig, StreamingConfig};
pub use error::{ClientError, ClientResult};
pub use id::EntityId;
