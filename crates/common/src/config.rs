//! Client configuration.

use serde::Deserialize;
use std::path::Path;

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Instance configuration.
    pub instance: InstanceConfig,
    /// HTTP client configuration.
    #[serde(default)]
    pub http: HttpConfig,
    /// Streaming configuration.
    #[serde(default)]
    pub streaming: StreamingConfig,
}

/// Instance configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceConfig {
    /// Base URL of the instance, e.g. `https://mastodon.social`.
    pub base_url: String,
    /// Access token sent verbatim as a bearer token.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// How response bodies are turned into entities.
    #[serde(default)]
    pub decoding: DecodeMode,
}

/// Response decoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Best-effort hydration; missing or mistyped fields become defaults.
    #[default]
    Lenient,
    /// Schema decode; missing required fields are an error.
    Strict,
}

/// Streaming configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamingConfig {
    /// Timeline to follow: `user`, `public`, `local` or `hashtag`.
    #[serde(default = "default_timeline")]
    pub timeline: String,
    /// Hashtag to follow when `timeline` is `hashtag`.
    #[serde(default)]
    pub hashtag: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
            decoding: DecodeMode::default(),
        }
    }
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            timeline: default_timeline(),
            hashtag: None,
        }
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("mastodon-rs/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeline() -> String {
    "user".to_string()
}

impl Config {
    /// Create a configuration for the given instance with default settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            instance: InstanceConfig {
                base_url: base_url.into(),
                access_token: None,
            },
            http: HttpConfig::default(),
            streaming: StreamingConfig::default(),
        }
    }

    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `MASTODON_ENV`)
    /// 4. Environment variables with `MASTODON_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();
        let env = std::env::var("MASTODON_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MASTODON")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("MASTODON")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
