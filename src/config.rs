//! Client configuration.
//!
//! A [`GapConfig`] can be read from a JSON file or assembled from the environment.
//! Fields fall back to environment variables, then to hardcoded defaults.
//!
//! ```json
//! {
//!   "token": "$GAP_TOKEN",
//!   "base_url": "https://api.gap.im/",
//!   "timeout_secs": 30,
//!   "actions": ["typing"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use gap_types::config::LiteralOrEnv;

/// Configuration for a [`GapClient`](crate::GapClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapConfig {
    /// Bot token, literal or `$VAR`. Client construction fails when absent.
    #[serde(default)]
    pub token: Option<LiteralOrEnv<String>>,
    #[serde(default = "config_defaults::default_base_url")]
    pub base_url: Url,
    /// Per-request timeout in seconds. No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Chat actions accepted by `send_action`.
    #[serde(default = "config_defaults::default_actions")]
    pub actions: Vec<String>,
}

impl Default for GapConfig {
    fn default() -> Self {
        GapConfig {
            token: None,
            base_url: config_defaults::default_base_url(),
            timeout_secs: None,
            actions: config_defaults::default_actions(),
        }
    }
}

pub mod config_defaults {
    use std::env;
    use url::Url;

    pub const DEFAULT_BASE_URL: &str = "https://api.gap.im/";

    /// Returns the default base URL with fallback: $GAP_BASE_URL env var -> "https://api.gap.im/"
    ///
    /// Used when a config file omits `base_url`. An unparsable `$GAP_BASE_URL` is
    /// skipped here; [`GapConfig::from_env`](super::GapConfig::from_env) rejects it instead.
    pub fn default_base_url() -> Url {
        base_url_from(|name| env::var(name).ok())
    }

    pub(crate) fn base_url_from(get: impl Fn(&str) -> Option<String>) -> Url {
        get("GAP_BASE_URL")
            .and_then(|s| Url::parse(&s).ok())
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default base url"))
    }

    pub fn default_actions() -> Vec<String> {
        gap_types::DEFAULT_ACTIONS
            .iter()
            .map(|action| action.to_string())
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("Invalid base URL {0}: {1}")]
    InvalidUrl(String, url::ParseError),
    #[error("Invalid timeout {0}: expected a whole number of seconds")]
    InvalidTimeout(String),
}

impl GapConfig {
    /// Config carrying only a literal token; everything else is defaulted.
    pub fn with_token(token: impl Into<String>) -> Self {
        GapConfig {
            token: Some(LiteralOrEnv::from_literal(token.into())),
            ..GapConfig::default()
        }
    }

    /// Builds the config from `GAP_TOKEN`, `GAP_BASE_URL` and `GAP_TIMEOUT_SECS`.
    ///
    /// A `.env` file in the working directory, if any, is loaded first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from variables returned by `get`.
    ///
    /// A blank token counts as absent. A set but unparsable base URL or timeout
    /// is an error.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = get("GAP_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .map(LiteralOrEnv::from_literal);
        let base_url = match get("GAP_BASE_URL") {
            Some(raw) => Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(raw, e))?,
            None => config_defaults::base_url_from(|_| None),
        };
        let timeout_secs = match get("GAP_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            ),
            None => None,
        };

        Ok(GapConfig {
            token,
            base_url,
            timeout_secs,
            actions: config_defaults::default_actions(),
        })
    }

    /// Loads the config from a JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
        let config: GapConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
