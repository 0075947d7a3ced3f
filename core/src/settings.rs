//! Environment-sourced SDK settings.
//!
//! `Config` and `UreqTransport` never read the environment themselves;
//! `Settings` is the one place that does, and it turns the raw values into
//! those validated pieces.
//!
//! Variables:
//! - `SDK_API_KEY`: API key (default empty)
//! - `SDK_BASE_URI`: base URI (default `https://api.example.com`)
//! - `SDK_SANDBOX`: sandbox mode (default `true`)
//! - `SDK_TIMEOUT`: request timeout in seconds (default 30)

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::ConfigError;
use crate::transport::UreqTransport;

pub const DEFAULT_BASE_URI: &str = "https://api.example.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw SDK settings, before validation into a `Config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub base_uri: String,
    pub sandbox: bool,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_uri: DEFAULT_BASE_URI.to_string(),
            sandbox: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `SDK_SANDBOX` or `SDK_TIMEOUT` is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its
    /// value if set.
    ///
    /// # Errors
    ///
    /// Same as [`Settings::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sandbox = match lookup("SDK_SANDBOX") {
            Some(raw) => parse_bool("SDK_SANDBOX", &raw)?,
            None => defaults.sandbox,
        };

        let timeout = match lookup("SDK_TIMEOUT") {
            Some(raw) => raw.trim().parse().map(Duration::from_secs).map_err(|_| {
                ConfigError::new(format!(
                    "SDK_TIMEOUT must be a whole number of seconds, got {raw:?}"
                ))
            })?,
            None => defaults.timeout,
        };

        Ok(Self {
            api_key: lookup("SDK_API_KEY").unwrap_or(defaults.api_key),
            base_uri: lookup("SDK_BASE_URI").unwrap_or(defaults.base_uri),
            sandbox,
            timeout,
        })
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    #[must_use]
    pub fn with_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = uri.into();
        self
    }

    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate into a client `Config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the base URI is blank.
    pub fn config(&self) -> Result<Config, ConfigError> {
        Config::new(&self.base_uri, self.sandbox)
    }

    /// The default transport, honoring the configured timeout.
    pub fn transport(&self) -> UreqTransport {
        UreqTransport::new(self.timeout)
    }

    /// A client wired with `config()` and `transport()`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the base URI is blank.
    pub fn client(&self) -> Result<ApiClient, ConfigError> {
        Ok(ApiClient::with_transport(self.config()?, self.transport()))
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::new(format!("{key} must be a boolean, got {raw:?}"))),
    }
}
