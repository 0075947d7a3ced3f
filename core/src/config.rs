//! Client configuration value.

use crate::error::ConfigError;

/// Immutable configuration owned by an `ApiClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_uri: String,
    sandbox: bool,
}

impl Config {
    /// Validate and build a configuration.
    ///
    /// Trailing slashes are stripped from `base_uri` so endpoint paths can
    /// always start with `/`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `base_uri` is blank.
    pub fn new(base_uri: &str, sandbox: bool) -> Result<Self, ConfigError> {
        if base_uri.trim().is_empty() {
            return Err(ConfigError::new("Base URI cannot be empty"));
        }
        Ok(Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
            sandbox,
        })
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Whether non-production credentials and endpoints are in use.
    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_base_uri_and_sandbox_flag() {
        let config = Config::new("https://api.example.com", true).unwrap();
        assert_eq!(config.base_uri(), "https://api.example.com");
        assert!(config.is_sandbox());
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = Config::new("https://api.example.com///", false).unwrap();
        assert_eq!(config.base_uri(), "https://api.example.com");
        assert!(!config.is_sandbox());
    }

    #[test]
    fn empty_base_uri_is_rejected() {
        let err = Config::new("", true).unwrap_err();
        assert_eq!(err.message(), "Base URI cannot be empty");
    }

    #[test]
    fn whitespace_base_uri_is_rejected() {
        assert!(Config::new("   \t", true).is_err());
    }
}
