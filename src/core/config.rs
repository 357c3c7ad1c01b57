//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and a `.env` file, if present) on top of defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use crate::domains::exa::DEFAULT_BASE_URL;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Exa API client configuration.
    pub exa: ExaConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Exa API key, read from `EXA_API_KEY`.
    pub exa_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "exa_api_key",
                &self.exa_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CredentialsConfig {
    /// Return the Exa API key or a configuration error if it is missing.
    pub fn require_exa_api_key(&self) -> Result<&str> {
        self.exa_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::config(
                    "EXA_API_KEY environment variable is required \
                     (get a key at https://dashboard.exa.ai/api-keys)",
                )
            })
    }
}

/// Exa API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExaConfig {
    /// Base URL of the Exa API.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ExaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "exa-search-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            exa: ExaConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first.
    /// Recognized variables: `EXA_API_KEY`, `EXA_BASE_URL`, `PORT`,
    /// `MCP_SERVER_NAME`, `MCP_LOG_LEVEL` and the `MCP_TRANSPORT` /
    /// `MCP_HTTP_*` family.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        // Absence is only checked once we know we are not in listing mode.
        config.credentials.exa_api_key = std::env::var("EXA_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Ok(base_url) = std::env::var("EXA_BASE_URL") {
            config.exa.base_url = base_url;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("EXA_API_KEY", "test_key_12345");
        }
        let config = Config::from_env();
        assert_eq!(
            config.credentials.exa_api_key.as_deref(),
            Some("test_key_12345")
        );
        unsafe {
            std::env::remove_var("EXA_API_KEY");
        }
    }

    #[test]
    fn test_blank_key_is_treated_as_missing() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("EXA_API_KEY", "   ");
        }
        let config = Config::from_env();
        assert!(config.credentials.exa_api_key.is_none());
        unsafe {
            std::env::remove_var("EXA_API_KEY");
        }
    }

    #[test]
    fn test_base_url_override() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("EXA_BASE_URL", "http://localhost:9999");
        }
        let config = Config::from_env();
        assert_eq!(config.exa.base_url, "http://localhost:9999");
        unsafe {
            std::env::remove_var("EXA_BASE_URL");
        }
    }

    #[test]
    fn test_require_exa_api_key() {
        let missing = CredentialsConfig::default();
        let err = missing.require_exa_api_key().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("EXA_API_KEY"));

        let present = CredentialsConfig {
            exa_api_key: Some("abc".to_string()),
        };
        assert_eq!(present.require_exa_api_key().unwrap(), "abc");
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            exa_api_key: Some("super_secret_key".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_config_default_has_no_credentials() {
        let config = Config::default();
        assert!(config.credentials.exa_api_key.is_none());
        assert_eq!(config.exa.base_url, "https://api.exa.ai");
    }
}
