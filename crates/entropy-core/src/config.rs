//! Configuration management for the Entropy bot.
//!
//! Loads configuration from ${ENTROPY_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Telegram bot configuration, consumed only by the transport crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token for the Telegram API.
    pub bot_token: Option<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quote-service identifier of the asset (e.g. "starknet").
    pub asset_symbol: String,

    /// Display ticker used in message text (e.g. "STARK").
    pub asset_ticker: String,

    /// Fiat currency for price quotes.
    pub quote_currency: String,

    /// Base URL of the price quote service.
    pub oracle_base_url: String,

    /// Base URL of the QR image service.
    pub qr_base_url: String,

    /// Timeout for external HTTP calls in seconds (0 disables).
    pub request_timeout_secs: u32,

    /// Telegram transport configuration.
    #[serde(default)]
    pub telegram: TelegramConfig,
}

impl Config {
    const DEFAULT_ASSET_SYMBOL: &str = "starknet";
    const DEFAULT_ASSET_TICKER: &str = "STARK";
    const DEFAULT_QUOTE_CURRENCY: &str = "usd";
    const DEFAULT_ORACLE_BASE_URL: &str = "https://api.coingecko.com";
    const DEFAULT_QR_BASE_URL: &str = "https://api.qrserver.com";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 10;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Per-call timeout for external HTTP requests. Zero disables.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_symbol: Self::DEFAULT_ASSET_SYMBOL.to_string(),
            asset_ticker: Self::DEFAULT_ASSET_TICKER.to_string(),
            quote_currency: Self::DEFAULT_QUOTE_CURRENCY.to_string(),
            oracle_base_url: Self::DEFAULT_ORACLE_BASE_URL.to_string(),
            qr_base_url: Self::DEFAULT_QR_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            telegram: TelegramConfig::default(),
        }
    }
}

pub mod paths {
    //! Path resolution for Entropy configuration.
    //!
    //! ENTROPY_HOME resolution order:
    //! 1. ENTROPY_HOME environment variable (if set)
    //! 2. ~/.config/entropy (default)

    use std::path::PathBuf;

    /// Returns the Entropy home directory.
    pub fn entropy_home() -> PathBuf {
        if let Ok(home) = std::env::var("ENTROPY_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("entropy"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        entropy_home().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.asset_symbol, "starknet");
        assert_eq!(config.quote_currency, "usd");
        assert_eq!(config.request_timeout_secs, 10);
        assert!(config.telegram.bot_token.is_none());
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "asset_symbol = \"ethereum\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.asset_symbol, "ethereum");
        assert_eq!(config.oracle_base_url, "https://api.coingecko.com");
    }

    /// Config loading: telegram table parsed from file.
    #[test]
    fn test_load_telegram_table() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[telegram]\nbot_token = \"123:abc\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
    }

    /// Timeout: zero disables timeout.
    #[test]
    fn test_request_timeout_zero_disables() {
        let config = Config {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), None);
    }

    /// Timeout: non-zero maps to seconds.
    #[test]
    fn test_request_timeout_seconds() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
    }
}
