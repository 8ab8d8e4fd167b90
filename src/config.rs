//! Quote book configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::*;

fn default_sync_interval_secs() -> u64 {
    10
}

fn default_fetch_limit() -> usize {
    10
}

fn default_category() -> String {
    "General".to_string()
}

/// Storage keys used in the persistent and session stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageKeys {
    /// Persistent key holding the serialized collection
    pub quotes: String,
    /// Persistent key holding the last selected category filter
    pub selected_category: String,
    /// Session key holding the text of the last displayed quote
    pub last_viewed_quote: String,
    /// Session key holding the category of the last displayed quote
    pub last_viewed_category: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            quotes: "quotes".to_string(),
            selected_category: "lastSelectedCategory".to_string(),
            last_viewed_quote: "lastViewedQuote".to_string(),
            last_viewed_category: "lastViewedCategory".to_string(),
        }
    }
}

/// Quote book configuration.
///
/// Transport settings such as the remote URL belong to the `RemoteSource`
/// implementation, not to the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBookConfig {
    /// Seconds between periodic sync passes
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,
    /// Number of remote items taken from the head of each fetch
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    /// Category used for remote items whose body yields no token
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default)]
    pub keys: StorageKeys,
}

impl Default for QuoteBookConfig {
    fn default() -> Self {
        Self {
            sync_interval_secs: default_sync_interval_secs(),
            fetch_limit: default_fetch_limit(),
            default_category: default_category(),
            keys: StorageKeys::default(),
        }
    }
}

impl QuoteBookConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json_str(content: &str) -> QuoteResult<Self> {
        let config: QuoteBookConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Interval between periodic sync passes
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    pub fn validate(&self) -> QuoteResult<()> {
        if self.sync_interval_secs == 0 {
            return Err(QuoteError::Config(
                "sync interval must be at least one second".to_string(),
            ));
        }

        if self.default_category.trim().is_empty() {
            return Err(QuoteError::Config(
                "default category cannot be empty".to_string(),
            ));
        }

        let keys = [
            &self.keys.quotes,
            &self.keys.selected_category,
            &self.keys.last_viewed_quote,
            &self.keys.last_viewed_category,
        ];
        if keys.iter().any(|key| key.trim().is_empty()) {
            return Err(QuoteError::Config("storage keys cannot be empty".to_string()));
        }

        Ok(())
    }
}
