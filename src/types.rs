//! Core types and data structures for the quote collection

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single quote held in the local collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Identifier, unique within the local collection
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// The quotable content
    pub text: String,
    /// Free-form category label
    pub category: String,
}

impl QuoteRecord {
    /// Create a new quote record
    pub fn new(id: impl Into<String>, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category: category.into(),
        }
    }

    /// Whether text and category both equal the other record's
    pub fn same_content(&self, other: &QuoteRecord) -> bool {
        self.text == other.text && self.category == other.category
    }
}

/// Older stored collections used numeric ids; accept both and keep strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    /// Remote records appended to the local collection
    pub added: usize,
    /// Local records overwritten with remote values
    pub updated: usize,
}

impl SyncSummary {
    /// Whether the pass changed anything
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.updated > 0
    }
}

/// Generic item as returned by the remote collection endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Payload sent to the remote endpoint when a quote is added locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Category selection used when picking a random quote
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every quote matches
    #[default]
    All,
    /// Only quotes with exactly this category match
    Category(String),
}

impl CategoryFilter {
    /// Stored value that selects every category
    pub const ALL: &'static str = "all";

    /// Parse a persisted filter value
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    /// Value persisted for this filter
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL,
            CategoryFilter::Category(category) => category,
        }
    }

    /// Whether a quote passes this filter
    pub fn matches(&self, quote: &QuoteRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => &quote.category == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// Transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }
}

/// Errors that can occur in the quote book
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Remote error: {0}")]
    Remote(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid import: {0}")]
    InvalidImport(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("No quotes to export")]
    NothingToExport,
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for quote book operations
pub type QuoteResult<T> = Result<T, QuoteError>;
