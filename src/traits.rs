//! Traits for host capabilities and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Key-value storage abstraction provided by the host
///
/// The same shape serves both the persistent store (quote collection and
/// selected filter) and the session-scoped store (last viewed quote).
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under a key
    fn get(&self, key: &str) -> QuoteResult<Option<String>>;

    /// Store a value under a key, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> QuoteResult<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> QuoteResult<()>;
}

/// Remote collection endpoint
///
/// Implementations own the transport. Any network error, non-success status
/// or malformed payload is reported as `QuoteError::Remote` or
/// `QuoteError::Json`.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the full remote collection
    async fn fetch_items(&self) -> QuoteResult<Vec<RemoteItem>>;

    /// Submit a new item, returning the item as echoed by the remote
    async fn post_item(&self, post: &RemotePost) -> QuoteResult<RemoteItem>;
}

/// Rendering surface for quotes and notices
pub trait QuoteView: Send {
    /// Display a quote
    fn show_quote(&mut self, quote: &QuoteRecord);

    /// Display the empty state when no quote matches the filter
    fn show_empty(&mut self, message: &str);

    /// Display the last viewed quote of this session, if any
    fn show_last_viewed(&mut self, last: Option<(&str, &str)>);

    /// Replace the category options and mark the selected one
    fn set_categories(&mut self, categories: &[String], selected: &CategoryFilter);

    /// Show a transient notice
    fn notify(&mut self, notice: Notice);
}

/// Trait for implementing custom quote validation rules
pub trait QuoteValidator: Send + Sync {
    /// Validate a quote before it is added locally
    fn validate_quote(&self, quote: &QuoteRecord) -> QuoteResult<()>;
}

/// Default quote validator: text and category must be non-empty
pub struct DefaultQuoteValidator;

impl QuoteValidator for DefaultQuoteValidator {
    fn validate_quote(&self, quote: &QuoteRecord) -> QuoteResult<()> {
        if quote.text.trim().is_empty() {
            return Err(QuoteError::Validation(
                "Quote text cannot be empty".to_string(),
            ));
        }

        if quote.category.trim().is_empty() {
            return Err(QuoteError::Validation(
                "Quote category cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
