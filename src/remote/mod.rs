//! Mapping between remote items and local quote records

use crate::types::*;

/// Prefix applied to identifiers of remotely sourced quotes
pub const REMOTE_ID_PREFIX: &str = "server-";

/// User id attached to every outbound post
pub const REMOTE_USER_ID: u64 = 1;

impl RemoteItem {
    /// Local identifier derived from the remote identifier
    pub fn local_id(&self) -> String {
        format!("{}{}", REMOTE_ID_PREFIX, self.id)
    }

    /// Map into the local id-space: title becomes the text and the body up
    /// to its first space becomes the category. Only the space character
    /// separates; a body starting with a space falls back to
    /// `default_category`.
    pub fn into_quote_record(self, default_category: &str) -> QuoteRecord {
        let category = self
            .body
            .split(' ')
            .next()
            .filter(|word| !word.is_empty())
            .unwrap_or(default_category)
            .to_string();

        QuoteRecord {
            id: self.local_id(),
            text: self.title,
            category,
        }
    }
}

impl RemotePost {
    /// Build the outbound payload for a locally added quote
    pub fn from_quote(quote: &QuoteRecord) -> Self {
        Self {
            title: quote.text.clone(),
            body: quote.category.clone(),
            user_id: REMOTE_USER_ID,
        }
    }
}

/// Take the first `limit` remote items and map them into quote records
pub fn normalize_remote_items(
    items: Vec<RemoteItem>,
    limit: usize,
    default_category: &str,
) -> Vec<QuoteRecord> {
    items
        .into_iter()
        .take(limit)
        .map(|item| item.into_quote_record(default_category))
        .collect()
}

/// Parse a raw remote payload (a JSON array of items)
pub fn parse_remote_payload(payload: &str) -> QuoteResult<Vec<RemoteItem>> {
    Ok(serde_json::from_str(payload)?)
}
