//! In-memory storage implementation for testing

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory key-value store for testing and development
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what the quote book persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new memory store instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> QuoteResult<()> {
        self.entries
            .write()
            .map_err(|e| QuoteError::Storage(e.to_string()))?
            .clear();
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> QuoteResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| QuoteError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> QuoteResult<()> {
        self.entries
            .write()
            .map_err(|e| QuoteError::Storage(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> QuoteResult<()> {
        self.entries
            .write()
            .map_err(|e| QuoteError::Storage(e.to_string()))?
            .remove(key);
        Ok(())
    }
}
