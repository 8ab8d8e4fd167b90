//! In-memory remote source for testing and offline use

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

#[derive(Debug, Default)]
struct RemoteState {
    items: Vec<RemoteItem>,
    posted: Vec<RemotePost>,
    failure: Option<String>,
    fetch_count: usize,
}

/// Remote source backed by an in-memory item list
///
/// A failure message can be injected; while set, every call fails with
/// `QuoteError::Remote`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    state: Arc<RwLock<RemoteState>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a remote serving the given items
    pub fn with_items(items: Vec<RemoteItem>) -> Self {
        let remote = Self::new();
        remote.set_items(items);
        remote
    }

    /// Replace the served items
    pub fn set_items(&self, items: Vec<RemoteItem>) {
        if let Ok(mut state) = self.state.write() {
            state.items = items;
        }
    }

    /// Make subsequent calls fail with `message`, or succeed again with `None`
    pub fn set_failure(&self, message: Option<&str>) {
        if let Ok(mut state) = self.state.write() {
            state.failure = message.map(str::to_string);
        }
    }

    /// Posts received so far
    pub fn posted(&self) -> Vec<RemotePost> {
        self.state
            .read()
            .map(|state| state.posted.clone())
            .unwrap_or_default()
    }

    /// Number of fetch attempts, including failed ones
    pub fn fetch_count(&self) -> usize {
        self.state.read().map(|state| state.fetch_count).unwrap_or(0)
    }
}

#[async_trait]
impl RemoteSource for MemoryRemote {
    async fn fetch_items(&self) -> QuoteResult<Vec<RemoteItem>> {
        let mut state = self
            .state
            .write()
            .map_err(|e| QuoteError::Remote(e.to_string()))?;
        state.fetch_count += 1;

        match &state.failure {
            Some(message) => Err(QuoteError::Remote(message.clone())),
            None => Ok(state.items.clone()),
        }
    }

    async fn post_item(&self, post: &RemotePost) -> QuoteResult<RemoteItem> {
        let mut state = self
            .state
            .write()
            .map_err(|e| QuoteError::Remote(e.to_string()))?;

        if let Some(message) = &state.failure {
            return Err(QuoteError::Remote(message.clone()));
        }

        state.posted.push(post.clone());
        // The echoed id follows the served items, as a typical mock endpoint does
        let id = (state.items.len() + state.posted.len()) as u64;

        Ok(RemoteItem {
            id,
            title: post.title.clone(),
            body: post.body.clone(),
        })
    }
}
