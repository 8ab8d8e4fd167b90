//! The owned, insertion-ordered quote collection

use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::traits::*;
use crate::types::*;
use crate::utils::generate_local_id;

const SEED_QUOTES: [(&str, &str); 5] = [
    (
        "The only way to do great work is to love what you do.",
        "Inspiration",
    ),
    ("Believe you can and you're halfway there.", "Motivation"),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Dreams",
    ),
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Resilience",
    ),
    (
        "It is during our darkest moments that we must focus to see the light.",
        "Hope",
    ),
];

/// Quote collection held by a single orchestrating context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteCollection {
    quotes: Vec<QuoteRecord>,
}

impl QuoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection built from the first-run seed data
    pub fn seeded() -> Self {
        let quotes = SEED_QUOTES
            .iter()
            .map(|(text, category)| QuoteRecord::new(generate_local_id(), *text, *category))
            .collect();
        Self { quotes }
    }

    /// Load a previously saved collection, `None` if nothing is stored
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> QuoteResult<Option<Self>> {
        match store.get(key)? {
            Some(content) => {
                let quotes: Vec<QuoteRecord> = serde_json::from_str(&content)?;
                debug!(count = quotes.len(), "Loaded stored quotes");
                Ok(Some(Self { quotes }))
            }
            None => Ok(None),
        }
    }

    /// Load the stored collection, or seed and persist one on first run
    pub fn load_or_seed<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) -> QuoteResult<Self> {
        if let Some(collection) = Self::load(store, key)? {
            return Ok(collection);
        }

        let collection = Self::seeded();
        collection.save(store, key)?;
        info!(count = collection.len(), "Seeded quote collection");
        Ok(collection)
    }

    /// Persist the collection under `key`
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S, key: &str) -> QuoteResult<()> {
        let content = serde_json::to_string(&self.quotes)?;
        store.set(key, &content)
    }

    pub fn push(&mut self, quote: QuoteRecord) {
        self.quotes.push(quote);
    }

    pub fn extend<I: IntoIterator<Item = QuoteRecord>>(&mut self, quotes: I) {
        self.quotes.extend(quotes);
    }

    /// Drop everything past the first `len` quotes
    pub fn truncate(&mut self, len: usize) {
        self.quotes.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuoteRecord> {
        self.quotes.iter()
    }

    pub fn as_slice(&self) -> &[QuoteRecord] {
        &self.quotes
    }

    /// Mutable access to the underlying sequence, as the reconciliation engine needs
    pub fn records_mut(&mut self) -> &mut Vec<QuoteRecord> {
        &mut self.quotes
    }

    /// Find a quote by id
    pub fn get(&self, id: &str) -> Option<&QuoteRecord> {
        self.quotes.iter().find(|quote| quote.id == id)
    }

    /// Unique categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for quote in &self.quotes {
            if !categories.contains(&quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }

    /// Quotes passing the filter, in collection order
    pub fn filtered<'a, 'f>(
        &'a self,
        filter: &'f CategoryFilter,
    ) -> impl Iterator<Item = &'a QuoteRecord> + 'f
    where
        'a: 'f,
    {
        self.quotes.iter().filter(move |quote| filter.matches(quote))
    }

    /// A uniformly random quote among those passing the filter
    pub fn random_quote(&self, filter: &CategoryFilter) -> Option<&QuoteRecord> {
        let candidates: Vec<&QuoteRecord> = self.filtered(filter).collect();
        candidates.choose(&mut rand::thread_rng()).copied()
    }
}

impl From<Vec<QuoteRecord>> for QuoteCollection {
    fn from(quotes: Vec<QuoteRecord>) -> Self {
        Self { quotes }
    }
}

impl<'a> IntoIterator for &'a QuoteCollection {
    type Item = &'a QuoteRecord;
    type IntoIter = std::slice::Iter<'a, QuoteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{is_local_id, MemoryStore};

    #[test]
    fn test_first_run_seeds_and_persists() {
        let mut store = MemoryStore::new();

        let collection = QuoteCollection::load_or_seed(&mut store, "quotes").unwrap();

        assert_eq!(collection.len(), 5);
        assert!(collection.iter().all(|quote| is_local_id(&quote.id)));
        assert!(store.get("quotes").unwrap().is_some());
    }

    #[test]
    fn test_stored_collection_is_preferred() {
        let mut store = MemoryStore::with_entries([(
            "quotes",
            r#"[{"id":"server-1","text":"T","category":"G"}]"#,
        )]);

        let collection = QuoteCollection::load_or_seed(&mut store, "quotes").unwrap();

        assert_eq!(collection.as_slice(), &[QuoteRecord::new("server-1", "T", "G")]);
    }

    #[test]
    fn test_malformed_stored_collection_is_an_error() {
        let store = MemoryStore::with_entries([("quotes", "not json")]);
        assert!(matches!(
            QuoteCollection::load(&store, "quotes"),
            Err(QuoteError::Json(_))
        ));
    }

    #[test]
    fn test_categories_are_unique_in_first_seen_order() {
        let collection = QuoteCollection::from(vec![
            QuoteRecord::new("1", "a", "Hope"),
            QuoteRecord::new("2", "b", "Dreams"),
            QuoteRecord::new("3", "c", "Hope"),
        ]);
        assert_eq!(collection.categories(), vec!["Hope", "Dreams"]);
    }

    #[test]
    fn test_random_quote_respects_filter() {
        let collection = QuoteCollection::from(vec![
            QuoteRecord::new("1", "a", "Hope"),
            QuoteRecord::new("2", "b", "Dreams"),
        ]);
        let filter = CategoryFilter::Category("Dreams".to_string());

        for _ in 0..20 {
            assert_eq!(collection.random_quote(&filter).unwrap().id, "2");
        }
        assert!(collection
            .random_quote(&CategoryFilter::Category("Missing".to_string()))
            .is_none());
    }

    #[test]
    fn test_random_quote_draws_from_filtered() {
        let collection = QuoteCollection::from(vec![
            QuoteRecord::new("1", "a", "Hope"),
            QuoteRecord::new("2", "b", "Dreams"),
            QuoteRecord::new("3", "c", "Hope"),
        ]);
        let filter = CategoryFilter::Category("Hope".to_string());
        let allowed: Vec<&str> = collection.filtered(&filter).map(|q| q.id.as_str()).collect();
        assert_eq!(allowed, vec!["1", "3"]);

        for _ in 0..20 {
            let picked = collection.random_quote(&filter).unwrap();
            assert!(allowed.contains(&picked.id.as_str()));
        }
    }
}
