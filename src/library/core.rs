//! Main quote book orchestrator that coordinates storage, view and remote

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::QuoteBookConfig;
use crate::library::transfer::{self, ImportSummary};
use crate::library::QuoteCollection;
use crate::reconciliation::ReconciliationEngine;
use crate::remote::normalize_remote_items;
use crate::traits::*;
use crate::types::*;
use crate::utils::generate_local_id;

const EMPTY_CATEGORY_MESSAGE: &str = "No quotes available for this category. Try adding some!";

/// Quote book: the single owner of the collection and its capabilities
///
/// `P` is the persistent store, `S` the session-scoped store.
pub struct QuoteBook<P: KeyValueStore, S: KeyValueStore> {
    config: QuoteBookConfig,
    quotes: QuoteCollection,
    filter: CategoryFilter,
    store: P,
    session: S,
    remote: Arc<dyn RemoteSource>,
    view: Box<dyn QuoteView>,
    validator: Box<dyn QuoteValidator>,
    engine: ReconciliationEngine,
}

impl<P: KeyValueStore, S: KeyValueStore> QuoteBook<P, S> {
    /// Open the quote book: load or seed the collection, restore the filter
    /// and display a first quote.
    pub fn open(
        config: QuoteBookConfig,
        store: P,
        session: S,
        remote: Arc<dyn RemoteSource>,
        view: Box<dyn QuoteView>,
    ) -> QuoteResult<Self> {
        Self::with_validator(
            config,
            store,
            session,
            remote,
            view,
            Box::new(DefaultQuoteValidator),
        )
    }

    /// Open the quote book with a custom validator for added quotes
    pub fn with_validator(
        config: QuoteBookConfig,
        mut store: P,
        session: S,
        remote: Arc<dyn RemoteSource>,
        view: Box<dyn QuoteView>,
        validator: Box<dyn QuoteValidator>,
    ) -> QuoteResult<Self> {
        config.validate()?;
        let quotes = QuoteCollection::load_or_seed(&mut store, &config.keys.quotes)?;

        let mut book = Self {
            config,
            quotes,
            filter: CategoryFilter::All,
            store,
            session,
            remote,
            view,
            validator,
            engine: ReconciliationEngine::new(),
        };

        book.populate_categories()?;
        book.show_random_quote()?;
        Ok(book)
    }

    pub fn config(&self) -> &QuoteBookConfig {
        &self.config
    }

    pub fn quotes(&self) -> &QuoteCollection {
        &self.quotes
    }

    pub fn selected_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Handle to the remote source, for drivers that fetch without holding the book
    pub fn remote(&self) -> Arc<dyn RemoteSource> {
        Arc::clone(&self.remote)
    }

    /// Persistent store backing this book
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Session store backing this book
    pub fn session(&self) -> &S {
        &self.session
    }

    fn save(&mut self) -> QuoteResult<()> {
        self.quotes.save(&mut self.store, &self.config.keys.quotes)
    }

    /// Add a user-submitted quote, then sync.
    ///
    /// The quote is kept locally even if posting it to the remote or the
    /// follow-up sync fails. If it cannot be persisted it is not kept at all.
    pub async fn add_quote(&mut self, text: &str, category: &str) -> QuoteResult<QuoteRecord> {
        let quote = QuoteRecord::new(generate_local_id(), text.trim(), category.trim());

        if let Err(e) = self.validator.validate_quote(&quote) {
            self.view.notify(Notice::warning(format!(
                "Please enter both a quote and a category. {}",
                e
            )));
            return Err(e);
        }

        let previous_len = self.quotes.len();
        self.quotes.push(quote.clone());
        if let Err(e) = self.save() {
            self.quotes.truncate(previous_len);
            error!(error = %e, "Saving added quote failed");
            self.view
                .notify(Notice::error(format!("Quote could not be saved: {}", e)));
            return Err(e);
        }
        info!(id = %quote.id, category = %quote.category, "Added quote");

        let remote = Arc::clone(&self.remote);
        match remote.post_item(&RemotePost::from_quote(&quote)).await {
            Ok(_) => self.view.notify(Notice::success(
                "Quote added and server post successful! Will attempt to sync.",
            )),
            Err(e) => {
                warn!(error = %e, "Posting quote to remote failed");
                self.view.notify(Notice::warning(format!(
                    "Quote added locally, but server post failed: {}",
                    e
                )));
            }
        }

        self.populate_categories()?;
        self.show_random_quote()?;
        self.follow_up_sync().await;
        Ok(quote)
    }

    /// Sync after a local change; a failure is already reported to the user
    /// and does not undo the change.
    async fn follow_up_sync(&mut self) {
        if let Err(e) = self.sync().await {
            warn!(error = %e, "Follow-up sync failed");
        }
    }

    /// Display a random quote from the current filter and remember it for the session
    pub fn show_random_quote(&mut self) -> QuoteResult<Option<QuoteRecord>> {
        let picked = self.quotes.random_quote(&self.filter).cloned();
        let keys = &self.config.keys;

        match &picked {
            Some(quote) => {
                self.view.show_quote(quote);
                self.session.set(&keys.last_viewed_quote, &quote.text)?;
                self.session.set(&keys.last_viewed_category, &quote.category)?;
            }
            None => {
                self.view.show_empty(EMPTY_CATEGORY_MESSAGE);
                self.session.remove(&keys.last_viewed_quote)?;
                self.session.remove(&keys.last_viewed_category)?;
            }
        }

        self.refresh_last_viewed()?;
        Ok(picked)
    }

    /// Text and category of the last quote displayed in this session
    pub fn last_viewed(&self) -> QuoteResult<Option<(String, String)>> {
        let keys = &self.config.keys;
        let text = self.session.get(&keys.last_viewed_quote)?;
        let category = self.session.get(&keys.last_viewed_category)?;

        Ok(match (text, category) {
            (Some(text), Some(category)) if !text.is_empty() && !category.is_empty() => {
                Some((text, category))
            }
            _ => None,
        })
    }

    fn refresh_last_viewed(&mut self) -> QuoteResult<()> {
        let last = self.last_viewed()?;
        self.view
            .show_last_viewed(last.as_ref().map(|(t, c)| (t.as_str(), c.as_str())));
        Ok(())
    }

    /// Offer the current categories and restore the persisted filter when it
    /// still names a known category.
    pub fn populate_categories(&mut self) -> QuoteResult<()> {
        let categories = self.quotes.categories();
        let stored = self.store.get(&self.config.keys.selected_category)?;

        self.filter = match stored.map(|value| CategoryFilter::parse(&value)) {
            Some(CategoryFilter::Category(category)) if categories.contains(&category) => {
                CategoryFilter::Category(category)
            }
            _ => CategoryFilter::All,
        };

        self.view.set_categories(&categories, &self.filter);
        Ok(())
    }

    /// Select a filter, persist it and display a matching quote
    pub fn filter_quotes(&mut self, filter: CategoryFilter) -> QuoteResult<Option<QuoteRecord>> {
        self.store
            .set(&self.config.keys.selected_category, filter.as_str())?;
        self.filter = filter;
        self.show_random_quote()
    }

    /// Export the collection as pretty-printed JSON
    pub fn export_quotes(&mut self) -> QuoteResult<String> {
        match transfer::export_json(self.quotes.as_slice()) {
            Ok(json) => {
                self.view.notify(Notice::success(format!(
                    "Quotes exported successfully as {}!",
                    transfer::EXPORT_FILE_NAME
                )));
                Ok(json)
            }
            Err(QuoteError::NothingToExport) => {
                self.view.notify(Notice::info("No quotes to export!"));
                Err(QuoteError::NothingToExport)
            }
            Err(e) => {
                self.view
                    .notify(Notice::error(format!("Export failed: {}", e)));
                Err(e)
            }
        }
    }

    /// Import quotes from a JSON document, then sync. Rejected documents
    /// leave the collection untouched.
    pub async fn import_quotes(&mut self, content: &str) -> QuoteResult<ImportSummary> {
        let imported = match transfer::parse_import(content) {
            Ok(imported) => imported,
            Err(e) => {
                let message = match &e {
                    QuoteError::Json(parse) => format!("Error parsing JSON file: {}", parse),
                    _ => format!("Invalid JSON file format. {}", e),
                };
                warn!(error = %e, "Rejected import");
                self.view.notify(Notice::error(message));
                return Err(e);
            }
        };

        let previous_len = self.quotes.len();
        let summary = transfer::merge_imported(&mut self.quotes, imported);
        if let Err(e) = self.save() {
            self.quotes.truncate(previous_len);
            error!(error = %e, "Saving imported quotes failed");
            self.view
                .notify(Notice::error(format!("Imported quotes could not be saved: {}", e)));
            return Err(e);
        }
        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "Imported quotes"
        );

        let mut message = format!(
            "{} quotes imported successfully! Will attempt to sync.",
            summary.imported
        );
        if summary.skipped > 0 {
            message.push_str(&format!(" {} skipped with duplicate ids.", summary.skipped));
        }
        self.view.notify(Notice::success(message));

        self.populate_categories()?;
        self.show_random_quote()?;
        self.follow_up_sync().await;
        Ok(summary)
    }

    /// Fetch the remote collection and merge it into the local one
    pub async fn sync(&mut self) -> QuoteResult<SyncSummary> {
        self.announce_sync();
        let remote = Arc::clone(&self.remote);
        let fetched = remote.fetch_items().await;
        self.apply_remote(fetched)
    }

    /// Tell the user a sync pass is starting
    pub fn announce_sync(&mut self) {
        self.view.notify(Notice::info("Syncing with server..."));
    }

    /// Merge the outcome of a remote fetch.
    ///
    /// A failed fetch is reported and leaves local state unchanged.
    pub fn apply_remote(
        &mut self,
        fetched: QuoteResult<Vec<RemoteItem>>,
    ) -> QuoteResult<SyncSummary> {
        let items = match fetched {
            Ok(items) => items,
            Err(e) => {
                error!(error = %e, "Sync failed");
                self.view.notify(Notice::error(format!(
                    "Sync failed: {}. Please check your internet connection.",
                    e
                )));
                return Err(e);
            }
        };

        let incoming = normalize_remote_items(
            items,
            self.config.fetch_limit,
            &self.config.default_category,
        );
        let summary = self.engine.reconcile(self.quotes.records_mut(), incoming);

        self.save()?;
        self.populate_categories()?;
        self.show_random_quote()?;

        info!(
            added = summary.added,
            updated = summary.updated,
            "Sync completed"
        );

        let notice = if summary.has_changes() {
            let mut message = format!(
                "Sync completed. {} new quotes, {} updated.",
                summary.added, summary.updated
            );
            if summary.updated > 0 {
                message.push_str(&format!(
                    " ({} conflicts resolved - server precedence).",
                    summary.updated
                ));
            }
            Notice::success(message)
        } else {
            Notice::info("Sync completed. No new quotes or updates.")
        };
        self.view.notify(notice);

        Ok(summary)
    }
}
