//! Reconciliation of the local quote collection against the remote one
//!
//! Records are joined on `id`. For a matching id the remote text and category
//! always win; remote ids missing locally are appended; local-only records are
//! never touched. There is no timestamp or version comparison.

use std::collections::HashMap;

use tracing::debug;

use crate::types::*;

/// Merges a remote collection into the local collection
#[derive(Debug, Clone, Copy)]
pub struct ReconciliationEngine;

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Merge `remote` into `local` in place and report what changed.
    ///
    /// Remote ids must already be in the local id-space. This never fails;
    /// when the fetch fails the caller simply does not invoke it.
    ///
    /// A remote id repeated within one fetch is appended once. Its first copy
    /// counts as added and each later copy that differs counts as updated, so
    /// for such input `added + updated` can exceed the number of distinct ids
    /// while the collection keeps one record per id.
    pub fn reconcile<I>(&self, local: &mut Vec<QuoteRecord>, remote: I) -> SyncSummary
    where
        I: IntoIterator<Item = QuoteRecord>,
    {
        // Later duplicates overwrite earlier ones, so the last local record wins.
        let mut index: HashMap<String, usize> = local
            .iter()
            .enumerate()
            .map(|(position, quote)| (quote.id.clone(), position))
            .collect();

        let mut summary = SyncSummary::default();

        for incoming in remote {
            match index.get(&incoming.id).copied() {
                Some(position) => {
                    let existing = &mut local[position];
                    if !existing.same_content(&incoming) {
                        existing.text = incoming.text;
                        existing.category = incoming.category;
                        summary.updated += 1;
                    }
                }
                None => {
                    index.insert(incoming.id.clone(), local.len());
                    local.push(incoming);
                    summary.added += 1;
                }
            }
        }

        debug!(
            added = summary.added,
            updated = summary.updated,
            total = local.len(),
            "Reconciled local quotes with remote"
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, text: &str, category: &str) -> QuoteRecord {
        QuoteRecord::new(id, text, category)
    }

    #[test]
    fn test_remote_wins_on_conflict() {
        let engine = ReconciliationEngine::new();
        let mut local = vec![quote("a", "X", "C1")];

        let summary = engine.reconcile(&mut local, vec![quote("a", "Y", "C1")]);

        assert_eq!(local, vec![quote("a", "Y", "C1")]);
        assert_eq!(summary, SyncSummary { added: 0, updated: 1 });
    }

    #[test]
    fn test_new_remote_record_is_appended() {
        let engine = ReconciliationEngine::new();
        let mut local = Vec::new();

        let summary = engine.reconcile(&mut local, vec![quote("s1", "T", "G")]);

        assert_eq!(local, vec![quote("s1", "T", "G")]);
        assert_eq!(summary, SyncSummary { added: 1, updated: 0 });
    }

    #[test]
    fn test_empty_remote_leaves_local_untouched() {
        let engine = ReconciliationEngine::new();
        let mut local = vec![quote("local-1", "Mine", "C")];

        let summary = engine.reconcile(&mut local, Vec::new());

        assert_eq!(local, vec![quote("local-1", "Mine", "C")]);
        assert!(!summary.has_changes());
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let engine = ReconciliationEngine::new();
        let mut local = vec![
            quote("local-1", "Mine", "C"),
            quote("server-1", "Old", "Old"),
        ];
        let remote = vec![
            quote("server-1", "New", "Fresh"),
            quote("server-2", "Other", "Fresh"),
        ];

        let first = engine.reconcile(&mut local, remote.clone());
        assert_eq!(first, SyncSummary { added: 1, updated: 1 });
        let snapshot = local.clone();

        let second = engine.reconcile(&mut local, remote);
        assert_eq!(second, SyncSummary::default());
        assert_eq!(local, snapshot);
    }

    #[test]
    fn test_category_only_change_counts_as_update() {
        let engine = ReconciliationEngine::new();
        let mut local = vec![quote("server-3", "Same", "Before")];

        let summary = engine.reconcile(&mut local, vec![quote("server-3", "Same", "After")]);

        assert_eq!(summary.updated, 1);
        assert_eq!(local[0].category, "After");
    }

    #[test]
    fn test_local_order_is_preserved() {
        let engine = ReconciliationEngine::new();
        let mut local = vec![quote("b", "B", "C"), quote("a", "A", "C")];

        engine.reconcile(
            &mut local,
            vec![quote("c", "C", "C"), quote("a", "A2", "C")],
        );

        let ids: Vec<&str> = local.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_local_ids_resolve_to_last() {
        let engine = ReconciliationEngine::new();
        let mut local = vec![quote("a", "first", "C"), quote("a", "second", "C")];

        let summary = engine.reconcile(&mut local, vec![quote("a", "remote", "C")]);

        assert_eq!(summary.updated, 1);
        assert_eq!(local[0].text, "first");
        assert_eq!(local[1].text, "remote");
    }

    #[test]
    fn test_repeated_remote_id_folds_into_first_copy() {
        let engine = ReconciliationEngine::new();
        let mut local = Vec::new();

        let summary = engine.reconcile(
            &mut local,
            vec![quote("s1", "one", "G"), quote("s1", "two", "G")],
        );

        // One record per id; the later copy is counted as an update of the first.
        assert_eq!(local, vec![quote("s1", "two", "G")]);
        assert_eq!(summary, SyncSummary { added: 1, updated: 1 });

        let again = engine.reconcile(
            &mut local,
            vec![quote("s1", "two", "G"), quote("s1", "two", "G")],
        );
        assert_eq!(again, SyncSummary::default());
    }
}
