//! # Quotebook Core
//!
//! A quote collection library: quotes live in host-provided key-value
//! storage, can be added, imported and exported, filtered by category, and
//! periodically reconciled with a remote collection.
//!
//! ## Features
//!
//! - **Reconciliation**: merge a remote collection into the local one by id,
//!   remote values winning on conflict, local-only quotes never removed
//! - **Import/export**: pretty-printed JSON export and all-or-nothing import
//! - **Category filtering**: random quote selection with a persisted filter
//! - **Capability traits**: storage, remote source and view are injected, so
//!   everything runs headless in tests
//!
//! ## Quick Start
//!
//! ```rust
//! use quotebook_core::{QuoteRecord, ReconciliationEngine};
//!
//! let engine = ReconciliationEngine::new();
//! let mut local = vec![QuoteRecord::new("a", "X", "C1")];
//! let summary = engine.reconcile(&mut local, vec![QuoteRecord::new("a", "Y", "C1")]);
//!
//! assert_eq!(local[0].text, "Y");
//! assert_eq!(summary.updated, 1);
//! ```

pub mod config;
pub mod library;
pub mod reconciliation;
pub mod remote;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use library::*;
pub use reconciliation::ReconciliationEngine;
pub use traits::*;
pub use types::*;
