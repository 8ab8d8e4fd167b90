//! Quote library: the collection, its transfer formats and the orchestrator

pub mod collection;
pub mod core;
pub mod scheduler;
pub mod transfer;

pub use self::collection::*;
pub use self::core::*;
pub use self::scheduler::*;
pub use self::transfer::{
    export_json, merge_imported, parse_import, ImportSummary, ImportedQuote, EXPORT_FILE_NAME,
};
