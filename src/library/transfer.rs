//! JSON export and import of the quote collection

use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::library::QuoteCollection;
use crate::types::*;
use crate::utils::generate_local_id;

/// File name offered for downloads of an export
pub const EXPORT_FILE_NAME: &str = "quotes.json";

const INVALID_FORMAT: &str =
    "Expected an array of quote objects with \"text\" and \"category\"";

/// Result of merging an import into the collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records appended to the collection
    pub imported: usize,
    /// Records dropped because their id was already present
    pub skipped: usize,
}

/// Serialize quotes as pretty-printed JSON
pub fn export_json(quotes: &[QuoteRecord]) -> QuoteResult<String> {
    if quotes.is_empty() {
        return Err(QuoteError::NothingToExport);
    }
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// A quote accepted from an import document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedQuote {
    /// Identifier carried by the document, if it had a usable one
    pub id: Option<String>,
    pub text: String,
    pub category: String,
}

/// Parse an import document.
///
/// The whole document is rejected if it is not an array or if any element
/// lacks a non-empty string `text` or `category`. Ids are assigned when the
/// quotes are merged.
pub fn parse_import(content: &str) -> QuoteResult<Vec<ImportedQuote>> {
    let document: Value = serde_json::from_str(content)?;

    let Value::Array(elements) = document else {
        return Err(QuoteError::InvalidImport(INVALID_FORMAT.to_string()));
    };

    elements
        .iter()
        .enumerate()
        .map(|(position, element)| match element {
            Value::Object(fields) => parse_element(fields).ok_or_else(|| {
                QuoteError::InvalidImport(format!("{} (element {})", INVALID_FORMAT, position))
            }),
            _ => Err(QuoteError::InvalidImport(format!(
                "{} (element {} is not an object)",
                INVALID_FORMAT, position
            ))),
        })
        .collect()
}

fn parse_element(fields: &Map<String, Value>) -> Option<ImportedQuote> {
    let text = required_string(fields, "text")?;
    let category = required_string(fields, "category")?;
    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(Value::Number(id)) if id.as_f64() != Some(0.0) => Some(id.to_string()),
        _ => None,
    };

    Some(ImportedQuote { id, text, category })
}

fn required_string(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(value)) if !value.trim().is_empty() => Some(value.clone()),
        _ => None,
    }
}

/// A local id not yet in `known`; generated ids share a millisecond within
/// one import, so draw again until the id is free.
fn fresh_local_id(known: &HashSet<String>) -> String {
    loop {
        let id = generate_local_id();
        if !known.contains(&id) {
            return id;
        }
    }
}

/// Append imported quotes.
///
/// Quotes without an id always get a fresh local one. A quote whose own id is
/// already present, locally or earlier in the document, is skipped.
pub fn merge_imported(
    collection: &mut QuoteCollection,
    imported: Vec<ImportedQuote>,
) -> ImportSummary {
    let mut known: HashSet<String> = collection.iter().map(|quote| quote.id.clone()).collect();
    let mut summary = ImportSummary::default();

    for quote in imported {
        let id = match quote.id {
            Some(id) if known.contains(&id) => {
                warn!(id = %id, "Skipping imported quote with duplicate id");
                summary.skipped += 1;
                continue;
            }
            Some(id) => id,
            None => fresh_local_id(&known),
        };

        known.insert(id.clone());
        collection.push(QuoteRecord {
            id,
            text: quote.text,
            category: quote.category,
        });
        summary.imported += 1;
    }

    debug!(
        imported = summary.imported,
        skipped = summary.skipped,
        "Merged imported quotes"
    );

    summary
}
