//! Basic quote book usage example

use std::sync::Arc;

use quotebook_core::utils::{MemoryRemote, MemoryStore, RecordingView};
use quotebook_core::{CategoryFilter, QuoteBook, QuoteBookConfig, RemoteItem};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("Quotebook Core - Basic Example\n");

    let remote = MemoryRemote::with_items(vec![
        RemoteItem {
            id: 1,
            title: "sunt aut facere repellat provident".to_string(),
            body: "quia et suscipit recusandae".to_string(),
        },
        RemoteItem {
            id: 2,
            title: "qui est esse".to_string(),
            body: "est rerum tempore vitae".to_string(),
        },
    ]);
    let view = RecordingView::new();

    // 1. Open the book; first run seeds five quotes
    let mut book = QuoteBook::open(
        QuoteBookConfig::default(),
        MemoryStore::new(),
        MemoryStore::new(),
        Arc::new(remote),
        Box::new(view.clone()),
    )?;
    println!("Seeded {} quotes", book.quotes().len());
    for category in view.snapshot().categories {
        println!("  - {}", category);
    }
    println!();

    // 2. Add a quote of our own; adding also merges the remote collection
    let quote = book
        .add_quote("Simplicity is prerequisite for reliability.", "Engineering")
        .await?;
    println!("Added {} ({})", quote.id, quote.category);

    // 3. Filter by category
    if let Some(shown) = book.filter_quotes(CategoryFilter::Category("Engineering".to_string()))? {
        println!("Showing: \"{}\" - {}", shown.text, shown.category);
    }

    // 4. A manual sync finds nothing left to merge
    let summary = book.sync().await?;
    println!(
        "Sync: {} new, {} updated, {} total",
        summary.added,
        summary.updated,
        book.quotes().len()
    );

    // 5. Export and re-import into a fresh book
    let exported = book.export_quotes()?;

    let mut copy = QuoteBook::open(
        QuoteBookConfig::default(),
        MemoryStore::with_entries([("quotes", "[]")]),
        MemoryStore::new(),
        Arc::new(MemoryRemote::new()),
        Box::new(RecordingView::new()),
    )?;
    let imported = copy.import_quotes(&exported).await?;
    println!("Imported {} quotes into a fresh book", imported.imported);

    println!("\nNotices:");
    for notice in view.snapshot().notices {
        println!("  [{:?}] {}", notice.level, notice.message);
    }

    Ok(())
}
