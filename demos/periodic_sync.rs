//! Periodic sync running alongside user edits

use std::sync::Arc;
use std::time::Duration;

use quotebook_core::utils::{MemoryRemote, MemoryStore, RecordingView};
use quotebook_core::{share, spawn_periodic_sync, sync_shared, QuoteBook, QuoteBookConfig, RemoteItem};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let config = QuoteBookConfig::from_json_str(r#"{"syncIntervalSecs": 1}"#)?;
    let interval = config.sync_interval();

    let remote = MemoryRemote::with_items(vec![RemoteItem {
        id: 1,
        title: "delectus aut autem".to_string(),
        body: "quis ut nam facilis".to_string(),
    }]);
    let view = RecordingView::new();

    let book = share(QuoteBook::open(
        config,
        MemoryStore::new(),
        MemoryStore::new(),
        Arc::new(remote.clone()),
        Box::new(view.clone()),
    )?);

    let handle = spawn_periodic_sync(book.clone(), interval)?;

    tokio::time::sleep(Duration::from_millis(200)).await;
    book.lock()
        .await
        .add_quote("Make it work, make it right, make it fast.", "Engineering")
        .await?;

    remote.set_items(vec![RemoteItem {
        id: 1,
        title: "delectus aut autem (edited)".to_string(),
        body: "quis ut nam facilis".to_string(),
    }]);
    tokio::time::sleep(interval * 2).await;

    // A manual pass runs independently of the timer
    let summary = sync_shared(&book).await?;
    println!("Manual sync: {} new, {} updated", summary.added, summary.updated);

    handle.stop();

    println!("Remote fetched {} times", remote.fetch_count());
    for quote in book.lock().await.quotes() {
        println!("  {} \"{}\" - {}", quote.id, quote.text, quote.category);
    }

    Ok(())
}
