// Command-line entry point.
// Loads the catalog through the shared cache and prints it with the cache status.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf::{
    ClientConfig, Result,
    api::LibraryClient,
    cache::BookCache,
    state::CatalogService,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ClientConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bookshelf={}", config.log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(base_url = %config.base_url, "starting bookshelf v{}", env!("CARGO_PKG_VERSION"));

    let cache = Arc::new(BookCache::new());
    let client = LibraryClient::new(&config)?;
    let service = CatalogService::new(client, cache);

    let books = service.books().await?;
    for book in books.iter() {
        let liked = if book.is_liked == Some(true) { "♥" } else { " " };
        let authors = book.author_names();
        if authors.is_empty() {
            println!("{} {}", liked, book.title);
        } else {
            println!("{} {} ({})", liked, book.title, authors);
        }
    }
    println!("{} books, cache {}", books.len(), service.status().display());

    Ok(())
}
