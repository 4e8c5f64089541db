// Catalog state management.
// Serves the book list from the shared cache, fetching on a miss and patching after likes.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{BookPatch, CachedBook, LibraryClient};
use crate::cache::{BookCache, Clock, Snapshot, SystemClock};
use crate::error::Result;

/// Remote side of the catalog, as seen by the service.
pub trait CatalogSource {
    /// Fetch the complete book list.
    fn fetch_books(&self) -> impl Future<Output = Result<Vec<CachedBook>>> + Send;

    /// Toggle the liked flag of one book, returning the new state.
    fn toggle_like(&self, book_id: &str) -> impl Future<Output = Result<bool>> + Send;
}

impl CatalogSource for LibraryClient {
    fn fetch_books(&self) -> impl Future<Output = Result<Vec<CachedBook>>> + Send {
        self.list_books()
    }

    fn toggle_like(&self, book_id: &str) -> impl Future<Output = Result<bool>> + Send {
        LibraryClient::toggle_like(self, book_id)
    }
}

/// Freshness indicator for the cached catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatus {
    /// Whether the next read would be served from the cache.
    pub fresh: bool,
    /// Seconds since the last fetch, -1 when nothing is cached.
    pub age_secs: i64,
}

impl CacheStatus {
    /// Short label for display.
    pub fn display(&self) -> String {
        match (self.fresh, self.age_secs) {
            (_, -1) => "not loaded".to_string(),
            (true, age) => format!("fresh ({}s old)", age),
            (false, age) => format!("stale ({}s old)", age),
        }
    }
}

/// Loads the catalog through a shared [`BookCache`].
///
/// Several services (one per page) can share one cache; fetching always
/// happens outside the cache lock.
pub struct CatalogService<S, C: Clock = SystemClock> {
    source: S,
    cache: Arc<BookCache<C>>,
}

impl<S: CatalogSource, C: Clock> CatalogService<S, C> {
    pub fn new(source: S, cache: Arc<BookCache<C>>) -> Self {
        Self { source, cache }
    }

    /// The shared cache backing this service.
    pub fn cache(&self) -> &Arc<BookCache<C>> {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the catalog, fetching it only when the cache misses.
    pub async fn books(&self) -> Result<Snapshot> {
        if let Some(books) = self.cache.get() {
            return Ok(books);
        }
        self.fetch_and_store().await
    }

    /// Drop the cached catalog and fetch it again, ignoring freshness.
    pub async fn refresh(&self) -> Result<Snapshot> {
        info!("manual catalog refresh");
        self.cache.clear();
        self.fetch_and_store().await
    }

    /// Toggle a like remotely and mirror the result in the cache.
    pub async fn toggle_like(&self, book_id: &str) -> Result<bool> {
        let liked = self.source.toggle_like(book_id).await.inspect_err(|e| {
            warn!(book_id, error = %e, "like toggle failed");
        })?;
        self.cache.update(book_id, &BookPatch::liked(liked));
        Ok(liked)
    }

    /// Current freshness of the shared cache.
    pub fn status(&self) -> CacheStatus {
        CacheStatus {
            fresh: self.cache.is_valid(),
            age_secs: self.cache.age(),
        }
    }

    async fn fetch_and_store(&self) -> Result<Snapshot> {
        let books = self.source.fetch_books().await.inspect_err(|e| {
            warn!(error = %e, "catalog fetch failed");
        })?;
        info!(count = books.len(), "catalog fetched");
        Ok(self.cache.set(books))
    }
}
