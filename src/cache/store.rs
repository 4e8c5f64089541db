// In-memory store for the book catalog.
// Handles TTL checking at read time, wholesale replacement, and single-entry patches.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::api::{BookPatch, CachedBook};

use super::clock::{Clock, SystemClock};

/// Freshness window for the catalog: 5 minutes.
pub const BOOK_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

const TTL_MILLIS: i64 = BOOK_CACHE_TTL.as_millis() as i64;

/// Shared view of one cached catalog fetch.
///
/// Handed out by reference count, never copied. Entries are individually
/// shared so a patch can keep untouched entries pointer-identical.
pub type Snapshot = Arc<Vec<Arc<CachedBook>>>;

#[derive(Debug, Default)]
struct CacheEntry {
    books: Option<Snapshot>,
    /// Milliseconds since the epoch of the last `set`; 0 when empty.
    fetched_at: i64,
}

impl CacheEntry {
    fn is_fresh(&self, now: i64) -> bool {
        self.books.is_some() && now.saturating_sub(self.fetched_at) < TTL_MILLIS
    }
}

/// Process-wide cache of the most recently fetched book catalog.
///
/// Create one at startup and share it behind an `Arc`. Expiry is judged
/// lazily on read: stale data stays in place until the next `set` or
/// `clear`, but is never returned.
#[derive(Debug)]
pub struct BookCache<C: Clock = SystemClock> {
    entry: Mutex<CacheEntry>,
    clock: C,
}

impl BookCache<SystemClock> {
    /// Create an empty cache driven by the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for BookCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> BookCache<C> {
    /// Create an empty cache driven by the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entry: Mutex::new(CacheEntry::default()),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheEntry> {
        // No operation can panic while holding the lock, so the data is consistent.
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached catalog if it is still fresh.
    pub fn get(&self) -> Option<Snapshot> {
        let now = self.clock.now_millis();
        let entry = self.lock();

        if entry.is_fresh(now) {
            debug!(age_ms = now.saturating_sub(entry.fetched_at), "book cache hit");
            entry.books.clone()
        } else {
            debug!(populated = entry.books.is_some(), "book cache miss");
            None
        }
    }

    /// Replace the cached catalog with a complete fetch result.
    ///
    /// Last writer wins. Returns the snapshot now held by the cache.
    pub fn set(&self, books: Vec<CachedBook>) -> Snapshot {
        let snapshot: Snapshot = Arc::new(books.into_iter().map(Arc::new).collect());
        let now = self.clock.now_millis();

        let mut entry = self.lock();
        entry.books = Some(Arc::clone(&snapshot));
        entry.fetched_at = now;
        debug!(count = snapshot.len(), "book cache populated");

        snapshot
    }

    /// Drop the cached catalog regardless of its age.
    pub fn clear(&self) {
        let mut entry = self.lock();
        entry.books = None;
        entry.fetched_at = 0;
        debug!("book cache cleared");
    }

    /// Whether `get` would currently return data.
    pub fn is_valid(&self) -> bool {
        let now = self.clock.now_millis();
        self.lock().is_fresh(now)
    }

    /// Whole seconds since the last `set`, or -1 when nothing is cached.
    pub fn age(&self) -> i64 {
        let now = self.clock.now_millis();
        let entry = self.lock();

        if entry.books.is_none() {
            return -1;
        }
        now.saturating_sub(entry.fetched_at).max(0) / 1000
    }

    /// Overlay `patch` onto the cached book with id `id`.
    ///
    /// Builds a new snapshot in the same order; other entries are shared with
    /// the previous one. Does nothing when the cache is empty or no entry
    /// matches. Freshness is not extended.
    pub fn update(&self, id: &str, patch: &BookPatch) {
        let mut entry = self.lock();

        let Some(books) = entry.books.as_ref() else {
            debug!(id, "book cache empty, patch skipped");
            return;
        };
        if !books.iter().any(|book| book.id == id) {
            debug!(id, "book not cached, patch skipped");
            return;
        }

        let patched: Vec<Arc<CachedBook>> = books
            .iter()
            .map(|book| {
                if book.id == id {
                    Arc::new(book.apply(patch))
                } else {
                    Arc::clone(book)
                }
            })
            .collect();

        entry.books = Some(Arc::new(patched));
        debug!(id, "book cache entry patched");
    }
}
