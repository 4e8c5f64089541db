// Cache module for the shared book catalog.
// Keeps the most recent catalog fetch in memory behind a fixed freshness window.

pub mod clock;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{BOOK_CACHE_TTL, BookCache, Snapshot};
