// Catalog API module.
// Provides the HTTP client and wire types for the remote library catalog.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::LibraryClient;
pub use types::{BookAuthor, BookPatch, BookType, CachedBook};
