// State management module.
// Handles catalog loading on top of the shared book cache.

pub mod catalog;

pub use catalog::{CacheStatus, CatalogService, CatalogSource};
