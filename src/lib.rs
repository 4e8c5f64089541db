//! Client for a library-management catalog API.
//!
//! The core is [`cache::BookCache`], a process-wide, time-boxed cache of the
//! book catalog shared by every consumer. [`state::CatalogService`] drives it
//! against the remote API exposed by [`api::LibraryClient`].

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod state;

pub use config::ClientConfig;
pub use error::{LibraryError, Result};
