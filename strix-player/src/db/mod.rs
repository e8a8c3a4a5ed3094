//! Database access for the player controller
//!
//! Watch history and favorites live in the app's local SQLite catalog; this
//! module provides the schema and a `CatalogStore` implementation over it.

pub mod history;

pub use history::SqliteCatalogStore;
