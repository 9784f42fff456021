//! SQLite persistence for the signature catalog.
//!
//! A [`CatalogStore`] owns one connection to a `games` table whose shape is
//! fixed by the [`GrammarProfile`](romident_dat::GrammarProfile) it was
//! created with. Records go in once per build through
//! [`CatalogStore::bulk_insert`] and come back out through point lookups.

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use queries::PlatformCount;
pub use schema::{create_schema, detect_profile};
pub use store::{CatalogStore, StoreError};
