//! Key/value persistence layer.
//!
//! The store persists three independent top-level JSON documents
//! (`cases`, `products`, `labels`), each under its own key. There is
//! no cross-record transaction: each record is written independently
//! after its own state changes.
//!
//! [`StoragePort`] is the injected persistence seam; [`SqliteStore`]
//! is the SQLite-backed production implementation.

pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;

/// Storage key for the case collection.
pub const CASES_KEY: &str = "cases";
/// Storage key for the product/service-area vocabulary.
pub const PRODUCTS_KEY: &str = "products";
/// Storage key for the label vocabulary.
pub const LABELS_KEY: &str = "labels";

/// Synchronous key/value port mapping string keys to JSON documents.
///
/// Absence of a key means an empty collection, never an error.
pub trait StoragePort {
    /// Fetch the JSON document stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` (a JSON document) under `key`, replacing any
    /// previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the document stored under `key`. Removing an absent
    /// key is a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;
}
