// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection trait definition.
//!
//! This module defines the `DatabaseConnection` trait, the narrow interface
//! the database source uses to enumerate the documents of a collection. The
//! concrete driver adapter lives behind the `mongodb` feature; tests provide
//! in-memory implementations.

use crate::domain::{ConfigTree, Result};

/// A trait for reading configuration documents from a database.
///
/// One connection handles one backing store; it is memoized per URI so every
/// source pointing at the same URI shares a single underlying client.
/// Implementations must be safe to call from the registry's background
/// refresh thread concurrently with foreground fetches, per the backing
/// driver's own concurrency contract.
///
/// # Examples
///
/// ```rust
/// use fwissr::ports::DatabaseConnection;
/// use fwissr::domain::{ConfigTree, Result};
///
/// struct EmptyConnection;
///
/// impl DatabaseConnection for EmptyConnection {
///     fn uri(&self) -> &str {
///         "mongodb://localhost/empty"
///     }
///
///     fn iterate(&self, _collection: &str) -> Result<Vec<ConfigTree>> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DatabaseConnection: Send + Sync {
    /// The connection URI this connection was opened for.
    fn uri(&self) -> &str;

    /// Returns every document of `collection`, each decoded as a mapping.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConfigTree>)` - All documents of the collection
    /// * `Err(ConfigError::BackendUnavailable)` - The store is unreachable
    fn iterate(&self, collection: &str) -> Result<Vec<ConfigTree>>;
}
