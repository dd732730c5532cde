// SPDX-License-Identifier: MIT OR Apache-2.0

//! MongoDB-backed configuration source.
//!
//! A mongodb source reads one collection: each document contributes one
//! `{identifier: value}` pair, and the accumulated mapping lands under the
//! namespace derived from the collection name (`my_app.database` merges at
//! `/my_app/database`). Connections are memoized per URI so every source
//! pointing at the same URI shares one underlying client.

use crate::domain::{key_path, merge, ConfigError, ConfigTree, ConfigValue, Result};
use crate::ports::DatabaseConnection;
use crate::sources::{Source, SourceOptions};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Connections memoized per URI.
static CONNECTIONS: Lazy<Mutex<HashMap<String, Arc<dyn DatabaseConnection>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Returns the shared connection for `uri`, opening one on first use.
#[cfg(feature = "mongodb")]
pub fn connection_for_uri(uri: &str) -> Result<Arc<dyn DatabaseConnection>> {
    let mut table = CONNECTIONS.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(conn) = table.get(uri) {
        return Ok(conn.clone());
    }

    let conn: Arc<dyn DatabaseConnection> =
        Arc::new(crate::adapters::MongoConnection::connect(uri)?);
    table.insert(uri.to_string(), conn.clone());
    Ok(conn)
}

/// Returns the shared connection for `uri`.
///
/// Without the `mongodb` feature only connections registered through
/// [`register_connection`] resolve; anything else fails with
/// `BackendUnavailable`.
#[cfg(not(feature = "mongodb"))]
pub fn connection_for_uri(uri: &str) -> Result<Arc<dyn DatabaseConnection>> {
    let table = CONNECTIONS.lock().unwrap_or_else(|e| e.into_inner());
    table
        .get(uri)
        .cloned()
        .ok_or_else(|| ConfigError::BackendUnavailable {
            backend: "mongodb".to_string(),
            message: "crate built without the 'mongodb' feature".to_string(),
            source: None,
        })
}

/// Registers a connection in the per-URI table, keyed by its own URI.
///
/// Sources declared later with the same URI reuse it instead of opening a
/// driver connection. This is the seam for alternative database backends and
/// for tests.
pub fn register_connection(conn: Arc<dyn DatabaseConnection>) {
    let mut table = CONNECTIONS.lock().unwrap_or_else(|e| e.into_inner());
    table.insert(conn.uri().to_string(), conn);
}

/// Backend for mongodb collection sources.
pub(crate) struct MongodbSource {
    conn: Arc<dyn DatabaseConnection>,
    collection: String,
}

impl MongodbSource {
    pub(crate) fn new(conn: Arc<dyn DatabaseConnection>, collection: String) -> Self {
        Self { conn, collection }
    }

    /// Instantiates a mongodb source from a settings declaration.
    pub(crate) fn from_settings(settings: &ConfigTree, options: SourceOptions) -> Result<Source> {
        let uri = settings
            .get("mongodb")
            .and_then(ConfigValue::as_str)
            .unwrap_or("");
        if uri.is_empty() {
            return Err(ConfigError::InvalidUri {
                uri: uri.to_string(),
                reason: "URI is empty".to_string(),
            });
        }

        let collection = settings
            .get("collection")
            .and_then(ConfigValue::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ConfigError::UnknownSourceSettings {
                settings: ConfigValue::Mapping(settings.clone()).to_string(),
            })?;

        let conn = connection_for_uri(uri)?;
        Ok(Source::mongodb(conn, collection, options))
    }

    pub(crate) fn name(&self) -> String {
        format!("{}@{}", self.collection, self.conn.uri())
    }

    /// Fetches every document of the collection and assembles the subtree.
    ///
    /// Each document's `_id` names a key; the `value` field is used as-is
    /// when present, otherwise the remaining fields (minus `_id`) become the
    /// value.
    pub(crate) fn fetch(&self, options: &SourceOptions) -> Result<ConfigTree> {
        tracing::debug!("fetching configuration from '{}'", self.name());

        let mut conf = ConfigTree::new();
        for mut document in self.conn.iterate(&self.collection)? {
            let Some(id) = document.remove("_id") else {
                tracing::debug!(
                    "skipping document without '_id' in collection '{}'",
                    self.collection
                );
                continue;
            };
            let key = match id {
                ConfigValue::String(key) => key,
                other => other.to_string(),
            };
            let value = match document.remove("value") {
                Some(value) => value,
                None => ConfigValue::Mapping(document),
            };
            conf.insert(key, value);
        }

        let namespace = key_path::namespace_for(&self.collection, options.top_level);

        let mut result = ConfigTree::new();
        let target = merge::ensure_path(&mut result, &namespace);
        merge::merge_into(target, conf);
        Ok(result)
    }
}
