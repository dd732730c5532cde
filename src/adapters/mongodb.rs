// SPDX-License-Identifier: MIT OR Apache-2.0

//! MongoDB database connection adapter.
//!
//! This module bridges the async `mongodb` driver into the synchronous
//! `DatabaseConnection` port. Driver futures run on a shared lazily-created
//! Tokio runtime; when the caller is already inside a runtime, the work moves
//! to a scoped thread to avoid blocking that runtime's executor.

use crate::domain::{ConfigError, ConfigTree, ConfigValue, Result};
use crate::ports::DatabaseConnection;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Client;
use once_cell::sync::Lazy;
use std::future::Future;
use std::thread;

/// Shared runtime for driver operations to avoid expensive runtime creation
/// on every fetch.
static DRIVER_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Runtime::new().expect("Failed to create driver runtime for MongoDB adapter")
});

/// Runs a driver future to completion from synchronous code.
fn block_on_driver<T, F>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send,
    T: Send,
{
    if tokio::runtime::Handle::try_current().is_ok() {
        // Already inside a runtime: block on a scoped thread instead of the
        // current executor.
        thread::scope(|scope| {
            scope
                .spawn(|| DRIVER_RUNTIME.block_on(future))
                .join()
                .unwrap_or_else(|_| {
                    Err(ConfigError::BackendUnavailable {
                        backend: "mongodb".to_string(),
                        message: "driver thread panicked".to_string(),
                        source: None,
                    })
                })
        })
    } else {
        DRIVER_RUNTIME.block_on(future)
    }
}

fn driver_error(err: mongodb::error::Error) -> ConfigError {
    ConfigError::BackendUnavailable {
        backend: "mongodb".to_string(),
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

/// Database connection backed by the `mongodb` driver.
///
/// The connection URI must name a database (e.g.
/// `mongodb://db1.example.net/my_app`); the actual network connection is
/// established lazily by the driver, so an unreachable server surfaces at
/// fetch time as `BackendUnavailable`, not at construction.
///
/// # Examples
///
/// ```rust,no_run
/// use fwissr::adapters::MongoConnection;
/// use fwissr::ports::DatabaseConnection;
///
/// let conn = MongoConnection::connect("mongodb://localhost:27017/my_app").unwrap();
/// let docs = conn.iterate("config").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MongoConnection {
    uri: String,
    client: Client,
    db_name: String,
}

impl MongoConnection {
    /// Opens a connection handle for `uri`.
    ///
    /// Fails fast with `InvalidUri` when the URI is empty, malformed, or
    /// names no database.
    pub fn connect(uri: &str) -> Result<Self> {
        if uri.is_empty() {
            return Err(ConfigError::InvalidUri {
                uri: uri.to_string(),
                reason: "URI is empty".to_string(),
            });
        }

        let client = block_on_driver(async {
            Client::with_uri_str(uri)
                .await
                .map_err(|e| ConfigError::InvalidUri {
                    uri: uri.to_string(),
                    reason: e.to_string(),
                })
        })?;

        let db_name = client
            .default_database()
            .map(|db| db.name().to_string())
            .ok_or_else(|| ConfigError::InvalidUri {
                uri: uri.to_string(),
                reason: "missing database name".to_string(),
            })?;

        Ok(Self {
            uri: uri.to_string(),
            client,
            db_name,
        })
    }
}

impl DatabaseConnection for MongoConnection {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn iterate(&self, collection: &str) -> Result<Vec<ConfigTree>> {
        let coll = self
            .client
            .database(&self.db_name)
            .collection::<Document>(collection);

        tracing::debug!("fetching mongodb collection '{}'", collection);

        block_on_driver(async move {
            let mut cursor = coll.find(doc! {}).await.map_err(driver_error)?;

            let mut documents = Vec::new();
            while cursor.advance().await.map_err(driver_error)? {
                let document = cursor.deserialize_current().map_err(driver_error)?;
                documents.push(document_to_tree(document));
            }
            Ok(documents)
        })
    }
}

/// Converts a BSON document into a configuration tree.
fn document_to_tree(document: Document) -> ConfigTree {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_value(value)))
        .collect()
}

/// Converts a BSON value into a configuration value.
///
/// BSON-only types degrade to strings: ObjectIds render as hex, datetimes as
/// RFC 3339.
fn bson_to_value(bson: Bson) -> ConfigValue {
    match bson {
        Bson::Null => ConfigValue::Null,
        Bson::Boolean(value) => ConfigValue::Bool(value),
        Bson::Int32(value) => ConfigValue::Integer(value.into()),
        Bson::Int64(value) => ConfigValue::Integer(value),
        Bson::Double(value) => ConfigValue::Float(value),
        Bson::String(value) => ConfigValue::String(value),
        Bson::Array(items) => {
            ConfigValue::Sequence(items.into_iter().map(bson_to_value).collect())
        }
        Bson::Document(document) => ConfigValue::Mapping(document_to_tree(document)),
        Bson::ObjectId(oid) => ConfigValue::String(oid.to_hex()),
        Bson::DateTime(datetime) => match datetime.try_to_rfc3339_string() {
            Ok(rendered) => ConfigValue::String(rendered),
            Err(_) => ConfigValue::Integer(datetime.timestamp_millis()),
        },
        other => ConfigValue::String(other.to_string()),
    }
}
