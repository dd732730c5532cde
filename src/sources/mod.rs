// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration sources.
//!
//! A [`Source`] is one configuration origin contributing a subtree to the
//! registry. Exactly two variants exist: a filesystem path of JSON/YAML
//! files, and a MongoDB collection. Every source carries the same options and
//! the same fetch cache; only the backend retrieval differs.

pub mod file;
pub mod mongodb;

pub use self::mongodb::{connection_for_uri, register_connection};

use crate::domain::{ConfigError, ConfigTree, ConfigValue, Result};
use crate::ports::DatabaseConnection;
use crate::sources::file::FileSource;
use crate::sources::mongodb::MongodbSource;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Option flags recognized on every source.
///
/// Parsed from a source declaration; unrecognized extra keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceOptions {
    /// Merge the fetched subtree at the registry root, suppressing the
    /// namespace derived from the source's name.
    pub top_level: bool,
    /// Opt this source into periodic re-fetching by the background task.
    pub refresh: bool,
}

impl SourceOptions {
    /// Extracts the recognized option flags from a settings mapping.
    pub fn from_settings(settings: &ConfigTree) -> Self {
        let flag = |name: &str| matches!(settings.get(name), Some(ConfigValue::Bool(true)));
        Self {
            top_level: flag("top_level"),
            refresh: flag("refresh"),
        }
    }
}

/// The closed set of source backends.
enum Backend {
    File(FileSource),
    Mongodb(MongodbSource),
}

/// One configuration origin.
///
/// A source fetches a configuration subtree from its backing store and places
/// it at the correct namespace position. The last fetch is cached, so a
/// source that is not flagged `refresh` is fetched exactly once, lazily, on
/// first access.
///
/// # Examples
///
/// ```rust,no_run
/// use fwissr::sources::{Source, SourceOptions};
///
/// let source = Source::file("/etc/my_app/conf", SourceOptions::default()).unwrap();
/// let conf = source.get_conf().unwrap();
/// ```
pub struct Source {
    backend: Backend,
    options: SourceOptions,
    cache: Mutex<Option<ConfigTree>>,
}

impl Source {
    fn new(backend: Backend, options: SourceOptions) -> Self {
        Self {
            backend,
            options,
            cache: Mutex::new(None),
        }
    }

    /// Creates a file-backed source from a file or directory path.
    ///
    /// Fails with `SourceNotFound` if the path does not exist.
    pub fn file(path: impl AsRef<Path>, options: SourceOptions) -> Result<Self> {
        Ok(Self::new(
            Backend::File(FileSource::new(path.as_ref())?),
            options,
        ))
    }

    /// Creates a database-backed source from a connection and a collection
    /// name.
    pub fn mongodb(
        conn: Arc<dyn DatabaseConnection>,
        collection: impl Into<String>,
        options: SourceOptions,
    ) -> Self {
        Self::new(
            Backend::Mongodb(MongodbSource::new(conn, collection.into())),
            options,
        )
    }

    /// Instantiates a source from a settings declaration.
    ///
    /// A mapping with a `filepath` key declares a file source; a mapping with
    /// both `mongodb` (connection URI) and `collection` keys declares a
    /// database source. Any other shape is rejected with
    /// `UnknownSourceSettings`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use fwissr::domain::ConfigTree;
    /// use fwissr::sources::Source;
    ///
    /// let settings: ConfigTree =
    ///     serde_json::from_str(r#"{"filepath": "/etc/my_app.json", "refresh": true}"#).unwrap();
    /// let source = Source::from_settings(&settings).unwrap();
    /// assert!(source.can_refresh());
    /// ```
    pub fn from_settings(settings: &ConfigTree) -> Result<Self> {
        let options = SourceOptions::from_settings(settings);

        if settings.contains_key("filepath") {
            let path = settings
                .get("filepath")
                .and_then(ConfigValue::as_str)
                .filter(|path| !path.is_empty())
                .ok_or_else(|| unknown_settings(settings))?;
            Self::file(path, options)
        } else if settings.contains_key("mongodb") {
            MongodbSource::from_settings(settings, options)
        } else {
            Err(unknown_settings(settings))
        }
    }

    /// The option flags this source was created with.
    pub fn options(&self) -> &SourceOptions {
        &self.options
    }

    /// Whether this source participates in periodic refresh.
    pub fn can_refresh(&self) -> bool {
        self.options.refresh
    }

    /// A human-readable identifier for logs and error messages.
    pub fn name(&self) -> String {
        match &self.backend {
            Backend::File(file) => file.path().display().to_string(),
            Backend::Mongodb(mongodb) => mongodb.name(),
        }
    }

    /// Fetches the source's configuration from its backing store.
    ///
    /// Always hits the backing store; the cache is neither consulted nor
    /// updated. Fetch failures propagate and abort the triggering
    /// refresh/add cycle.
    pub fn fetch_conf(&self) -> Result<ConfigTree> {
        match &self.backend {
            Backend::File(file) => file.fetch(&self.options),
            Backend::Mongodb(mongodb) => mongodb.fetch(&self.options),
        }
    }

    /// Returns the source's configuration, fetching at most when needed.
    ///
    /// A cached result is returned as-is unless the source is flagged
    /// `refresh`; otherwise the store is fetched and the cache updated.
    pub fn get_conf(&self) -> Result<ConfigTree> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(conf) = cache.as_ref() {
            if !self.can_refresh() {
                return Ok(conf.clone());
            }
        }

        let conf = self.fetch_conf()?;
        *cache = Some(conf.clone());
        Ok(conf)
    }

    /// Clears the fetch cache, forcing the next `get_conf` to re-fetch
    /// regardless of the `refresh` flag.
    pub fn reset(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        *cache = None;
    }
}

fn unknown_settings(settings: &ConfigTree) -> ConfigError {
    ConfigError::UnknownSourceSettings {
        settings: ConfigValue::Mapping(settings.clone()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(json: &str) -> ConfigTree {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_options_defaults() {
        let options = SourceOptions::from_settings(&ConfigTree::new());
        assert!(!options.top_level);
        assert!(!options.refresh);
    }

    #[test]
    fn test_options_from_settings() {
        let options =
            SourceOptions::from_settings(&settings(r#"{"top_level": true, "refresh": true}"#));
        assert!(options.top_level);
        assert!(options.refresh);
    }

    #[test]
    fn test_options_ignore_non_boolean_flags() {
        let options = SourceOptions::from_settings(&settings(r#"{"refresh": "yes"}"#));
        assert!(!options.refresh);
    }

    #[test]
    fn test_from_settings_rejects_unknown_shape() {
        let result = Source::from_settings(&settings(r#"{"whatever": 1}"#));
        assert!(matches!(
            result,
            Err(ConfigError::UnknownSourceSettings { .. })
        ));
    }

    #[test]
    fn test_from_settings_rejects_empty_filepath() {
        let result = Source::from_settings(&settings(r#"{"filepath": ""}"#));
        assert!(matches!(
            result,
            Err(ConfigError::UnknownSourceSettings { .. })
        ));
    }

    #[test]
    fn test_from_settings_rejects_missing_file() {
        let result = Source::from_settings(&settings(r#"{"filepath": "/no/such/path"}"#));
        assert!(matches!(result, Err(ConfigError::SourceNotFound { .. })));
    }

    #[test]
    fn test_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Source>();
    }
}
