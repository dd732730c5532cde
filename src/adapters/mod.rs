// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing concrete port implementations.
//!
//! This module contains the concrete implementations of the port traits:
//! format parsers backed by `serde_json` and `serde_yaml`, a directory lister
//! backed by `std::fs`, and a database connection backed by the `mongodb`
//! driver.

pub mod fs_lister;
pub mod json;
#[cfg(feature = "mongodb")]
pub mod mongodb;
#[cfg(feature = "yaml")]
pub mod yaml;

// Re-export adapters based on feature flags
pub use self::fs_lister::FsDirectoryLister;
pub use self::json::JsonParser;
#[cfg(feature = "mongodb")]
pub use self::mongodb::MongoConnection;
#[cfg(feature = "yaml")]
pub use self::yaml::YamlParser;

use crate::domain::{ConfigError, ConfigTree, Result};
use crate::ports::ConfigParser;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// File extensions recognized as configuration files.
#[cfg(feature = "yaml")]
pub const CONF_EXTENSIONS: &[&str] = &["json", "yml", "yaml"];

/// File extensions recognized as configuration files.
#[cfg(not(feature = "yaml"))]
pub const CONF_EXTENSIONS: &[&str] = &["json"];

/// Returns the parser registered for `extension`, if any.
fn parser_for(extension: &str) -> Option<&'static dyn ConfigParser> {
    static JSON: JsonParser = JsonParser;
    if JSON.supported_extensions().contains(&extension) {
        return Some(&JSON);
    }

    #[cfg(feature = "yaml")]
    {
        static YAML: YamlParser = YamlParser;
        if YAML.supported_extensions().contains(&extension) {
            return Some(&YAML);
        }
    }

    None
}

/// Reads and parses a configuration file, dispatching on its extension.
///
/// # Returns
///
/// * `Ok(ConfigTree)` - The parsed configuration
/// * `Err(ConfigError::UnsupportedFormat)` - No parser handles the extension
/// * `Err(ConfigError::ParseError)` - The content does not match the format
/// * `Err(ConfigError::IoError)` - The file could not be read
///
/// # Examples
///
/// ```rust,no_run
/// use fwissr::adapters::parse_conf_file;
/// use std::path::Path;
///
/// let tree = parse_conf_file(Path::new("/etc/fwissr/fwissr.json")).unwrap();
/// ```
pub fn parse_conf_file(path: &Path) -> Result<ConfigTree> {
    let extension = path.extension().and_then(OsStr::to_str).unwrap_or("");
    let parser = parser_for(extension).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = fs::read_to_string(path)?;
    parser.parse(&content).map_err(|err| match err {
        ConfigError::ParseError { message, source } => ConfigError::ParseError {
            message: format!("{}: {}", path.display(), message),
            source,
        },
        other => other,
    })
}
