// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration parser adapter.

use crate::domain::{ConfigError, ConfigTree, Result};
use crate::ports::ConfigParser;

/// YAML parser implementation.
///
/// Decodes a YAML document into a `ConfigTree`. The document root must be a
/// mapping with string keys.
///
/// # Examples
///
/// ```rust
/// use fwissr::adapters::YamlParser;
/// use fwissr::ports::ConfigParser;
///
/// let parser = YamlParser;
/// let tree = parser.parse("database:\n  host: localhost\n").unwrap();
/// assert!(tree.contains_key("database"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ConfigTree> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("invalid YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yml", "yaml"]
    }
}
