// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON configuration parser adapter.

use crate::domain::{ConfigError, ConfigTree, Result};
use crate::ports::ConfigParser;

/// JSON parser implementation.
///
/// Decodes a JSON document into a `ConfigTree`. The document root must be an
/// object.
///
/// # Examples
///
/// ```rust
/// use fwissr::adapters::JsonParser;
/// use fwissr::ports::ConfigParser;
///
/// let parser = JsonParser;
/// let tree = parser.parse(r#"{"foo": "bar"}"#).unwrap();
/// assert!(tree.contains_key("foo"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<ConfigTree> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("invalid JSON: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
