// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface
//! for parsing configuration file content in different formats (JSON, YAML,
//! etc.) into a configuration tree.

use crate::domain::{ConfigTree, Result};

/// A trait for parsing configuration file content.
///
/// This trait defines the interface for implementing parsers that can decode
/// configuration data from various file formats into a `ConfigTree`. The root
/// of a configuration document must be a mapping; a parser rejects anything
/// else with a parse error.
///
/// # Examples
///
/// ```rust
/// use fwissr::ports::ConfigParser;
/// use fwissr::domain::{ConfigTree, Result};
///
/// struct MyParser;
///
/// impl ConfigParser for MyParser {
///     fn parse(&self, content: &str) -> Result<ConfigTree> {
///         // Implementation here
///         Ok(ConfigTree::new())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["myformat"]
///     }
/// }
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a configuration tree.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw content of the configuration file
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigTree)` - The parsed configuration
    /// * `Err(ConfigError::ParseError)` - The content does not match the format
    fn parse(&self, content: &str) -> Result<ConfigTree>;

    /// Returns the file extensions supported by this parser.
    ///
    /// This allows the configuration system to automatically select the
    /// appropriate parser based on the file extension. Extensions are listed
    /// without the leading dot.
    fn supported_extensions(&self) -> &[&str];
}
