// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration registry.
//!
//! This module defines the error types that can occur when constructing
//! sources, fetching configuration, or bootstrapping a registry. All errors
//! use `thiserror` for proper error handling and conversion.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// This enum represents all possible errors that can occur when constructing
/// configuration sources, fetching their contents, or bootstrapping a
/// registry. It is marked as `#[non_exhaustive]` to allow for future
/// additions without breaking backwards compatibility.
///
/// Note that a registry lookup on a missing key is NOT an error: `Registry::get`
/// returns `Ok(None)` for an absent path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A source declaration did not match any recognized source kind.
    #[error("Unrecognized source settings: {settings}")]
    UnknownSourceSettings {
        /// A rendering of the offending settings mapping
        settings: String,
    },

    /// A file source was constructed from a path that does not exist.
    #[error("Configuration source not found: {path}")]
    SourceNotFound {
        /// The missing path
        path: PathBuf,
    },

    /// A database source was constructed from an empty or malformed URI.
    #[error("Invalid connection URI '{uri}': {reason}")]
    InvalidUri {
        /// The offending URI
        uri: String,
        /// Why the URI was rejected
        reason: String,
    },

    /// A configuration file has an extension no registered parser supports.
    #[error("Unsupported configuration format: {path}")]
    UnsupportedFormat {
        /// The file with the unrecognized extension
        path: PathBuf,
    },

    /// A configuration file's content does not match its claimed format.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A database source could not reach its backing store.
    #[error("Configuration backend '{backend}' is unavailable: {message}")]
    BackendUnavailable {
        /// The backend kind (e.g. "mongodb")
        backend: String,
        /// The error message
        message: String,
        /// The underlying driver error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No configuration source at all could be located during bootstrap.
    #[error("No configuration found (checked {checked:?})")]
    NoConfiguration {
        /// Every path that was checked for a main configuration
        checked: Vec<PathBuf>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
