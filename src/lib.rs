// SPDX-License-Identifier: MIT OR Apache-2.0

//! A registry-style configuration management crate.
//!
//! This crate aggregates settings from multiple heterogeneous sources —
//! filesystem trees of JSON/YAML files and MongoDB collections — into one
//! unified, path-addressable tree, with optional background refresh so
//! long-running processes observe updated configuration without restart.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and pure logic (`ConfigValue`, deep merge,
//!   key paths, errors)
//! - **Ports**: Trait definitions for external collaborators
//!   (`ConfigParser`, `DirectoryLister`, `DatabaseConnection`)
//! - **Adapters**: Concrete implementations (JSON/YAML parsers, filesystem
//!   lister, MongoDB driver)
//! - **Sources**: The closed set of source variants with namespacing and
//!   fetch caching
//! - **Registry**: The merged tree, its lookups, and the background refresh
//!   lifecycle
//!
//! # Features
//!
//! - **Namespacing**: a file `my_app.database.yml` lands at
//!   `/my_app/database`; reserved names (`fwissr`) and the `top_level` flag
//!   merge at the root
//! - **Deterministic merging**: later sources win; within a directory, later
//!   file names win
//! - **Refresh opt-in**: sources flagged `refresh` are re-fetched
//!   periodically by a single supervised background thread per registry
//! - **Bootstrap**: build a registry from `/etc/fwissr` and `~/.fwissr`,
//!   including declared additional sources
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `cli`: Enable the `fwissr` command-line binary (default)
//! - `mongodb`: Enable the MongoDB source backend
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fwissr::prelude::*;
//!
//! # fn main() -> fwissr::domain::Result<()> {
//! let registry = Registry::new();
//! registry.add_source(Source::file("/etc/my_app/conf", SourceOptions::default())?)?;
//!
//! println!("{:?}", registry.get("/my_app/database/host")?);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod bootstrap;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod sources;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for
/// convenient access.
pub mod prelude {
    pub use crate::bootstrap::Bootstrap;
    pub use crate::domain::{merge, ConfigError, ConfigTree, ConfigValue, Result};
    pub use crate::ports::{ConfigParser, DatabaseConnection, DirectoryLister};
    pub use crate::registry::Registry;
    pub use crate::sources::{Source, SourceOptions};

    // Re-export adapters based on feature flags
    pub use crate::adapters::{FsDirectoryLister, JsonParser};
    #[cfg(feature = "mongodb")]
    pub use crate::adapters::MongoConnection;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
