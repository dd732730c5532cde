// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory lister trait definition.
//!
//! This module defines the `DirectoryLister` trait, the narrow interface the
//! file source uses to enumerate configuration files in a directory.

use crate::domain::Result;
use std::path::{Path, PathBuf};

/// A trait for enumerating configuration files in a directory.
///
/// Implementations return the immediate child files carrying a recognized
/// configuration extension, sorted lexicographically by file name so the
/// merge order of a directory's files is deterministic.
///
/// # Examples
///
/// ```rust
/// use fwissr::ports::DirectoryLister;
/// use fwissr::domain::Result;
/// use std::path::{Path, PathBuf};
///
/// struct EmptyLister;
///
/// impl DirectoryLister for EmptyLister {
///     fn list_conf_files(&self, _dir: &Path) -> Result<Vec<PathBuf>> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DirectoryLister: Send + Sync {
    /// Lists the configuration files directly under `dir`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PathBuf>)` - The matching file paths, sorted by file name
    /// * `Err(ConfigError)` - The directory could not be read
    fn list_conf_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}
