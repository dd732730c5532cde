// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem directory lister adapter.

use crate::adapters::CONF_EXTENSIONS;
use crate::domain::Result;
use crate::ports::DirectoryLister;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory lister backed by `std::fs`.
///
/// Enumerates the immediate child files of a directory carrying a recognized
/// configuration extension. Subdirectories are not descended into. Results
/// sort lexicographically by file name so a directory always merges in the
/// same order.
#[derive(Debug, Clone, Default)]
pub struct FsDirectoryLister;

impl DirectoryLister for FsDirectoryLister {
    fn list_conf_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let extension = path.extension().and_then(OsStr::to_str).unwrap_or("");
            if CONF_EXTENSIONS.contains(&extension) {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}
