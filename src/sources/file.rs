// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed configuration source.
//!
//! A file source covers either a single configuration file or a directory of
//! them. Each file's subtree lands under the namespace derived from its file
//! stem (`my_app.database.yml` merges at `/my_app/database`), except for
//! reserved top-level names and sources flagged `top_level`.

use crate::adapters::{parse_conf_file, FsDirectoryLister};
use crate::domain::{key_path, merge, ConfigError, ConfigTree, Result};
use crate::ports::DirectoryLister;
use crate::sources::SourceOptions;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Backend for file and directory sources.
pub(crate) struct FileSource {
    path: PathBuf,
    lister: Box<dyn DirectoryLister>,
}

impl FileSource {
    /// Creates a file source over `path`, failing if it does not exist.
    pub(crate) fn new(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            lister: Box::new(FsDirectoryLister),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Fetches and merges every configuration file covered by this source.
    ///
    /// A directory enumerates its immediate child files in file-name order,
    /// so a later file's keys win over an earlier file's at the same path. A
    /// single parse failure aborts the whole fetch.
    pub(crate) fn fetch(&self, options: &SourceOptions) -> Result<ConfigTree> {
        let files = if self.path.is_dir() {
            self.lister.list_conf_files(&self.path)?
        } else {
            vec![self.path.clone()]
        };

        let mut result = ConfigTree::new();
        for file in files {
            self.merge_conf_file(&mut result, &file, options)?;
        }
        Ok(result)
    }

    /// Parses one file and merges it into `result` at its namespace position.
    fn merge_conf_file(
        &self,
        result: &mut ConfigTree,
        file: &Path,
        options: &SourceOptions,
    ) -> Result<()> {
        tracing::debug!("loading configuration file '{}'", file.display());

        let conf = parse_conf_file(file)?;

        let stem = file.file_stem().and_then(OsStr::to_str).unwrap_or("");
        let namespace = key_path::namespace_for(stem, options.top_level);

        let target = merge::ensure_path(result, &namespace);
        merge::merge_into(target, conf);
        Ok(())
    }
}
