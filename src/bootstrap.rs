// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry bootstrap from well-known locations.
//!
//! A process usually builds its registry from the main configuration
//! directories: the system-wide `/etc/fwissr` and the current user's
//! `~/.fwissr`. Their `fwissr.json` files merge at the registry root (user
//! wins) and may declare additional sources under `fwissr_sources` plus a
//! `fwissr_refresh_period`.
//!
//! ```json
//! {
//!   "fwissr_sources": [
//!     { "filepath": "/mnt/my_app/conf/" },
//!     { "filepath": "/etc/my_app.json" },
//!     { "mongodb": "mongodb://db1.example.net/my_app", "collection": "config", "refresh": true }
//!   ],
//!   "fwissr_refresh_period": 30
//! }
//! ```

use crate::adapters::parse_conf_file;
use crate::domain::{merge, ConfigError, ConfigTree, ConfigValue, Result};
use crate::registry::{Registry, DEFAULT_REFRESH_PERIOD};
use crate::sources::{Source, SourceOptions};
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// System-wide main configuration directory.
const DEFAULT_MAIN_CONF_DIR: &str = "/etc/fwissr";

/// Per-user main configuration directory, relative to the home directory.
const USER_CONF_DIR: &str = ".fwissr";

/// Main configuration file name.
pub const MAIN_CONF_FILE: &str = "fwissr.json";

/// Setting declaring additional sources in a main configuration file.
const SOURCES_SETTING: &str = "fwissr_sources";

/// Setting declaring the refresh period (in seconds) in a main configuration
/// file.
const REFRESH_PERIOD_SETTING: &str = "fwissr_refresh_period";

/// Factory building a registry from the main configuration directories.
///
/// # Examples
///
/// ```rust,no_run
/// use fwissr::bootstrap::Bootstrap;
///
/// # fn main() -> fwissr::domain::Result<()> {
/// let registry = Bootstrap::new().registry()?;
/// println!("{:?}", registry.keys()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Bootstrap {
    main_dir: PathBuf,
    user_dir: PathBuf,
}

impl Bootstrap {
    /// Creates a bootstrap over the default locations: `/etc/fwissr` and
    /// `~/.fwissr`.
    pub fn new() -> Self {
        let user_dir = BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(USER_CONF_DIR))
            .unwrap_or_else(|| Path::new("/").join(USER_CONF_DIR));

        Self {
            main_dir: PathBuf::from(DEFAULT_MAIN_CONF_DIR),
            user_dir,
        }
    }

    /// Creates a bootstrap over explicit main directories.
    pub fn with_paths(main_dir: impl Into<PathBuf>, user_dir: impl Into<PathBuf>) -> Self {
        Self {
            main_dir: main_dir.into(),
            user_dir: user_dir.into(),
        }
    }

    /// Parses and merges the main configuration files (user wins over
    /// system).
    pub fn main_conf(&self) -> Result<ConfigTree> {
        let mut conf = ConfigTree::new();
        for file in [
            self.main_dir.join(MAIN_CONF_FILE),
            self.user_dir.join(MAIN_CONF_FILE),
        ] {
            if file.is_file() {
                merge::merge_into(&mut conf, parse_conf_file(&file)?);
            }
        }
        Ok(conf)
    }

    /// Builds the registry: one file source per existing main directory plus
    /// every source declared under `fwissr_sources`.
    ///
    /// Fails with `NoConfiguration` when no main directory exists and no
    /// source is declared, naming every checked path.
    pub fn registry(&self) -> Result<Registry> {
        let main_conf = self.main_conf()?;
        let registry = Registry::with_refresh_period(refresh_period(&main_conf));

        let mut found = false;
        for dir in [&self.main_dir, &self.user_dir] {
            if dir.exists() {
                registry.add_source(Source::file(dir, SourceOptions::default())?)?;
                found = true;
            }
        }

        if let Some(declarations) = main_conf.get(SOURCES_SETTING) {
            let ConfigValue::Sequence(declarations) = declarations else {
                return Err(ConfigError::UnknownSourceSettings {
                    settings: declarations.to_string(),
                });
            };
            for declaration in declarations {
                let ConfigValue::Mapping(settings) = declaration else {
                    return Err(ConfigError::UnknownSourceSettings {
                        settings: declaration.to_string(),
                    });
                };
                registry.add_source(Source::from_settings(settings)?)?;
                found = true;
            }
        }

        if !found {
            return Err(ConfigError::NoConfiguration {
                checked: vec![self.main_dir.clone(), self.user_dir.clone()],
            });
        }

        Ok(registry)
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the refresh period setting, defaulting to 15 seconds. A zero or
/// negative value disables background refresh.
fn refresh_period(main_conf: &ConfigTree) -> Duration {
    match main_conf.get(REFRESH_PERIOD_SETTING) {
        Some(ConfigValue::Integer(seconds)) if *seconds > 0 => {
            Duration::from_secs(*seconds as u64)
        }
        Some(ConfigValue::Integer(_)) => Duration::ZERO,
        _ => DEFAULT_REFRESH_PERIOD,
    }
}
