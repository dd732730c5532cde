// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

use fwissr::domain::{ConfigError, ConfigTree, Result};
use fwissr::ports::DatabaseConnection;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Installs a subscriber printing trace output, for debugging test runs.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Writes a configuration file into `dir` and returns its path.
#[allow(dead_code)]
pub fn write_conf(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Parses a JSON literal into a configuration tree.
#[allow(dead_code)]
pub fn tree(json: &str) -> ConfigTree {
    serde_json::from_str(json).unwrap()
}

/// Polls `check` until it passes or `timeout` elapses.
#[allow(dead_code)]
pub fn wait_until(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        thread::sleep(Duration::from_millis(25));
    }
    false
}

/// In-memory database connection with adjustable documents and availability.
#[allow(dead_code)]
pub struct MockConnection {
    uri: String,
    docs: Mutex<Vec<ConfigTree>>,
    available: AtomicBool,
}

#[allow(dead_code)]
impl MockConnection {
    pub fn new(uri: &str) -> Arc<Self> {
        Arc::new(Self {
            uri: uri.to_string(),
            docs: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
        })
    }

    /// Replaces the collection documents with a JSON array literal.
    pub fn set_docs(&self, json: &str) {
        *self.docs.lock().unwrap() = serde_json::from_str(json).unwrap();
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

impl DatabaseConnection for MockConnection {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn iterate(&self, _collection: &str) -> Result<Vec<ConfigTree>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(ConfigError::BackendUnavailable {
                backend: "mongodb".to_string(),
                message: "mock connection is down".to_string(),
                source: None,
            });
        }
        Ok(self.docs.lock().unwrap().clone())
    }
}
