// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background refresh task supervision.
//!
//! The refresher is a plain thread with an explicit alive/not-alive state. It
//! wakes every refresh period, rebuilds the registry's merged tree, and exits
//! when it is stopped, when its registry is dropped, or when its stop channel
//! disconnects.

use crate::registry::RegistryInner;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Weak;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to the background refresh thread of one registry.
pub(crate) struct Refresher {
    stop_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl Refresher {
    /// Spawns the refresh loop.
    ///
    /// The loop holds only a weak reference to the registry internals, so
    /// dropping the registry lets the loop wind down on its next tick.
    pub(crate) fn spawn(inner: Weak<RegistryInner>, period: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }

            let Some(inner) = inner.upgrade() else {
                break;
            };

            tracing::debug!("background refresh tick");
            if let Err(err) = inner.rebuild(false) {
                // Keep serving the previous merged tree.
                tracing::warn!("background refresh failed: {}", err);
            }
        });

        Self {
            stop_tx,
            thread: Some(thread),
        }
    }

    /// Whether the refresh thread is still running.
    pub(crate) fn is_alive(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Signals the refresh thread to stop and waits for it to exit.
    pub(crate) fn stop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
