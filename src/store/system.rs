//! System-status store
//!
//! Tracks whether the backend has completed first-run initialization. The
//! flag defaults to false, is set only as a side effect of navigating to the
//! initialization page, and is never persisted.

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the backend reports itself initialized.
#[derive(Debug, Default)]
pub struct SystemStatusStore {
    initialized: AtomicBool,
}

impl SystemStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the result of the latest `/system/status` query.
    pub fn set_initialized(&self, initialized: bool) {
        self.initialized.store(initialized, Ordering::SeqCst);
    }

    /// Last known initialization state; false until explicitly queried.
    pub fn initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }
}
