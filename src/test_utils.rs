//! Test utilities for tradectl
//!
//! Shared fakes and fixtures used by unit tests and the integration suite:
//! a recording notifier, pre-wired session fixtures over in-memory storage,
//! and canned identity records.

use std::sync::{Arc, Mutex};

use crate::api::types::UserInfo;
use crate::notify::{Notifier, NoticeLevel};
use crate::store::session::SessionStore;
use crate::store::storage::{MemoryStorage, TokenStorage};

/// Notifier that records every notice instead of printing it.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices recorded so far, in order.
    pub fn recorded(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().expect("notifier lock poisoned").clone()
    }

    /// Messages recorded at the given level.
    pub fn messages_at(&self, level: NoticeLevel) -> Vec<String> {
        self.recorded()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices
            .lock()
            .expect("notifier lock poisoned")
            .push((level, message.to_string()));
    }
}

/// A fresh session store over in-memory storage, plus the storage handle so
/// tests can simulate external mutation.
pub fn memory_session() -> (Arc<SessionStore>, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let session = Arc::new(SessionStore::new(storage.clone() as Arc<dyn TokenStorage>));
    (session, storage)
}

/// Canned identity with the given role.
pub fn user_with_role(role: &str) -> UserInfo {
    UserInfo {
        id: 1,
        username: "ada".to_string(),
        role: role.to_string(),
        permissions: vec![],
        email: None,
        status: Some("active".to_string()),
        created_at: None,
    }
}

/// Canned admin identity.
pub fn admin_user() -> UserInfo {
    user_with_role("admin")
}

/// Canned non-admin identity.
pub fn member_user() -> UserInfo {
    user_with_role("member")
}
