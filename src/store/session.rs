//! Session store: the authenticated actor
//!
//! Holds the bearer token and the identity record, mirrors both into durable
//! storage, and exposes the derived admin flag. The store is an explicit,
//! injectable object (constructed around a [`TokenStorage`]) rather than a
//! process-wide singleton, so tests and embedders substitute fakes freely.
//!
//! Invariant: `user` is populated only while `token` is. A token may outlive
//! knowledge of the user record (e.g. right after a restart, before
//! `/users/me` is re-fetched), but never the reverse.

use std::sync::{Arc, RwLock};

use crate::api::types::UserInfo;
use crate::error::{Result, TradectlError};
use crate::store::storage::{TokenStorage, TOKEN_KEY, USER_KEY};

/// Role name that grants access to the admin section.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserInfo>,
}

/// In-memory session state mirrored to durable storage.
///
/// All reads and writes happen under a single `RwLock`, so each mutation is
/// atomic from the caller's perspective: `clear()` removes the in-memory and
/// durable copies before returning.
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Creates an empty session over `storage` without touching it.
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            storage,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Creates a session and repopulates it from durable storage.
    ///
    /// The token is restored when present; the identity record is restored
    /// only when both it and the token exist (an identity without a token is
    /// an invalid state and is discarded). A malformed stored identity is
    /// dropped rather than treated as fatal.
    pub fn restore(storage: Arc<dyn TokenStorage>) -> Result<Self> {
        let store = Self::new(storage);
        {
            let mut state = store.state.write().expect("session lock poisoned");
            state.token = store.storage.get(TOKEN_KEY)?;
            if state.token.is_some() {
                if let Some(raw) = store.storage.get(USER_KEY)? {
                    match serde_json::from_str::<UserInfo>(&raw) {
                        Ok(user) => state.user = Some(user),
                        Err(e) => {
                            tracing::warn!("discarding malformed stored identity: {}", e);
                            store.storage.remove(USER_KEY)?;
                        }
                    }
                }
            } else {
                // No token means any stored identity is stale.
                store.storage.remove(USER_KEY)?;
            }
        }
        Ok(store)
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    /// Current identity record, if known.
    pub fn user(&self) -> Option<UserInfo> {
        self.state
            .read()
            .expect("session lock poisoned")
            .user
            .clone()
    }

    /// `true` iff the identity's role equals [`ADMIN_ROLE`]. A session whose
    /// identity has not been fetched yet is not an admin.
    pub fn is_admin(&self) -> bool {
        self.state
            .read()
            .expect("session lock poisoned")
            .user
            .as_ref()
            .map(|u| u.role == ADMIN_ROLE)
            .unwrap_or(false)
    }

    /// Replaces the token and persists it immediately. Does not touch the
    /// identity record.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)?;
        self.state.write().expect("session lock poisoned").token = Some(token.to_string());
        Ok(())
    }

    /// Replaces the identity record and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`TradectlError::Session`] when no token is present, since an
    /// identity without a token would violate the session invariant.
    pub fn set_user(&self, user: UserInfo) -> Result<()> {
        let mut state = self.state.write().expect("session lock poisoned");
        if state.token.is_none() {
            return Err(TradectlError::Session(
                "cannot set identity without a token".to_string(),
            )
            .into());
        }
        self.storage.set(USER_KEY, &serde_json::to_string(&user)?)?;
        state.user = Some(user);
        Ok(())
    }

    /// Empties both identity and token and removes the durable copies.
    pub fn clear(&self) -> Result<()> {
        let mut state = self.state.write().expect("session lock poisoned");
        state.token = None;
        state.user = None;
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        Ok(())
    }

    /// Reconciles the in-memory session with durable storage.
    ///
    /// An external actor (another tab, another process) may have logged out
    /// or switched accounts; the durable value is authoritative. When the
    /// stored token differs from the in-memory one the local session is
    /// invalidated. Returns `true` when the session was cleared.
    pub fn sync_from_storage(&self) -> Result<bool> {
        let stored = self.storage.get(TOKEN_KEY)?;
        let mut state = self.state.write().expect("session lock poisoned");
        if state.token.is_some() && state.token != stored {
            state.token = None;
            state.user = None;
            // Drop the possibly-stale durable identity as well; the token
            // entry belongs to the external actor now.
            self.storage.remove(USER_KEY)?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;

    fn user(role: &str) -> UserInfo {
        UserInfo {
            id: 1,
            username: "ada".to_string(),
            role: role.to_string(),
            permissions: vec![],
            email: None,
            status: None,
            created_at: None,
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_set_token_persists_durably() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        session.set_token("tok-1").expect("set token");

        assert_eq!(session.token(), Some("tok-1".to_string()));
        assert_eq!(
            storage.get(TOKEN_KEY).expect("get"),
            Some("tok-1".to_string())
        );
    }

    #[test]
    fn test_set_user_requires_token() {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert!(session.set_user(user("admin")).is_err());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_is_admin_derived_from_role() {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        session.set_token("tok").expect("set token");

        session.set_user(user("member")).expect("set user");
        assert!(!session.is_admin());

        session.set_user(user("admin")).expect("set user");
        assert!(session.is_admin());
    }

    #[test]
    fn test_clear_removes_memory_and_durable_copies() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        session.set_token("tok").expect("set token");
        session.set_user(user("admin")).expect("set user");

        session.clear().expect("clear");

        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert!(storage.get(TOKEN_KEY).expect("get").is_none());
        assert!(storage.get(USER_KEY).expect("get").is_none());
    }

    #[test]
    fn test_restore_with_token_but_no_identity() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok-restored").expect("seed token");

        let session = SessionStore::restore(storage).expect("restore");
        assert_eq!(session.token(), Some("tok-restored".to_string()));
        assert!(session.user().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_restore_with_token_and_identity() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok").expect("seed token");
        storage
            .set(
                USER_KEY,
                &serde_json::to_string(&user("admin")).expect("serialize"),
            )
            .expect("seed user");

        let session = SessionStore::restore(storage).expect("restore");
        assert!(session.is_admin());
    }

    #[test]
    fn test_restore_discards_identity_without_token() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                USER_KEY,
                &serde_json::to_string(&user("admin")).expect("serialize"),
            )
            .expect("seed user");

        let session = SessionStore::restore(storage.clone()).expect("restore");
        assert!(session.user().is_none());
        assert!(storage.get(USER_KEY).expect("get").is_none());
    }

    #[test]
    fn test_restore_discards_malformed_identity() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok").expect("seed token");
        storage.set(USER_KEY, "{not json").expect("seed junk");

        let session = SessionStore::restore(storage).expect("restore");
        assert_eq!(session.token(), Some("tok".to_string()));
        assert!(session.user().is_none());
    }

    #[test]
    fn test_sync_clears_session_on_external_logout() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        session.set_token("tok").expect("set token");
        session.set_user(user("admin")).expect("set user");

        // Another actor removed the durable token.
        storage.remove(TOKEN_KEY).expect("external remove");

        assert!(session.sync_from_storage().expect("sync"));
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_sync_clears_session_on_external_token_swap() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        session.set_token("tok-mine").expect("set token");

        storage.set(TOKEN_KEY, "tok-theirs").expect("external swap");

        assert!(session.sync_from_storage().expect("sync"));
        assert!(session.token().is_none());
    }

    #[test]
    fn test_sync_is_noop_when_storage_matches() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage);
        session.set_token("tok").expect("set token");

        assert!(!session.sync_from_storage().expect("sync"));
        assert_eq!(session.token(), Some("tok".to_string()));
    }
}
