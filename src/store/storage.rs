//! Durable credential storage
//!
//! The session token (and the JSON-encoded identity next to it) must survive
//! process restarts. [`TokenStorage`] abstracts the key-value surface;
//! [`KeyringStorage`] backs it with the OS native credential store (Keychain
//! on macOS, Secret Service on Linux, Windows Credential Manager), while
//! [`MemoryStorage`] serves tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, TradectlError};

/// Storage key for the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the JSON-encoded identity record.
pub const USER_KEY: &str = "user";

/// Key-value storage surviving process restarts.
pub trait TokenStorage: Send + Sync {
    /// Reads a value; `Ok(None)` means the key has never been written or was
    /// removed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a value. Must be a no-op when the key is absent.
    fn remove(&self, key: &str) -> Result<()>;
}

/// OS keyring-backed storage.
///
/// Each key is stored under a service name derived from a configurable
/// prefix, so multiple deployments (or the test suite) do not collide.
pub struct KeyringStorage {
    service_prefix: String,
}

impl KeyringStorage {
    /// Creates a keyring store whose entries are namespaced by
    /// `service_prefix` (typically `"tradectl"`).
    pub fn new(service_prefix: &str) -> Self {
        Self {
            service_prefix: service_prefix.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        let service = format!("{}-{}", self.service_prefix, key);
        keyring::Entry::new(&service, key)
            .map_err(|e| TradectlError::Keyring(e).into())
    }
}

impl TokenStorage for KeyringStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(TradectlError::Keyring(e).into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| TradectlError::Keyring(e).into())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(TradectlError::Keyring(e).into()),
        }
    }
}

/// In-memory storage for tests and `storage: memory` deployments.
///
/// Also the handle through which tests simulate an external actor (another
/// browser tab, another CLI process) mutating the durable token.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("storage lock poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.get(TOKEN_KEY).expect("get").is_none());

        storage.set(TOKEN_KEY, "tok-abc").expect("set");
        assert_eq!(
            storage.get(TOKEN_KEY).expect("get"),
            Some("tok-abc".to_string())
        );

        storage.remove(TOKEN_KEY).expect("remove");
        assert!(storage.get(TOKEN_KEY).expect("get").is_none());
    }

    #[test]
    fn test_memory_storage_remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.remove("absent").expect("first remove");
        storage.remove("absent").expect("second remove");
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let storage = MemoryStorage::new();
        storage.set(USER_KEY, "a").expect("set");
        storage.set(USER_KEY, "b").expect("set again");
        assert_eq!(storage.get(USER_KEY).expect("get"), Some("b".to_string()));
    }

    // Keyring integration tests require a system keyring; skipped in CI.

    #[test]
    #[ignore = "requires system keyring"]
    #[serial_test::serial]
    fn test_keyring_storage_roundtrip() {
        let storage = KeyringStorage::new("tradectl-test");
        storage.set(TOKEN_KEY, "integration-token").expect("set");
        assert_eq!(
            storage.get(TOKEN_KEY).expect("get"),
            Some("integration-token".to_string())
        );
        storage.remove(TOKEN_KEY).expect("remove");
        assert!(storage.get(TOKEN_KEY).expect("get").is_none());
    }

    #[test]
    #[ignore = "requires system keyring"]
    #[serial_test::serial]
    fn test_keyring_storage_delete_is_idempotent() {
        let storage = KeyringStorage::new("tradectl-test");
        storage.remove("never-written").expect("first remove");
        storage.remove("never-written").expect("second remove");
    }
}
