//! Driven port for durable key-value credential persistence.
//!
//! The session gate reads one fixed key at start, writes it on login, and
//! removes it on logout. Values are opaque strings.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by credential storage.
    pub enum CredentialStoreError {
        /// The backing location could not be opened.
        Unavailable { location: String, message: String } =>
            "credential storage at '{location}' unavailable: {message}",
        /// The key is not usable by the backend.
        InvalidKey { key: String } =>
            "invalid credential key '{key}'",
        /// Reading the stored value failed.
        Read { key: String, message: String } =>
            "failed to read credential '{key}': {message}",
        /// Writing or removing the stored value failed.
        Write { key: String, message: String } =>
            "failed to write credential '{key}': {message}",
    }
}

/// Key-value persistence for credentials.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, CredentialStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), CredentialStoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), CredentialStoreError>;
}

/// Process-local store; values vanish when it is dropped.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        store
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn read(&self, key: &str) -> Result<Option<String>, CredentialStoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialStoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}
