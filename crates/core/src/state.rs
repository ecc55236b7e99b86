//! Shared key/value state scoped to one network run.
//!
//! A small typed map: values are stored as JSON and decoded on access. Absent
//! keys are distinguishable from present-but-null via [`StateStore::has`].
//! There is no expiry, persistence, or cross-run scope.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;

/// A typed key/value store shared between a network and its agents' tools.
///
/// The internal lock exists to make `Arc<StateStore>` sharing through
/// invocation contexts sound; execution itself is a single logical thread, so
/// the lock is never contended.
#[derive(Debug, Default)]
pub struct StateStore {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key, decoded into the requested type.
    ///
    /// Returns `None` when the key is absent or the stored value does not
    /// decode into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().expect("state lock poisoned");
        entries
            .get(key)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// Store a value under a key, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: impl Into<String>, value: T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries.write().expect("state lock poisoned");
        entries.insert(key.into(), value);
        Ok(())
    }

    /// Whether a key is present, regardless of its value.
    pub fn has(&self, key: &str) -> bool {
        let entries = self.entries.read().expect("state lock poisoned");
        entries.contains_key(key)
    }

    /// A detached copy of all entries.
    ///
    /// Mutating the returned map never affects the store.
    pub fn snapshot(&self) -> HashMap<String, serde_json::Value> {
        let entries = self.entries.read().expect("state lock poisoned");
        entries.clone()
    }
}
