//! Session store capability and unlock state helpers.
//!
//! Browser hosts back the store with `sessionStorage`, which the browser
//! clears when the tab or window closes. The unlock flag is the only entry
//! the gate ever writes.

use crate::GateError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Stored value that marks a session as unlocked.
///
/// Anything else under the key, including a missing entry, reads as locked.
pub const UNLOCKED_VALUE: &str = "true";

/// String key-value store scoped to the browsing session.
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, GateError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), GateError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, GateError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GateError> {
        (**self).set(key, value)
    }
}

/// Read the unlock flag.
pub fn is_unlocked(store: &dyn SessionStore, key: &str) -> Result<bool, GateError> {
    Ok(store.get(key)?.as_deref() == Some(UNLOCKED_VALUE))
}

/// Persist the unlock flag for the rest of the session.
pub fn mark_unlocked(store: &dyn SessionStore, key: &str) -> Result<(), GateError> {
    store.set(key, UNLOCKED_VALUE)
}

/// In-memory session store.
///
/// Lives exactly as long as the value does, which makes it the natural
/// session for headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry, as the browser does when the session ends.
    pub fn clear(&self) -> Result<(), GateError> {
        self.entries
            .lock()
            .map_err(|e| GateError::StoreIO(format!("Session store poisoned: {}", e)))?
            .clear();
        Ok(())
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, GateError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| GateError::StoreIO(format!("Session store poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GateError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| GateError::StoreIO(format!("Session store poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
