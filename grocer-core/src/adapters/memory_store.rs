//! In-memory session storage for tests and throwaway sessions

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::result::Result;
use crate::ports::{SessionStore, StorageKey};

/// Session storage that lives as long as its clones
///
/// Clones share the same map, so a test can keep one clone, drop the
/// session provider, and hand the other clone to a new provider to
/// simulate a restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Rc<RefCell<HashMap<StorageKey, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with raw values already present (e.g. a corrupted record)
    pub fn seeded(entries: &[(StorageKey, &str)]) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.entries.borrow_mut().insert(*key, value.to_string());
        }
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.entries.borrow_mut().remove(&key);
        Ok(())
    }
}
