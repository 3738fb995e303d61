//! Session storage port
//!
//! Durable key-value storage for the two session keys. Only the session
//! context writes these keys.

use crate::domain::result::Result;

/// The two persisted session entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Raw bearer token
    Token,
    /// Serialized `User` record (JSON)
    UserRecord,
}

impl StorageKey {
    pub const ALL: [StorageKey; 2] = [StorageKey::Token, StorageKey::UserRecord];

    /// Key name as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Token => "authToken",
            StorageKey::UserRecord => "user",
        }
    }
}

/// Session storage backend (file, in-memory, OS keychain, ...)
pub trait SessionStore {
    /// Read a key; `Ok(None)` when it was never written or was removed
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    /// Write a key, replacing any previous value
    fn set(&self, key: StorageKey, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key succeeds
    fn remove(&self, key: StorageKey) -> Result<()>;

    /// Write several keys as one unit
    ///
    /// On failure the keys already written are put back to their previous
    /// values (best effort) and the original error is returned.
    fn set_all(&self, entries: &[(StorageKey, &str)]) -> Result<()> {
        let mut previous = Vec::with_capacity(entries.len());
        for (key, _) in entries {
            previous.push((*key, self.get(*key)?));
        }

        for (written, (key, value)) in entries.iter().enumerate() {
            if let Err(e) = self.set(*key, value) {
                for (key, old) in &previous[..written] {
                    let _ = match old {
                        Some(old) => self.set(*key, old),
                        None => self.remove(*key),
                    };
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// Remove several keys as one unit where the backend supports it
    fn remove_all(&self, keys: &[StorageKey]) -> Result<()> {
        for key in keys {
            self.remove(*key)?;
        }
        Ok(())
    }
}
