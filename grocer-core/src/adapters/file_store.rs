//! File-backed session storage
//!
//! Each key lives in its own file under `<app dir>/session/`. Writes go
//! through a temp file and an atomic rename, and every mutation holds an
//! exclusive advisory lock on `session.lock` so two processes cannot
//! interleave a token/user pair.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::ports::{SessionStore, StorageKey};

const SESSION_DIR: &str = "session";
const LOCK_FILE: &str = "session.lock";

/// Held advisory lock; released on drop
struct LockGuard {
    file: File,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Session storage in plain files, surviving process restarts
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Open (creating if needed) the session directory inside `app_dir`
    pub fn new(app_dir: &Path) -> Result<Self> {
        let dir = app_dir.join(SESSION_DIR);
        fs::create_dir_all(&dir).map_err(|e| {
            Error::storage(format!("Failed to create session directory {:?}: {}", dir, e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(key.as_str())
    }

    fn lock(&self, exclusive: bool) -> Result<LockGuard> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(LOCK_FILE))?;
        let locked = if exclusive {
            file.lock_exclusive()
        } else {
            file.lock_shared()
        };
        locked.map_err(|e| Error::storage(format!("Failed to lock session storage: {}", e)))?;
        Ok(LockGuard { file })
    }

    /// Write `value` to a temp file next to the key files
    fn stage(&self, value: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
        }
        Ok(tmp)
    }

    fn commit(&self, key: StorageKey, tmp: NamedTempFile) -> Result<()> {
        tmp.persist(self.path(key)).map_err(|e| {
            Error::storage(format!("Failed to write {}: {}", key.as_str(), e.error))
        })?;
        Ok(())
    }

    fn write_unlocked(&self, key: StorageKey, value: &str) -> Result<()> {
        let tmp = self.stage(value)?;
        self.commit(key, tmp)
    }

    fn read_unlocked(&self, key: StorageKey) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage(format!(
                "Failed to read {}: {}",
                key.as_str(),
                e
            ))),
        }
    }

    fn remove_unlocked(&self, key: StorageKey) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::storage(format!(
                "Failed to remove {}: {}",
                key.as_str(),
                e
            ))),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let _guard = self.lock(false)?;
        self.read_unlocked(key)
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        let _guard = self.lock(true)?;
        self.write_unlocked(key, value)
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        let _guard = self.lock(true)?;
        self.remove_unlocked(key)
    }

    /// Every value is staged before any file is replaced; if a rename
    /// fails, keys already replaced get their previous contents back.
    fn set_all(&self, entries: &[(StorageKey, &str)]) -> Result<()> {
        let _guard = self.lock(true)?;

        let mut staged = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            staged.push((*key, self.stage(value)?));
        }

        let mut committed: Vec<(StorageKey, Option<String>)> = Vec::new();
        for (key, tmp) in staged {
            let replaced = self
                .read_unlocked(key)
                .and_then(|previous| self.commit(key, tmp).map(|()| previous));
            match replaced {
                Ok(previous) => committed.push((key, previous)),
                Err(e) => {
                    for (key, previous) in committed.iter().rev() {
                        let _ = match previous {
                            Some(value) => self.write_unlocked(*key, value),
                            None => self.remove_unlocked(*key),
                        };
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[StorageKey]) -> Result<()> {
        let _guard = self.lock(true)?;
        for key in keys {
            self.remove_unlocked(*key)?;
        }
        Ok(())
    }
}
