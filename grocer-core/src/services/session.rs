//! Session context - owner of the (token, user) pair
//!
//! A `SessionProvider` is constructed once by whoever owns the process
//! lifetime (normally `GrocerContext`). It rehydrates from storage, then
//! hands out `SessionHandle`s to everything that needs to read the session
//! or sign in/out. Handles hold a weak reference: once the provider is
//! dropped every handle fails with `Error::OutsideSessionScope`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::domain::result::{Error, Result};
use crate::domain::{access, Access, Capability, Session, SessionState, User};
use crate::ports::{Caller, SessionStore, StorageKey};

/// What startup found in session storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rehydration {
    /// Token and user record were present and valid
    Restored,
    /// Nothing was stored
    Empty,
    /// Something was stored but could not be used; the session starts empty
    Discarded { reason: String },
}

struct SessionCore {
    session: RefCell<Session>,
    store: Box<dyn SessionStore>,
}

/// Owner of the process-wide session
pub struct SessionProvider {
    core: Rc<SessionCore>,
    rehydration: Rehydration,
}

impl SessionProvider {
    /// Create the provider and rehydrate from `store`
    ///
    /// Never fails: unreadable or malformed storage yields an anonymous
    /// session, and storage is left untouched.
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        let (session, rehydration) = rehydrate(store.as_ref());
        Self {
            core: Rc::new(SessionCore {
                session: RefCell::new(session),
                store,
            }),
            rehydration,
        }
    }

    /// Outcome of startup rehydration
    pub fn rehydration(&self) -> &Rehydration {
        &self.rehydration
    }

    /// Issue an accessor tied to this provider's lifetime
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            core: Rc::downgrade(&self.core),
        }
    }
}

fn rehydrate(store: &dyn SessionStore) -> (Session, Rehydration) {
    let discarded = |reason: String| (Session::empty(), Rehydration::Discarded { reason });

    let token = match store.get(StorageKey::Token) {
        Ok(token) => token,
        Err(e) => return discarded(format!("failed to read token: {}", e)),
    };
    let record = match store.get(StorageKey::UserRecord) {
        Ok(record) => record,
        Err(e) => return discarded(format!("failed to read user record: {}", e)),
    };

    match (token, record) {
        (None, None) => (Session::empty(), Rehydration::Empty),
        (Some(_), None) => discarded("token stored without a user record".to_string()),
        (None, Some(_)) => discarded("user record stored without a token".to_string()),
        (Some(token), Some(_)) if token.is_empty() => discarded("stored token is empty".to_string()),
        (Some(token), Some(record)) => match serde_json::from_str::<User>(&record) {
            Ok(user) => (Session::authenticated(token, user), Rehydration::Restored),
            Err(e) => discarded(format!("malformed user record: {}", e)),
        },
    }
}

/// Whether a restart over `store` would come back as `session`
fn storage_mirrors(store: &dyn SessionStore, session: &Session) -> bool {
    match rehydrate(store) {
        (stored, Rehydration::Restored) => stored == *session,
        (_, Rehydration::Empty) => !session.is_authenticated(),
        (_, Rehydration::Discarded { .. }) => false,
    }
}

/// Shared accessor for the session
///
/// Cheap to clone. Reads return owned copies; all mutation goes through
/// `login` and `logout`.
#[derive(Clone)]
pub struct SessionHandle {
    core: Weak<SessionCore>,
}

impl SessionHandle {
    fn core(&self) -> Result<Rc<SessionCore>> {
        self.core.upgrade().ok_or(Error::OutsideSessionScope)
    }

    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> Result<R> {
        let core = self.core()?;
        let session = core.session.borrow();
        Ok(f(&session))
    }

    /// Copy of the whole session
    pub fn snapshot(&self) -> Result<Session> {
        self.read(Session::clone)
    }

    pub fn user(&self) -> Result<Option<User>> {
        self.read(|s| s.user().cloned())
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.read(|s| s.token().map(str::to_string))
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        self.read(Session::is_authenticated)
    }

    pub fn state(&self) -> Result<SessionState> {
        self.read(Session::state)
    }

    /// Replace the session with `(token, user)`
    ///
    /// Storage is written before memory, so on a storage error the
    /// in-memory session keeps its previous value. If storage is then left
    /// holding anything other than that previous pair, it is cleared so a
    /// restart comes up anonymous rather than with a mixed pair.
    pub fn login(&self, token: &str, user: User) -> Result<()> {
        let core = self.core()?;
        let record = serde_json::to_string(&user)?;
        if let Err(e) = core.store.set_all(&[
            (StorageKey::Token, token),
            (StorageKey::UserRecord, record.as_str()),
        ]) {
            if !storage_mirrors(core.store.as_ref(), &core.session.borrow()) {
                let _ = core.store.remove_all(&StorageKey::ALL);
            }
            return Err(e);
        }
        *core.session.borrow_mut() = Session::authenticated(token, user);
        Ok(())
    }

    /// Clear the session; a no-op when already anonymous
    ///
    /// Memory is cleared even if removing the stored keys fails.
    pub fn logout(&self) -> Result<()> {
        let core = self.core()?;
        *core.session.borrow_mut() = Session::empty();
        core.store.remove_all(&StorageKey::ALL)
    }

    /// Identity for authenticated backend calls
    pub fn caller(&self) -> Result<Caller> {
        self.read(|s| match (s.token(), s.user()) {
            (Some(token), Some(user)) => Ok(Caller {
                token: token.to_string(),
                user_id: user.id.clone(),
            }),
            _ => Err(Error::NotAuthenticated),
        })?
    }

    /// Caller identity, provided the signed-in role holds `capability`
    pub fn authorize(&self, capability: Capability) -> Result<Caller> {
        self.read(|s| match (access(capability.view(), s), s.user()) {
            (Access::Granted, _) => Ok(()),
            (Access::Forbidden(capability), Some(user)) => Err(Error::Forbidden {
                role: user.user_type,
                capability,
            }),
            _ => Err(Error::NotAuthenticated),
        })??;
        self.caller()
    }
}
