//! Session value - the (token, user) pair
//!
//! The token and the user are stored as a single optional pair so they can
//! only ever be set or cleared together.

use serde::Serialize;

use super::user::User;

/// Login state of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// In-memory session: either empty or a bearer token with its user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credentials: Option<(String, User)>,
}

impl Session {
    /// An anonymous session
    pub fn empty() -> Self {
        Self::default()
    }

    /// An authenticated session
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Self {
            credentials: Some((token.into(), user)),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|(token, _)| token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.credentials.as_ref().map(|(_, user)| user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}
