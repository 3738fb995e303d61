//! Result and error types for the core library

use thiserror::Error;

use super::role::Capability;
use super::user::UserType;
use super::validation::ValidationErrors;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// A `SessionHandle` was used after its `SessionProvider` was dropped.
    #[error("Session accessed outside its provider's lifetime (handle outlived SessionProvider)")]
    OutsideSessionScope,

    #[error("Not signed in. Run 'grocer signin' first.")]
    NotAuthenticated,

    #[error("Access denied: {role} accounts cannot {capability}")]
    Forbidden {
        role: UserType,
        capability: Capability,
    },

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Backend rejected the credentials or the stored token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Backend error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Whether the backend refused the request because of credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Stable short name of the variant, used as event log detail
    pub fn kind(&self) -> String {
        match self {
            Self::OutsideSessionScope => "outside_session_scope".into(),
            Self::NotAuthenticated => "not_authenticated".into(),
            Self::Forbidden { .. } => "forbidden".into(),
            Self::Validation(_) => "validation".into(),
            Self::Unauthorized(_) => "unauthorized".into(),
            Self::Api { status, .. } => format!("api_{}", status),
            Self::Network(_) => "network".into(),
            Self::Storage(_) => "storage".into(),
            Self::Config(_) => "config".into(),
            Self::Io(_) => "io".into(),
            Self::Json(_) => "json".into(),
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
