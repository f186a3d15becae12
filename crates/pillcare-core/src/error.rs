//! Error types for the PillCare client core.

use thiserror::Error;

/// Which authentication path produced an [`PillcareError::Authentication`].
///
/// Login failures and stale-token failures share one variant; the code path
/// that raised the error records which one it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureKind {
    /// `POST /auth/login` rejected the credentials.
    InvalidCredentials,
    /// An authenticated call came back with 401.
    SessionExpired,
}

/// A shared error type for the entire PillCare client.
///
/// Callers switch on the variant instead of inspecting message text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PillcareError {
    /// No bearer token is stored; the caller must log in first
    #[error("No active session, please log in")]
    SessionMissing,

    /// Credentials rejected at login, or session rejected mid-use
    #[error("Authentication failed ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Authentication {
        kind: AuthFailureKind,
        status: u16,
        message: Option<String>,
    },

    /// Any other non-2xx response
    #[error("HTTP error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Http { status: u16, message: Option<String> },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Client-side field validation, never sent over the wire
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PillcareError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an Http error
    pub fn http(status: u16, message: Option<String>) -> Self {
        Self::Http { status, message }
    }

    /// Creates a login-time authentication error
    pub fn invalid_credentials(status: u16, message: Option<String>) -> Self {
        Self::Authentication {
            kind: AuthFailureKind::InvalidCredentials,
            status,
            message,
        }
    }

    /// Creates a 401-on-authenticated-call error
    pub fn session_expired(message: Option<String>) -> Self {
        Self::Authentication {
            kind: AuthFailureKind::SessionExpired,
            status: 401,
            message,
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a client-side validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a network-level failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if the stored session was rejected by the backend.
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            Self::Authentication {
                kind: AuthFailureKind::SessionExpired,
                ..
            }
        )
    }

    /// Check if the caller has to (re-)authenticate before continuing.
    ///
    /// Returns true for `SessionMissing` and for session-expired
    /// authentication errors. Bad credentials at login are excluded: the
    /// user is already on the login path.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::SessionMissing) || self.is_session_expired()
    }

    /// Check if the endpoint itself is unavailable (404 / 405).
    ///
    /// Used to decide when reference data may fall back to a builtin
    /// catalog.
    pub fn is_endpoint_unavailable(&self) -> bool {
        matches!(self, Self::Http { status: 404 | 405, .. })
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PillcareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PillcareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PillcareError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PillcareError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PillcareError>`.
pub type Result<T> = std::result::Result<T, PillcareError>;
