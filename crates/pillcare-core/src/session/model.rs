//! Session domain model.
//!
//! A session is the authenticated-user context: an opaque bearer token plus
//! the profile the backend returned at login.

use serde::{Deserialize, Serialize};

/// Profile of the logged-in caregiver or administrator.
///
/// Cached alongside the token so the shell can render without a network
/// round trip. May be stale relative to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserProfile {
    /// Name to show in chrome: full name when known, email otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// The authenticated-user context.
///
/// Token and user travel together: both are set on login and cleared
/// together on logout or session expiry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub cached_user: Option<UserProfile>,
}

impl Session {
    /// Creates a populated session.
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: Some(token.into()),
            cached_user: Some(user),
        }
    }
}
