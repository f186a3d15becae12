//! Wire shapes that only the API client needs.

use pillcare_core::session::UserProfile;
use serde::{Deserialize, Serialize};

/// Body of a successful `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: UserProfile,
}

/// Pulls a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}` and `{"message": "..."}`; anything else
/// yields `None`.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
