//! Session use case.
//!
//! Shell-facing login, logout and startup restore, plus the single place
//! where the "401 clears the session" policy lives. Navigation stays with
//! the shell: this module only reports that re-authentication is needed.

use pillcare_core::session::UserProfile;
use pillcare_core::{PillcareError, Result};
use pillcare_interaction::{ApiClient, LoginResponse};

/// What the shell should do after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Keep going; surface the error as usual.
    None,
    /// The session was cleared; send the user back to login.
    Reauthenticate,
}

/// Login / logout / restore workflow over an [`ApiClient`].
#[derive(Clone)]
pub struct SessionUseCase {
    client: ApiClient,
}

impl SessionUseCase {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        self.client.login(email, password).await
    }

    pub fn logout(&self) {
        tracing::info!("[SessionUseCase] Logging out");
        self.client.session().clear_session();
    }

    /// The cached profile, without a network call.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.client.session().cached_user()
    }

    /// Confirms a persisted session at startup.
    ///
    /// - no token: `Ok(None)`
    /// - `GET /auth/me` succeeds: the cached user is refreshed and returned
    /// - the token is rejected: the session is cleared, `Ok(None)`
    /// - any other failure: the cached user is returned as-is
    pub async fn restore(&self) -> Result<Option<UserProfile>> {
        let session = self.client.session();
        let Some(token) = session.token() else {
            return Ok(None);
        };

        match self.client.current_user().await {
            Ok(user) => {
                session.set_session(token, user.clone());
                Ok(Some(user))
            }
            Err(e) if e.requires_reauthentication() => {
                tracing::info!("[SessionUseCase] Persisted session rejected, clearing");
                session.clear_session();
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(
                    "[SessionUseCase] Could not confirm session ({}), using cached user",
                    e
                );
                Ok(session.cached_user())
            }
        }
    }

    /// Applies the session policy to an error from any workflow.
    ///
    /// Session-expired and session-missing errors clear the store and ask
    /// the shell to re-authenticate. Bad credentials at login do not.
    pub fn handle_error(&self, error: &PillcareError) -> SessionAction {
        if error.requires_reauthentication() {
            self.client.session().clear_session();
            SessionAction::Reauthenticate
        } else {
            SessionAction::None
        }
    }
}
