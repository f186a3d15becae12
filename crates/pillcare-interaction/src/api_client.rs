//! API client for the PillCare 360 backend.
//!
//! Every backend call from the client core goes through [`ApiClient`]. It
//! reads the bearer token from the injected [`SessionStore`] before each
//! call and classifies failures into [`PillcareError`] variants:
//!
//! | outcome | error |
//! |---------|-------|
//! | no token stored | `SessionMissing` (nothing is sent) |
//! | 401 | `Authentication { kind: SessionExpired }` |
//! | other non-2xx | `Http { status }` |
//! | no response | `Network` |
//!
//! The client never clears the session or retries on its own. What to do
//! after a 401 is the caller's decision.

use crate::dto::{LoginResponse, extract_error_message};
use crate::transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RequestBody,
};
use pillcare_core::config::ClientConfig;
use pillcare_core::reference::{Medication, Patient};
use pillcare_core::session::{SessionStore, UserProfile};
use pillcare_core::treatment::{AlarmPayload, AlarmRecord, Treatment, TreatmentPayload};
use pillcare_core::{PillcareError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub const LOGIN_PATH: &str = "/auth/login";

/// Single choke point through which the client reaches the backend.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Creates a client over an explicit transport.
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<dyn SessionStore>) -> Self {
        Self { transport, session }
    }

    /// Creates a reqwest-backed client from configuration.
    pub fn from_config(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        tracing::debug!("[ApiClient] Using backend at {}", config.normalized_base_url());
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), session))
    }

    /// The session store this client reads tokens from.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Exchanges credentials for a token.
    ///
    /// Credentials go form-encoded as `username` / `password`. On success the
    /// token and user replace the stored session. Any non-2xx status is an
    /// `InvalidCredentials` authentication error carrying the server message.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = HttpRequest {
            method: HttpMethod::Post,
            path: LOGIN_PATH.to_string(),
            bearer_token: None,
            body: RequestBody::Form(vec![
                ("username".to_string(), email.to_string()),
                ("password".to_string(), password.to_string()),
            ]),
        };

        tracing::debug!("[ApiClient] POST {}", LOGIN_PATH);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            tracing::info!("[ApiClient] Login rejected with status {}", response.status);
            return Err(PillcareError::invalid_credentials(
                response.status,
                extract_error_message(&response.body),
            ));
        }

        let login: LoginResponse = serde_json::from_str(&response.body)?;
        self.session
            .set_session(login.access_token.clone(), login.user.clone());
        tracing::info!("[ApiClient] Logged in as user {}", login.user.id);

        Ok(login)
    }

    /// Sends an authenticated JSON request and returns the parsed body.
    ///
    /// Fails with `SessionMissing` before touching the transport when no
    /// token is stored. An empty 2xx body is returned as `Value::Null`.
    pub async fn authenticated_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        let Some(token) = self.session.token() else {
            tracing::debug!("[ApiClient] {} {} refused: no session", method, path);
            return Err(PillcareError::SessionMissing);
        };

        let request = HttpRequest {
            method,
            path: path.to_string(),
            bearer_token: Some(token),
            body: body.map(RequestBody::Json).unwrap_or(RequestBody::Empty),
        };

        tracing::debug!("[ApiClient] {} {}", method, path);
        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!("[ApiClient] {} {} failed: {}", method, path, e);
        })?;

        classify(method, path, response)
    }

    // ============================================================================
    // Typed endpoints
    // ============================================================================

    /// `GET /auth/me`
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.get("/auth/me").await
    }

    /// `GET /patients`
    pub async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.get("/patients").await
    }

    /// `GET /medications`
    pub async fn list_medications(&self) -> Result<Vec<Medication>> {
        self.get("/medications").await
    }

    /// `GET /treatments`: treatments visible to the caller.
    pub async fn list_treatments(&self) -> Result<Vec<Treatment>> {
        self.get("/treatments").await
    }

    /// `POST /treatments`
    pub async fn create_treatment(&self, payload: &TreatmentPayload) -> Result<Treatment> {
        self.send_json(HttpMethod::Post, "/treatments", payload).await
    }

    /// `PUT /treatments/{id}`
    pub async fn update_treatment(
        &self,
        treatment_id: i64,
        payload: &TreatmentPayload,
    ) -> Result<Treatment> {
        self.send_json(HttpMethod::Put, &format!("/treatments/{treatment_id}"), payload)
            .await
    }

    /// `GET /treatments/{id}/alarms`
    pub async fn list_alarms(&self, treatment_id: i64) -> Result<Vec<AlarmRecord>> {
        self.get(&alarms_path(treatment_id)).await
    }

    /// `POST /treatments/{id}/alarms`
    pub async fn create_alarm(
        &self,
        treatment_id: i64,
        payload: &AlarmPayload,
    ) -> Result<AlarmRecord> {
        self.send_json(HttpMethod::Post, &alarms_path(treatment_id), payload)
            .await
    }

    /// `DELETE /treatments/{id}/alarms/{alarmId}`
    pub async fn delete_alarm(&self, treatment_id: i64, alarm_id: i64) -> Result<()> {
        let path = format!("{}/{alarm_id}", alarms_path(treatment_id));
        self.authenticated_request(HttpMethod::Delete, &path, None)
            .await
            .map(|_| ())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.authenticated_request(HttpMethod::Get, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn send_json<B, T>(&self, method: HttpMethod, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self.authenticated_request(method, path, Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn alarms_path(treatment_id: i64) -> String {
    format!("/treatments/{treatment_id}/alarms")
}

fn classify(method: HttpMethod, path: &str, response: HttpResponse) -> Result<Value> {
    match response.status {
        status if (200..300).contains(&status) => {
            if response.body.trim().is_empty() {
                Ok(Value::Null)
            } else {
                Ok(serde_json::from_str(&response.body)?)
            }
        }
        401 => {
            tracing::info!("[ApiClient] {} {} rejected: session expired", method, path);
            Err(PillcareError::session_expired(extract_error_message(
                &response.body,
            )))
        }
        status => {
            tracing::debug!("[ApiClient] {} {} returned {}", method, path, status);
            Err(PillcareError::http(
                status,
                extract_error_message(&response.body),
            ))
        }
    }
}
