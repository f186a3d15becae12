#![allow(dead_code)]

use chrono::NaiveDate;
use pillcare_core::session::{InMemorySessionStore, UserProfile};
use pillcare_interaction::ApiClient;
use pillcare_interaction::testing::ScriptedTransport;
use serde_json::{Value, json};
use std::sync::Arc;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn user() -> UserProfile {
    UserProfile {
        id: 1,
        email: "carer@pillcare.test".to_string(),
        full_name: Some("Carer One".to_string()),
        role: Some("caregiver".to_string()),
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub transport: Arc<ScriptedTransport>,
    pub session: Arc<InMemorySessionStore>,
}

/// Client with a logged-in session.
pub fn logged_in() -> Harness {
    harness(InMemorySessionStore::with_session("tok-test", user()))
}

/// Client without a session.
pub fn logged_out() -> Harness {
    harness(InMemorySessionStore::new())
}

fn harness(session: InMemorySessionStore) -> Harness {
    let transport = Arc::new(ScriptedTransport::new());
    let session = Arc::new(session);
    let client = ApiClient::new(transport.clone(), session.clone());
    Harness {
        client,
        transport,
        session,
    }
}

pub fn treatment_json(id: i64, start: &str, end: Option<&str>) -> Value {
    json!({
        "id": id,
        "patient_id": 10,
        "medication_id": 20,
        "dosage": "1 tablet",
        "frequency": 2,
        "start_date": start,
        "end_date": end,
        "instructions": "With food",
        "notes": null
    })
}

pub fn alarm_json(id: i64, time: &str) -> Value {
    json!({
        "id": id,
        "time": time,
        "description": "Dose",
        "is_active": true,
        "sound_enabled": true,
        "visual_enabled": true
    })
}
