mod common;

use common::{alarm_json, logged_in, logged_out, today, treatment_json};
use pillcare_application::{
    AlarmOperation, FormMode, SaveOrchestrator, SaveOutcome, SessionAction, SessionUseCase,
    TreatmentFormState,
};
use pillcare_core::PillcareError;
use pillcare_core::session::SessionStore;
use pillcare_core::treatment::{AlarmDraft, DraftField, TreatmentDraft};
use pillcare_interaction::HttpMethod;
use serde_json::json;

fn valid_draft() -> TreatmentDraft {
    let mut draft = TreatmentDraft::new(today());
    draft.patient_id = Some(10);
    draft.medication_id = Some(20);
    draft.dosage = "1 tablet".to_string();
    draft.frequency = 2;
    draft.duration_days = 10;
    draft.alarms = vec![AlarmDraft::new("08:00", "Breakfast")];
    draft
}

#[tokio::test]
async fn test_create_scenario_saves_treatment_then_alarm() {
    let h = logged_in();
    h.transport.reply(
        HttpMethod::Post,
        "/treatments",
        201,
        treatment_json(42, "2026-10-18", Some("2026-10-27")),
    );
    h.transport
        .reply(HttpMethod::Post, "/treatments/42/alarms", 201, alarm_json(1, "08:00"));

    let form = TreatmentFormState::with_draft(h.client.clone(), valid_draft());
    assert!(form.validate_as_of(today()).is_valid());

    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    assert_eq!(outcome, SaveOutcome::Saved { treatment_id: 42 });
    assert_eq!(
        h.transport.calls(),
        vec!["POST /treatments", "POST /treatments/42/alarms"]
    );

    // Scalar fields with the derived end date
    let sent = &h.transport.requests()[0];
    match &sent.body {
        pillcare_interaction::RequestBody::Json(body) => {
            assert_eq!(body["start_date"], "2026-10-18");
            assert_eq!(body["end_date"], "2026-10-27");
            assert_eq!(body["dosage"], "1 tablet");
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_draft_makes_no_network_call() {
    let h = logged_in();
    let mut draft = valid_draft();
    draft.frequency = 0;
    let form = TreatmentFormState::with_draft(h.client.clone(), draft);

    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    match outcome {
        SaveOutcome::Invalid(errors) => {
            assert_eq!(errors.fields(), vec![DraftField::Frequency]);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn test_treatment_failure_stops_before_alarms() {
    let h = logged_in();
    h.transport
        .reply(HttpMethod::Post, "/treatments", 422, json!({"detail": "Patient inactive"}));

    let form = TreatmentFormState::with_draft(h.client.clone(), valid_draft());
    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    assert_eq!(
        outcome,
        SaveOutcome::Failed(PillcareError::http(422, Some("Patient inactive".into())))
    );
    assert!(!outcome.is_saved());
    assert_eq!(h.transport.calls(), vec!["POST /treatments"]);
}

#[tokio::test]
async fn test_expired_session_fails_save() {
    let h = logged_in();
    h.transport.reply(HttpMethod::Post, "/treatments", 401, json!({}));

    let form = TreatmentFormState::with_draft(h.client.clone(), valid_draft());
    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    match &outcome {
        SaveOutcome::Failed(e) => assert!(e.is_session_expired()),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(outcome.reauthentication_error().is_some());
}

#[tokio::test]
async fn test_missing_session_fails_without_network() {
    let h = logged_out();
    let form = TreatmentFormState::with_draft(h.client.clone(), valid_draft());

    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    assert_eq!(outcome, SaveOutcome::Failed(PillcareError::SessionMissing));
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn test_create_mode_alarm_failure_is_a_warning() {
    let h = logged_in();
    h.transport.reply(
        HttpMethod::Post,
        "/treatments",
        201,
        treatment_json(7, "2026-10-18", Some("2026-10-27")),
    );
    h.transport
        .reply(HttpMethod::Post, "/treatments/7/alarms", 201, alarm_json(1, "08:00"));
    h.transport
        .reply(HttpMethod::Post, "/treatments/7/alarms", 500, json!({}));
    h.transport
        .reply(HttpMethod::Post, "/treatments/7/alarms", 201, alarm_json(3, "20:00"));

    let mut draft = valid_draft();
    draft.frequency = 3;
    draft.generate_evenly_spaced(3).unwrap();
    let form = TreatmentFormState::with_draft(h.client.clone(), draft);

    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    assert!(outcome.is_saved());
    assert_eq!(outcome.treatment_id(), Some(7));
    let warnings = outcome.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].operation,
        AlarmOperation::Create {
            index: 1,
            time: "16:00".to_string()
        }
    );
    // All three creates were attempted
    assert_eq!(h.transport.call_count(), 4);
}

#[tokio::test]
async fn test_edit_mode_deletes_then_recreates_in_order() {
    let h = logged_in();

    // Hydration
    h.transport.reply(
        HttpMethod::Get,
        "/treatments",
        200,
        json!([treatment_json(5, "2026-10-18", Some("2026-10-27"))]),
    );
    h.transport.reply(
        HttpMethod::Get,
        "/treatments/5/alarms",
        200,
        json!([alarm_json(100, "08:00"), alarm_json(101, "20:00")]),
    );

    let mut form = TreatmentFormState::new(h.client.clone());
    form.hydrate_from_existing(5).await.unwrap();
    assert_eq!(form.mode(), FormMode::Edit { treatment_id: 5 });

    // New draft list of three alarms
    form.draft_mut().generate_evenly_spaced(3).unwrap();

    // Save
    h.transport.reply(
        HttpMethod::Put,
        "/treatments/5",
        200,
        treatment_json(5, "2026-10-18", Some("2026-10-27")),
    );
    h.transport.reply(
        HttpMethod::Get,
        "/treatments/5/alarms",
        200,
        json!([alarm_json(100, "08:00"), alarm_json(101, "20:00")]),
    );
    h.transport
        .reply(HttpMethod::Delete, "/treatments/5/alarms/100", 500, json!({}));
    h.transport
        .reply_empty(HttpMethod::Delete, "/treatments/5/alarms/101", 204);
    for (id, time) in [(200, "08:00"), (201, "16:00"), (202, "00:00")] {
        h.transport
            .reply(HttpMethod::Post, "/treatments/5/alarms", 201, alarm_json(id, time));
    }

    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    let save_calls: Vec<String> = h.transport.calls().into_iter().skip(2).collect();
    assert_eq!(
        save_calls,
        vec![
            "PUT /treatments/5",
            "GET /treatments/5/alarms",
            "DELETE /treatments/5/alarms/100",
            "DELETE /treatments/5/alarms/101",
            "POST /treatments/5/alarms",
            "POST /treatments/5/alarms",
            "POST /treatments/5/alarms",
        ]
    );

    // Creates follow draft order
    let created_times: Vec<String> = h
        .transport
        .requests()
        .iter()
        .filter(|r| r.method == HttpMethod::Post)
        .map(|r| match &r.body {
            pillcare_interaction::RequestBody::Json(body) => body["time"].as_str().unwrap().to_string(),
            other => panic!("unexpected body: {other:?}"),
        })
        .collect();
    assert_eq!(created_times, vec!["08:00", "16:00", "00:00"]);

    match outcome {
        SaveOutcome::SavedWithAlarmWarnings {
            treatment_id,
            warnings,
        } => {
            assert_eq!(treatment_id, 5);
            assert_eq!(warnings.len(), 1);
            assert_eq!(warnings[0].operation, AlarmOperation::Delete { alarm_id: 100 });
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_edit_mode_list_failure_still_creates_alarms() {
    let h = logged_in();
    h.transport.reply(
        HttpMethod::Get,
        "/treatments",
        200,
        json!([treatment_json(5, "2026-10-18", None)]),
    );
    h.transport
        .reply(HttpMethod::Get, "/treatments/5/alarms", 200, json!([alarm_json(1, "08:00")]));

    let mut form = TreatmentFormState::new(h.client.clone());
    form.hydrate_from_existing(5).await.unwrap();

    h.transport.reply(
        HttpMethod::Put,
        "/treatments/5",
        200,
        treatment_json(5, "2026-10-18", None),
    );
    h.transport.fail_network(HttpMethod::Get, "/treatments/5/alarms");
    h.transport
        .reply(HttpMethod::Post, "/treatments/5/alarms", 201, alarm_json(9, "08:00"));

    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    assert_eq!(outcome.treatment_id(), Some(5));
    assert_eq!(outcome.warnings()[0].operation, AlarmOperation::ListExisting);
    assert!(h.transport.calls().contains(&"POST /treatments/5/alarms".to_string()));
}

#[tokio::test]
async fn test_expired_session_during_alarm_create_clears_session() {
    let h = logged_in();
    h.transport.reply(
        HttpMethod::Post,
        "/treatments",
        201,
        treatment_json(42, "2026-10-18", Some("2026-10-27")),
    );
    h.transport
        .reply(HttpMethod::Post, "/treatments/42/alarms", 401, json!({"detail": "Token expired"}));

    let form = TreatmentFormState::with_draft(h.client.clone(), valid_draft());
    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    // The treatment stays saved; the 401 surfaces as an alarm warning
    assert_eq!(outcome.treatment_id(), Some(42));
    assert_eq!(
        outcome.warnings()[0].operation,
        AlarmOperation::Create {
            index: 0,
            time: "08:00".to_string()
        }
    );

    let error = outcome
        .reauthentication_error()
        .expect("401 on an alarm call requires re-authentication");
    assert!(error.is_session_expired());

    let usecase = SessionUseCase::new(h.client.clone());
    assert_eq!(usecase.handle_error(error), SessionAction::Reauthenticate);
    assert!(h.session.token().is_none());
    assert!(h.session.cached_user().is_none());
}

#[tokio::test]
async fn test_ordinary_alarm_failure_keeps_session() {
    let h = logged_in();
    h.transport.reply(
        HttpMethod::Post,
        "/treatments",
        201,
        treatment_json(42, "2026-10-18", Some("2026-10-27")),
    );
    h.transport
        .reply(HttpMethod::Post, "/treatments/42/alarms", 500, json!({}));

    let form = TreatmentFormState::with_draft(h.client.clone(), valid_draft());
    let outcome = SaveOrchestrator::new(h.client.clone())
        .save_as_of(&form, today())
        .await;

    assert_eq!(outcome.warnings().len(), 1);
    assert!(outcome.reauthentication_error().is_none());
    assert!(h.session.has_session());
}
