use chrono::Local;
use colored::Colorize;
use pillcare_application::{AlarmOperation, SaveOrchestrator, SaveOutcome, TreatmentFormState};
use pillcare_core::treatment::TreatmentDraft;
use pillcare_core::{PillcareError, Result};
use pillcare_interaction::ApiClient;
use std::path::Path;

pub async fn create(client: &ApiClient, file: &Path) -> Result<()> {
    let draft = load_draft(file)?;
    let form = TreatmentFormState::with_draft(client.clone(), draft);
    save(client, &form).await
}

pub async fn edit(client: &ApiClient, id: i64, file: Option<&Path>) -> Result<()> {
    let mut form = TreatmentFormState::new(client.clone());
    form.hydrate_from_existing(id).await?;

    if let Some(file) = file {
        *form.draft_mut() = load_draft(file)?;
    }
    save(client, &form).await
}

fn load_draft(file: &Path) -> Result<TreatmentDraft> {
    let content = std::fs::read_to_string(file)?;
    parse_draft(&content)
}

/// Parses a TOML draft. `start_date` may be a native TOML date or a quoted
/// `YYYY-MM-DD` string; when absent it is today.
fn parse_draft(content: &str) -> Result<TreatmentDraft> {
    let mut table: toml::Table = toml::from_str(content)?;

    let native_date = match table.get("start_date") {
        Some(toml::Value::Datetime(date)) => Some(date.to_string()),
        _ => None,
    };
    if let Some(date) = native_date {
        table.insert("start_date".to_string(), toml::Value::String(date));
    }

    let mut draft: TreatmentDraft = toml::Value::Table(table).try_into()?;
    if draft.start_date.is_none() {
        draft.start_date = Some(Local::now().date_naive());
    }
    Ok(draft)
}

/// Runs the save and prints its outcome.
///
/// A session failure is returned as an error even when the treatment was
/// saved, so the caller applies the session policy to it.
async fn save(client: &ApiClient, form: &TreatmentFormState) -> Result<()> {
    let outcome = SaveOrchestrator::new(client.clone()).save(form).await;

    match &outcome {
        SaveOutcome::Invalid(errors) => {
            eprintln!("{}", "Treatment not saved, fix these fields:".red());
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field, message);
            }
            return Err(PillcareError::validation(
                "treatment",
                format!("{} invalid field(s)", errors.len()),
            ));
        }
        SaveOutcome::Failed(error) => return Err(error.clone()),
        SaveOutcome::Saved { treatment_id } => {
            println!("{}", format!("Treatment {} saved", treatment_id).green());
        }
        SaveOutcome::SavedWithAlarmWarnings {
            treatment_id,
            warnings,
        } => {
            println!("{}", format!("Treatment {} saved", treatment_id).green());
            eprintln!("{}", "Some alarms could not be updated:".yellow());
            for warning in warnings {
                let what = match &warning.operation {
                    AlarmOperation::ListExisting => "list existing alarms".to_string(),
                    AlarmOperation::Delete { alarm_id } => format!("delete alarm {}", alarm_id),
                    AlarmOperation::Create { index, time } => {
                        format!("create alarm #{} at {}", index + 1, time)
                    }
                };
                eprintln!("  {}: {}", what, warning.error);
            }
        }
    }

    match outcome.reauthentication_error() {
        Some(error) => Err(error.clone()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pillcare_core::session::{InMemorySessionStore, UserProfile};
    use pillcare_interaction::HttpMethod;
    use pillcare_interaction::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    const DRAFT: &str = r#"
patient_id = 10
medication_id = 20
dosage = "1 tablet"
frequency = 1
duration_days = 3

[[alarms]]
time = "08:00"
description = "Breakfast"
"#;

    fn client() -> (ApiClient, Arc<ScriptedTransport>) {
        let user = UserProfile {
            id: 1,
            email: "carer@pillcare.test".to_string(),
            full_name: None,
            role: None,
        };
        let transport = Arc::new(ScriptedTransport::new());
        let session = Arc::new(InMemorySessionStore::with_session("tok-cli", user));
        (ApiClient::new(transport.clone(), session), transport)
    }

    #[test]
    fn test_parse_draft_accepts_native_and_quoted_dates() {
        let expected = NaiveDate::from_ymd_opt(2030, 1, 15);

        let native = parse_draft(&format!("start_date = 2030-01-15\n{DRAFT}")).unwrap();
        assert_eq!(native.start_date, expected);

        let quoted = parse_draft(&format!("start_date = \"2030-01-15\"\n{DRAFT}")).unwrap();
        assert_eq!(quoted.start_date, expected);
    }

    #[test]
    fn test_parse_draft_defaults_start_date_to_today() {
        let draft = parse_draft(DRAFT).unwrap();
        assert_eq!(draft.start_date, Some(Local::now().date_naive()));
        assert_eq!(draft.alarms.len(), 1);
        assert!(draft.alarms[0].sound_enabled);
    }

    #[tokio::test]
    async fn test_session_failure_on_alarm_is_returned_after_save() {
        let (client, transport) = client();
        transport.reply(
            HttpMethod::Post,
            "/treatments",
            201,
            json!({
                "id": 42, "patient_id": 10, "medication_id": 20, "dosage": "1 tablet",
                "frequency": 1, "start_date": "2030-01-15", "end_date": "2030-01-17"
            }),
        );
        transport.reply(HttpMethod::Post, "/treatments/42/alarms", 401, json!({}));

        let draft = parse_draft(DRAFT).unwrap();
        let form = TreatmentFormState::with_draft(client.clone(), draft);
        let err = save(&client, &form).await.unwrap_err();

        assert!(err.requires_reauthentication());
        assert_eq!(
            transport.calls(),
            vec!["POST /treatments", "POST /treatments/42/alarms"]
        );
    }

    #[tokio::test]
    async fn test_plain_alarm_failure_is_not_an_error() {
        let (client, transport) = client();
        transport.reply(
            HttpMethod::Post,
            "/treatments",
            201,
            json!({
                "id": 43, "patient_id": 10, "medication_id": 20, "dosage": "1 tablet",
                "frequency": 1, "start_date": "2030-01-15"
            }),
        );
        transport.reply(HttpMethod::Post, "/treatments/43/alarms", 500, json!({}));

        let draft = parse_draft(DRAFT).unwrap();
        let form = TreatmentFormState::with_draft(client.clone(), draft);
        assert!(save(&client, &form).await.is_ok());
    }
}
