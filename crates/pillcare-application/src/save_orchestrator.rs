//! Multi-step save of a treatment form.
//!
//! The backend models treatments and alarms as separate resources with no
//! transaction spanning both, so a save runs as a linear sequence:
//!
//! 1. **Validate**: field errors stop the save before any network call.
//! 2. **Persist treatment**: `POST` (create) or `PUT` (edit). A failure stops
//!    the save and nothing is committed.
//! 3. **Reconcile alarms**: create mode creates each alarm in list order.
//!    Edit mode deletes every persisted alarm, then creates every draft alarm
//!    in list order. Individual failures are logged, recorded as warnings and
//!    skipped; the treatment is never rolled back.
//! 4. **Complete**: `Saved`, or `SavedWithAlarmWarnings` if any alarm call
//!    failed.
//!
//! All calls are awaited one at a time.

use crate::treatment_form::{FormMode, TreatmentFormState, today};
use chrono::NaiveDate;
use pillcare_core::PillcareError;
use pillcare_core::treatment::{AlarmDraft, ValidationErrors};
use pillcare_interaction::ApiClient;

/// Alarm call that failed during reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum AlarmOperation {
    /// Listing the persisted alarms before deleting them (edit mode).
    ListExisting,
    Delete { alarm_id: i64 },
    Create { index: usize, time: String },
}

/// A failed alarm call; the treatment itself was saved.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmWarning {
    pub operation: AlarmOperation,
    pub error: PillcareError,
}

/// Terminal state of a save.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Validation failed; no network call was made.
    Invalid(ValidationErrors),
    /// The treatment could not be persisted; nothing was committed.
    Failed(PillcareError),
    /// Treatment and every alarm call succeeded.
    Saved { treatment_id: i64 },
    /// Treatment saved, but at least one alarm call failed.
    SavedWithAlarmWarnings {
        treatment_id: i64,
        warnings: Vec<AlarmWarning>,
    },
}

impl SaveOutcome {
    /// True when the treatment itself was persisted.
    pub fn is_saved(&self) -> bool {
        self.treatment_id().is_some()
    }

    pub fn treatment_id(&self) -> Option<i64> {
        match self {
            Self::Saved { treatment_id } | Self::SavedWithAlarmWarnings { treatment_id, .. } => {
                Some(*treatment_id)
            }
            _ => None,
        }
    }

    pub fn warnings(&self) -> &[AlarmWarning] {
        match self {
            Self::SavedWithAlarmWarnings { warnings, .. } => warnings,
            _ => &[],
        }
    }

    /// The first error that means the session is gone, whether it stopped
    /// the save or surfaced as an alarm warning after the treatment was
    /// persisted. Callers pass it to the session policy.
    pub fn reauthentication_error(&self) -> Option<&PillcareError> {
        match self {
            Self::Failed(error) => Some(error).filter(|e| e.requires_reauthentication()),
            _ => self
                .warnings()
                .iter()
                .map(|w| &w.error)
                .find(|e| e.requires_reauthentication()),
        }
    }
}

/// Drives the API calls that persist a treatment form.
#[derive(Clone)]
pub struct SaveOrchestrator {
    client: ApiClient,
}

impl SaveOrchestrator {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Saves the form, validating against today's date.
    pub async fn save(&self, form: &TreatmentFormState) -> SaveOutcome {
        self.save_as_of(form, today()).await
    }

    /// Saves the form, validating against `today`.
    pub async fn save_as_of(&self, form: &TreatmentFormState, today: NaiveDate) -> SaveOutcome {
        // 1. Validate
        let errors = form.validate_as_of(today);
        if !errors.is_valid() {
            tracing::debug!(
                "[SaveOrchestrator] Draft invalid: {:?}",
                errors.fields()
            );
            return SaveOutcome::Invalid(errors);
        }

        let draft = form.draft();
        let Some(payload) = draft.to_payload() else {
            return SaveOutcome::Failed(PillcareError::internal(
                "validated draft is missing required fields",
            ));
        };

        // 2. Persist treatment
        let persisted = match form.mode() {
            FormMode::Create => self.client.create_treatment(&payload).await,
            FormMode::Edit { treatment_id } => {
                self.client.update_treatment(treatment_id, &payload).await
            }
        };
        let treatment_id = match persisted {
            Ok(treatment) => treatment.id,
            Err(e) => {
                tracing::warn!("[SaveOrchestrator] Treatment save failed: {}", e);
                return SaveOutcome::Failed(e);
            }
        };
        tracing::info!("[SaveOrchestrator] Treatment {} saved", treatment_id);

        // 3. Reconcile alarms
        let mut warnings = Vec::new();
        if matches!(form.mode(), FormMode::Edit { .. }) {
            self.delete_existing_alarms(treatment_id, &mut warnings)
                .await;
        }
        self.create_alarms(treatment_id, &draft.alarms, &mut warnings)
            .await;

        // 4. Complete
        if warnings.is_empty() {
            SaveOutcome::Saved { treatment_id }
        } else {
            tracing::warn!(
                "[SaveOrchestrator] Treatment {} saved with {} alarm warnings",
                treatment_id,
                warnings.len()
            );
            SaveOutcome::SavedWithAlarmWarnings {
                treatment_id,
                warnings,
            }
        }
    }

    async fn delete_existing_alarms(&self, treatment_id: i64, warnings: &mut Vec<AlarmWarning>) {
        let existing = match self.client.list_alarms(treatment_id).await {
            Ok(existing) => existing,
            Err(error) => {
                tracing::warn!(
                    "[SaveOrchestrator] Could not list alarms of treatment {}: {}",
                    treatment_id,
                    error
                );
                warnings.push(AlarmWarning {
                    operation: AlarmOperation::ListExisting,
                    error,
                });
                return;
            }
        };

        for alarm in existing {
            if let Err(error) = self.client.delete_alarm(treatment_id, alarm.id).await {
                tracing::warn!(
                    "[SaveOrchestrator] Failed to delete alarm {}: {}",
                    alarm.id,
                    error
                );
                warnings.push(AlarmWarning {
                    operation: AlarmOperation::Delete { alarm_id: alarm.id },
                    error,
                });
            }
        }
    }

    async fn create_alarms(
        &self,
        treatment_id: i64,
        alarms: &[AlarmDraft],
        warnings: &mut Vec<AlarmWarning>,
    ) {
        for (index, alarm) in alarms.iter().enumerate() {
            if let Err(error) = self
                .client
                .create_alarm(treatment_id, &alarm.to_payload())
                .await
            {
                tracing::warn!(
                    "[SaveOrchestrator] Failed to create alarm {} at {}: {}",
                    index,
                    alarm.time,
                    error
                );
                warnings.push(AlarmWarning {
                    operation: AlarmOperation::Create {
                        index,
                        time: alarm.time.clone(),
                    },
                    error,
                });
            }
        }
    }
}
