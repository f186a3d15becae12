//! Treatment form state.
//!
//! Owns one `TreatmentDraft`, knows whether it is creating or editing, and
//! holds the reference lists that populate the patient and medication
//! selectors. Alarm list edits go through the draft (`draft_mut()`), which
//! carries the alarm editor operations.

use chrono::{Local, NaiveDate};
use pillcare_core::reference::{
    Medication, ReferenceData, ReferenceDataSource, builtin_medications,
};
use pillcare_core::treatment::{
    AlarmDraft, DEFAULT_DURATION_DAYS, TreatmentDraft, ValidationErrors,
};
use pillcare_core::{PillcareError, Result};
use pillcare_interaction::ApiClient;

/// Whether the form creates a new treatment or edits a persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { treatment_id: i64 },
}

/// Create/edit form for one treatment and its alarms.
pub struct TreatmentFormState {
    client: ApiClient,
    mode: FormMode,
    draft: TreatmentDraft,
    reference: ReferenceData,
}

impl TreatmentFormState {
    /// Creates a form in create mode with empty defaults starting today.
    pub fn new(client: ApiClient) -> Self {
        Self::with_draft(client, TreatmentDraft::new(today()))
    }

    /// Creates a form in create mode around an existing draft.
    pub fn with_draft(client: ApiClient, draft: TreatmentDraft) -> Self {
        Self {
            client,
            mode: FormMode::Create,
            draft,
            reference: ReferenceData::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &TreatmentDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TreatmentDraft {
        &mut self.draft
    }

    pub fn reference_data(&self) -> &ReferenceData {
        &self.reference
    }

    /// Fetches patients and medications for the selectors.
    ///
    /// If the medication endpoint is unavailable (404/405) the builtin
    /// catalog is used and the source is recorded as
    /// `ReferenceDataSource::BuiltinFallback`. Every other failure
    /// propagates.
    pub async fn load_reference_data(&mut self) -> Result<&ReferenceData> {
        let patients = self.client.list_patients().await?;
        let (medications, medication_source) = self.load_medications().await?;

        tracing::debug!(
            "[TreatmentForm] Loaded {} patients, {} medications ({:?})",
            patients.len(),
            medications.len(),
            medication_source
        );

        self.reference = ReferenceData {
            patients,
            medications,
            medication_source,
        };
        Ok(&self.reference)
    }

    async fn load_medications(&self) -> Result<(Vec<Medication>, ReferenceDataSource)> {
        match self.client.list_medications().await {
            Ok(medications) => Ok((medications, ReferenceDataSource::Remote)),
            Err(e) if e.is_endpoint_unavailable() => {
                tracing::warn!(
                    "[TreatmentForm] Medication catalog unavailable ({}), using builtin catalog",
                    e
                );
                Ok((builtin_medications(), ReferenceDataSource::BuiltinFallback))
            }
            Err(e) => Err(e),
        }
    }

    /// Loads a persisted treatment and its alarms into the draft and
    /// switches to edit mode.
    ///
    /// The treatment is looked up among the ones the caller can see; an
    /// unknown id is `NotFound`. On error the form is left unchanged.
    pub async fn hydrate_from_existing(&mut self, treatment_id: i64) -> Result<()> {
        let treatment = self
            .client
            .list_treatments()
            .await?
            .into_iter()
            .find(|t| t.id == treatment_id)
            .ok_or_else(|| PillcareError::not_found("treatment", treatment_id))?;

        let alarms: Vec<AlarmDraft> = self
            .client
            .list_alarms(treatment_id)
            .await?
            .into_iter()
            .map(AlarmDraft::from)
            .collect();

        tracing::info!(
            "[TreatmentForm] Editing treatment {} with {} alarms",
            treatment_id,
            alarms.len()
        );

        self.draft = TreatmentDraft {
            patient_id: Some(treatment.patient_id),
            medication_id: Some(treatment.medication_id),
            dosage: treatment.dosage.clone(),
            frequency: treatment.frequency,
            duration_days: treatment.duration_days().unwrap_or(DEFAULT_DURATION_DAYS),
            start_date: Some(treatment.start_date),
            instructions: treatment.instructions.unwrap_or_default(),
            notes: treatment.notes.unwrap_or_default(),
            alarms,
        };
        self.mode = FormMode::Edit { treatment_id };
        Ok(())
    }

    /// Validates the draft against today's date.
    pub fn validate(&self) -> ValidationErrors {
        self.validate_as_of(today())
    }

    pub fn validate_as_of(&self, today: NaiveDate) -> ValidationErrors {
        self.draft.validate_as_of(today)
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
