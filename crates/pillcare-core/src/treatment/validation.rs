//! Validation rules for a treatment draft.
//!
//! Rules are evaluated as a unit and produce at most one message per field.
//! The date rules take `today` explicitly so they stay pure.

use super::model::TreatmentDraft;
use chrono::{Months, NaiveDate};
use std::collections::{BTreeMap, HashSet};
use strum::{AsRefStr, Display};

pub const MIN_FREQUENCY: i32 = 1;
pub const MAX_FREQUENCY: i32 = 24;
pub const MIN_DURATION_DAYS: i32 = 1;
pub const MAX_DURATION_DAYS: i32 = 365;
pub const MIN_DOSAGE_LEN: usize = 2;
pub const MAX_TEXT_LEN: usize = 1000;
/// Furthest a treatment may end, counted from today.
pub const MAX_END_DATE_MONTHS: u32 = 24;

/// Draft fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DraftField {
    Patient,
    Medication,
    Dosage,
    Frequency,
    DurationDays,
    StartDate,
    Alarms,
    Instructions,
    Notes,
}

/// Field → message map produced by [`validate_draft`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<DraftField, String>);

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> Vec<DraftField> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

impl TreatmentDraft {
    /// Validates this draft as of `today`.
    pub fn validate_as_of(&self, today: NaiveDate) -> ValidationErrors {
        validate_draft(self, today)
    }
}

/// Validates `draft` as of `today`.
pub fn validate_draft(draft: &TreatmentDraft, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.patient_id.is_none() {
        errors.insert(DraftField::Patient, "Please select a patient");
    }

    if draft.medication_id.is_none() {
        errors.insert(DraftField::Medication, "Please select a medication");
    }

    let dosage = draft.dosage.trim();
    if dosage.is_empty() {
        errors.insert(DraftField::Dosage, "Dosage is required");
    } else if dosage.chars().count() < MIN_DOSAGE_LEN {
        errors.insert(
            DraftField::Dosage,
            format!("Dosage must be at least {MIN_DOSAGE_LEN} characters"),
        );
    }

    if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&draft.frequency) {
        errors.insert(
            DraftField::Frequency,
            format!("Frequency must be between {MIN_FREQUENCY} and {MAX_FREQUENCY} doses per day"),
        );
    }

    if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&draft.duration_days) {
        errors.insert(
            DraftField::DurationDays,
            format!("Duration must be between {MIN_DURATION_DAYS} and {MAX_DURATION_DAYS} days"),
        );
    }

    match draft.start_date {
        None => errors.insert(DraftField::StartDate, "Start date is required"),
        Some(start) if start < today => {
            errors.insert(DraftField::StartDate, "Start date cannot be in the past")
        }
        Some(_) => {
            // Only meaningful once the duration itself is in range.
            if !errors.contains(DraftField::DurationDays) && exceeds_ceiling(draft, today) {
                errors.insert(
                    DraftField::StartDate,
                    "Treatment duration is excessive: it would end more than 2 years from today",
                );
            }
        }
    }

    if draft.alarms.is_empty() {
        errors.insert(DraftField::Alarms, "At least one alarm is required");
    } else if has_duplicate_times(draft) {
        errors.insert(DraftField::Alarms, "Two alarms cannot share the same time");
    }

    if draft.instructions.chars().count() > MAX_TEXT_LEN {
        errors.insert(
            DraftField::Instructions,
            format!("Instructions cannot exceed {MAX_TEXT_LEN} characters"),
        );
    }

    if draft.notes.chars().count() > MAX_TEXT_LEN {
        errors.insert(
            DraftField::Notes,
            format!("Notes cannot exceed {MAX_TEXT_LEN} characters"),
        );
    }

    errors
}

fn exceeds_ceiling(draft: &TreatmentDraft, today: NaiveDate) -> bool {
    let Some(ceiling) = today.checked_add_months(Months::new(MAX_END_DATE_MONTHS)) else {
        return false;
    };
    match draft.end_date() {
        Some(end) => end > ceiling,
        None => true,
    }
}

/// Raw `HH:MM` string comparison; "8:00" and "08:00" are different times.
fn has_duplicate_times(draft: &TreatmentDraft) -> bool {
    let mut seen = HashSet::new();
    draft.alarms.iter().any(|alarm| !seen.insert(alarm.time.as_str()))
}
