//! Treatment and alarm domain models.
//!
//! Drafts are the editable client-side representation; `Treatment` and
//! `AlarmRecord` mirror what the backend persists.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default number of days for a new treatment.
pub const DEFAULT_DURATION_DAYS: i32 = 7;

/// Editable alarm inside a treatment draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmDraft {
    /// Server-assigned id, present only once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Time of day, `HH:MM` in 24h format.
    pub time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub visual_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl AlarmDraft {
    /// Creates an unsaved alarm with every flag on.
    pub fn new(time: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            time: time.into(),
            description: description.into(),
            is_active: true,
            sound_enabled: true,
            visual_enabled: true,
        }
    }

    /// Body for `POST /treatments/{id}/alarms`.
    pub fn to_payload(&self) -> AlarmPayload {
        AlarmPayload {
            time: self.time.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
            sound_enabled: self.sound_enabled,
            visual_enabled: self.visual_enabled,
        }
    }
}

impl From<AlarmRecord> for AlarmDraft {
    /// Missing flags on the persisted record default to `true`.
    fn from(record: AlarmRecord) -> Self {
        Self {
            id: Some(record.id),
            time: record.time,
            description: record.description.unwrap_or_default(),
            is_active: record.is_active.unwrap_or(true),
            sound_enabled: record.sound_enabled.unwrap_or(true),
            visual_enabled: record.visual_enabled.unwrap_or(true),
        }
    }
}

/// The composed, not-yet-persisted treatment.
///
/// Numeric fields are signed so out-of-range user input can be represented
/// and reported by validation instead of being rejected at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentDraft {
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub medication_id: Option<i64>,
    #[serde(default)]
    pub dosage: String,
    /// Doses per day.
    #[serde(default = "default_frequency")]
    pub frequency: i32,
    #[serde(default = "default_duration_days")]
    pub duration_days: i32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub alarms: Vec<AlarmDraft>,
}

fn default_frequency() -> i32 {
    1
}

fn default_duration_days() -> i32 {
    DEFAULT_DURATION_DAYS
}

impl TreatmentDraft {
    /// Empty defaults for create mode, starting on `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            patient_id: None,
            medication_id: None,
            dosage: String::new(),
            frequency: default_frequency(),
            duration_days: DEFAULT_DURATION_DAYS,
            start_date: Some(today),
            instructions: String::new(),
            notes: String::new(),
            alarms: Vec::new(),
        }
    }

    /// Last day of the course: `start + duration_days - 1`.
    ///
    /// Returns `None` when there is no start date or the arithmetic
    /// overflows the calendar.
    pub fn end_date(&self) -> Option<NaiveDate> {
        let start = self.start_date?;
        start.checked_add_signed(Duration::days(i64::from(self.duration_days) - 1))
    }

    /// Scalar fields sent to `POST /treatments` / `PUT /treatments/{id}`.
    ///
    /// Returns `None` when a required reference is missing; callers validate
    /// first so this only happens on misuse.
    pub fn to_payload(&self) -> Option<TreatmentPayload> {
        Some(TreatmentPayload {
            patient_id: self.patient_id?,
            medication_id: self.medication_id?,
            dosage: self.dosage.trim().to_string(),
            frequency: self.frequency,
            start_date: self.start_date?,
            end_date: self.end_date()?,
            instructions: non_empty(&self.instructions),
            notes: non_empty(&self.notes),
        })
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Wire body for creating or updating a treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPayload {
    pub patient_id: i64,
    pub medication_id: i64,
    pub dosage: String,
    pub frequency: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub instructions: Option<String>,
    pub notes: Option<String>,
}

/// Wire body for creating an alarm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmPayload {
    pub time: String,
    pub description: String,
    pub is_active: bool,
    pub sound_enabled: bool,
    pub visual_enabled: bool,
}

/// A treatment as persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: i64,
    pub patient_id: i64,
    pub medication_id: i64,
    #[serde(default)]
    pub dosage: String,
    #[serde(default = "default_frequency")]
    pub frequency: i32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Treatment {
    /// Inclusive course length, when the end date is known.
    pub fn duration_days(&self) -> Option<i32> {
        let end = self.end_date?;
        let days = (end - self.start_date).num_days() + 1;
        i32::try_from(days).ok()
    }
}

/// An alarm as persisted by the backend. Older records may omit flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmRecord {
    pub id: i64,
    #[serde(default)]
    pub treatment_id: Option<i64>,
    pub time: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sound_enabled: Option<bool>,
    #[serde(default)]
    pub visual_enabled: Option<bool>,
}
