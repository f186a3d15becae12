//! Treatment domain module.
//!
//! - `model`: drafts, persisted records and wire payloads
//! - `validation`: draft validation rules
//! - `alarm_editor`: alarm list mutations and the evenly-spaced generator

mod alarm_editor;
mod model;
mod validation;

pub use alarm_editor::{AlarmFieldUpdate, FIRST_DOSE_HOUR, evenly_spaced_alarms};
pub use model::{
    AlarmDraft, AlarmPayload, AlarmRecord, DEFAULT_DURATION_DAYS, Treatment, TreatmentDraft,
    TreatmentPayload,
};
pub use validation::{
    DraftField, MAX_DURATION_DAYS, MAX_FREQUENCY, MAX_TEXT_LEN, MIN_DURATION_DAYS, MIN_FREQUENCY,
    ValidationErrors, validate_draft,
};
