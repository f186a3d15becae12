//! Read-only reference records used to populate selectors.

use serde::{Deserialize, Serialize};

/// A patient under care.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<chrono::NaiveDate>,
}

/// A medication from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dosage_form: Option<String>,
    #[serde(default)]
    pub strength: Option<String>,
}

/// Where the medication list of a form came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferenceDataSource {
    /// Fetched from `GET /medications`.
    #[default]
    Remote,
    /// The backend does not expose the endpoint; the builtin catalog is in use.
    BuiltinFallback,
}

/// Reference lists loaded for one form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub patients: Vec<Patient>,
    pub medications: Vec<Medication>,
    pub medication_source: ReferenceDataSource,
}

impl ReferenceData {
    pub fn is_degraded(&self) -> bool {
        self.medication_source == ReferenceDataSource::BuiltinFallback
    }
}
