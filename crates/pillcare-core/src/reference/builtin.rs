//! Builtin medication catalog.
//!
//! Only used when the backend answers `GET /medications` with 404 or 405, so
//! treatment forms stay usable against deployments without a catalog
//! endpoint.

use super::model::Medication;

const BUILTIN_CATALOG: &[(i64, &str, &str, &str)] = &[
    (1, "Paracetamol", "Tablet", "500 mg"),
    (2, "Ibuprofen", "Tablet", "400 mg"),
    (3, "Amoxicillin", "Capsule", "500 mg"),
    (4, "Metformin", "Tablet", "850 mg"),
    (5, "Omeprazole", "Capsule", "20 mg"),
    (6, "Losartan", "Tablet", "50 mg"),
];

/// Returns the builtin catalog.
pub fn builtin_medications() -> Vec<Medication> {
    BUILTIN_CATALOG
        .iter()
        .map(|(id, name, form, strength)| Medication {
            id: *id,
            name: (*name).to_string(),
            description: None,
            dosage_form: Some((*form).to_string()),
            strength: Some((*strength).to_string()),
        })
        .collect()
}
