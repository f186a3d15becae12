//! Reference data (patients, medications) for treatment forms.

mod builtin;
mod model;

pub use builtin::builtin_medications;
pub use model::{Medication, Patient, ReferenceData, ReferenceDataSource};
