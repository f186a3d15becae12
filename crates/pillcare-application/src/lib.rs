//! Application layer for the PillCare client.
//!
//! Use cases that coordinate the domain model with the API client: the
//! treatment form, its multi-step save, and the session workflow.

pub mod save_orchestrator;
pub mod session_usecase;
pub mod treatment_form;

pub use save_orchestrator::{AlarmOperation, AlarmWarning, SaveOrchestrator, SaveOutcome};
pub use session_usecase::{SessionAction, SessionUseCase};
pub use treatment_form::{FormMode, TreatmentFormState};
