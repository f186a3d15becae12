//! Domain layer of the PillCare 360 client.
//!
//! Holds the models, the error taxonomy, the session store contract and the
//! pure treatment workflow pieces (validation, alarm list editing). Nothing
//! in this crate performs I/O.

pub mod config;
pub mod error;
pub mod reference;
pub mod session;
pub mod treatment;

// Re-export common error type
pub use error::{AuthFailureKind, PillcareError, Result};
