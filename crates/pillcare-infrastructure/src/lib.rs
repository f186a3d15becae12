//! Infrastructure layer for the PillCare client.
//!
//! File-system backed implementations of the domain contracts: the
//! persisted session store and configuration loading.

pub mod config_service;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use config_service::ConfigService;
pub use session_store::FileSessionStore;
