//! File-backed session store.
//!
//! Persists the bearer token and cached user to `session.toml` so a restart
//! recovers the same session until it is explicitly cleared.

use crate::paths::PillcarePaths;
use crate::storage::AtomicTomlFile;
use pillcare_core::session::{Session, SessionStore, UserProfile};
use pillcare_core::{PillcareError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;

/// On-disk shape of a session. Token and user are written together or not
/// at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    user: UserProfile,
}

/// Session store backed by an atomically written TOML file.
///
/// Reads are served from memory. Writes update memory first, then disk;
/// a disk failure is logged and the in-memory session stays authoritative
/// for the rest of the process.
pub struct FileSessionStore {
    file: AtomicTomlFile<PersistedSession>,
    session: RwLock<Session>,
}

impl FileSessionStore {
    /// Opens the store at `path` and recovers any persisted session.
    ///
    /// A corrupt or unreadable file is treated as "no session".
    pub fn init(path: PathBuf) -> Self {
        let file: AtomicTomlFile<PersistedSession> = AtomicTomlFile::new(path).private();

        let session = match file.load() {
            Ok(Some(persisted)) => {
                tracing::debug!(
                    "[FileSessionStore] Recovered session for user {}",
                    persisted.user.id
                );
                Session::new(persisted.token, persisted.user)
            }
            Ok(None) => Session::default(),
            Err(e) => {
                tracing::warn!(
                    "[FileSessionStore] Ignoring unreadable session file {}: {}",
                    file.path().display(),
                    e
                );
                Session::default()
            }
        };

        Self {
            file,
            session: RwLock::new(session),
        }
    }

    /// Opens the store at the default location (`~/.config/pillcare/session.toml`).
    pub fn new_default() -> Result<Self> {
        let path = PillcarePaths::session_file().map_err(|e| PillcareError::config(e.to_string()))?;
        Ok(Self::init(path))
    }

    fn persist(&self, persisted: Option<PersistedSession>) {
        if let Err(e) = self.file.replace(persisted.as_ref()) {
            tracing::warn!(
                "[FileSessionStore] Failed to persist session to {}: {}",
                self.file.path().display(),
                e
            );
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.session.read().ok().and_then(|s| s.token.clone())
    }

    fn set_session(&self, token: String, user: UserProfile) {
        if let Ok(mut session) = self.session.write() {
            *session = Session::new(token.clone(), user.clone());
        }
        self.persist(Some(PersistedSession { token, user }));
    }

    fn clear_session(&self) {
        if let Ok(mut session) = self.session.write() {
            *session = Session::default();
        }
        self.persist(None);
    }

    fn cached_user(&self) -> Option<UserProfile> {
        self.session.read().ok().and_then(|s| s.cached_user.clone())
    }
}
