//! Unified path management for PillCare client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/pillcare/          # Config directory
//! ├── config.toml              # Client configuration
//! └── session.toml             # Persisted bearer token + cached user
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "pillcare";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the PillCare client.
pub struct PillcarePaths;

impl PillcarePaths {
    /// Returns the PillCare configuration directory (e.g. `~/.config/pillcare/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session.
    ///
    /// The file holds a bearer token; it is written with mode 600 on Unix.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = PillcarePaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        // Verify it's under config_dir
        let config_dir = PillcarePaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
        assert!(config_dir.ends_with("pillcare"));
    }

    #[test]
    fn test_session_file() {
        let session_file = PillcarePaths::session_file().unwrap();
        assert!(session_file.ends_with("session.toml"));
        let config_dir = PillcarePaths::config_dir().unwrap();
        assert!(session_file.starts_with(&config_dir));
    }
}
