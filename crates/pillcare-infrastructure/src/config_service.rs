//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/pillcare/config.toml` and
//! applies environment overrides on top.
//!
//! Priority: environment variables > config.toml > built-in defaults

use crate::paths::PillcarePaths;
use crate::storage::AtomicTomlFile;
use pillcare_core::config::{ClientConfig, RootConfig};
use pillcare_core::{PillcareError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

pub const ENV_API_URL: &str = "PILLCARE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "PILLCARE_TIMEOUT_SECS";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Self {
        Self {
            path: PillcarePaths::config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading a specific config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the effective client configuration, loading it on first use.
    ///
    /// A malformed file is an error; a missing file means defaults.
    pub fn client_config(&self) -> Result<ClientConfig> {
        if let Ok(read_lock) = self.config.read()
            && let Some(ref cached) = *read_lock
        {
            return Ok(cached.clone());
        }

        let mut config = self.load_file()?.client;
        apply_overrides(&mut config, |key| std::env::var(key).ok())?;

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(config.clone());
        }
        Ok(config)
    }

    fn load_file(&self) -> Result<RootConfig> {
        let Some(path) = &self.path else {
            tracing::debug!("[ConfigService] No config directory, using defaults");
            return Ok(RootConfig::default());
        };

        let file = AtomicTomlFile::<RootConfig>::new(path.clone());
        let root = file.load().map_err(|e| {
            PillcareError::config(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Ok(root.unwrap_or_default())
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies environment overrides using `lookup` to read variables.
fn apply_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url.trim().to_string();
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.request_timeout_secs = raw.trim().parse().map_err(|_| {
            PillcareError::config(format!("{ENV_TIMEOUT_SECS} must be a number of seconds, got '{raw}'"))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillcare_core::config::DEFAULT_API_BASE_URL;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let root = service.load_file().unwrap();
        assert_eq!(root.client.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_file_values_are_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[client]\napi_base_url = \"https://api.pillcare.test\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let root = ConfigService::with_path(path).load_file().unwrap();
        assert_eq!(root.client.api_base_url, "https://api.pillcare.test");
        assert_eq!(root.client.request_timeout_secs, 5);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[client\n").unwrap();

        let err = ConfigService::with_path(path).load_file().unwrap_err();
        assert!(matches!(err, PillcareError::Config(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = ClientConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[(ENV_API_URL, " https://staging.pillcare.test "), (ENV_TIMEOUT_SECS, "12")]),
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://staging.pillcare.test");
        assert_eq!(config.request_timeout_secs, 12);
    }

    #[test]
    fn test_invalid_timeout_override() {
        let mut config = ClientConfig::default();
        let err = apply_overrides(&mut config, lookup_from(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }
}
