//! Run configuration loading.
//!
//! Settings come from up to three layers: command-line/environment values,
//! a YAML file, and built-in defaults. The default file lives in the
//! platform-specific config directory:
//! - Linux: ~/.config/restprobe/config.yaml
//! - macOS: ~/Library/Application Support/restprobe/config.yaml
//! - Windows: %APPDATA%/restprobe/config.yaml

use std::path::{Path, PathBuf};

use restprobe_domain::{
    Credential, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DomainError, RunConfig,
};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid YAML for this schema.
    #[error("cannot parse config file {}: {source}", path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// The merged settings failed validation.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// One layer of optional settings.
///
/// The YAML file deserializes into this, and the CLI builds one from its
/// flags and environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    /// Server base URL.
    pub base_url: Option<String>,
    /// Username for authenticated cases.
    pub username: Option<String>,
    /// Password for authenticated cases.
    pub password: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Stop after the first case that does not pass.
    pub fail_fast: Option<bool>,
}

impl PartialConfig {
    /// Returns a layer where values set in `self` win over `lower`.
    #[must_use]
    pub fn over(self, lower: Self) -> Self {
        Self {
            base_url: self.base_url.or(lower.base_url),
            username: self.username.or(lower.username),
            password: self.password.or(lower.password),
            timeout_secs: self.timeout_secs.or(lower.timeout_secs),
            fail_fast: self.fail_fast.or(lower.fail_fast),
        }
    }

    /// Fills remaining gaps with defaults and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value fails validation.
    pub fn resolve(self) -> Result<RunConfig, ConfigError> {
        let defaults = Credential::default();
        let credential = Credential::new(
            self.username.unwrap_or(defaults.username),
            self.password.unwrap_or(defaults.password),
        );

        Ok(RunConfig::new(
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            credential,
            self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            self.fail_fast.unwrap_or(false),
        )?)
    }
}

/// Loads the YAML config layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigRepository {
    path: Option<PathBuf>,
}

impl ConfigRepository {
    /// Uses the default file in the platform config directory, if present.
    #[must_use]
    pub const fn new() -> Self {
        Self { path: None }
    }

    /// Uses an explicit file, which must exist.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the default config file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("restprobe").join("config.yaml"))
    }

    /// Loads the file layer.
    ///
    /// A missing default file yields an empty layer; a missing explicit file
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub async fn load(&self) -> Result<PartialConfig, ConfigError> {
        if let Some(path) = &self.path {
            return Self::read(path).await;
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::read(&path).await,
            _ => Ok(PartialConfig::default()),
        }
    }

    async fn read(path: &Path) -> Result<PartialConfig, ConfigError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        if content.trim().is_empty() {
            return Ok(PartialConfig::default());
        }

        tracing::debug!(path = %path.display(), "loaded config file");
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
