//! TOML configuration for logwarden.
//!
//! Values are layered: compiled-in defaults, then an optional TOML file
//! (`--config` or the `LOGWARDEN_CONFIG` environment variable), then
//! command-line flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::analysis::DEFAULT_FAILED_LOGIN_THRESHOLD;
use crate::report::export::DEFAULT_CSV_PATH;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "LOGWARDEN_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed-login threshold must be at least 1, got {0}")]
    InvalidThreshold(u32),
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Resolve the file layer: an explicit path wins, then `LOGWARDEN_CONFIG`,
    /// then compiled-in defaults. A named file that cannot be loaded is an
    /// error rather than a silent fallback.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(env_path) => Self::load(Path::new(&env_path)),
            None => {
                debug!("no config file given, using compiled-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(threshold) = overrides.threshold {
            self.detection.failed_login_threshold = threshold;
        }
        if let Some(path) = &overrides.csv_path {
            self.output.csv_path = path.clone();
        }
        if overrides.no_csv {
            self.output.write_csv = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detection.failed_login_threshold == 0 {
            return Err(ConfigError::InvalidThreshold(
                self.detection.failed_login_threshold,
            ));
        }
        Ok(())
    }
}

/// Values given on the command line. `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub threshold: Option<u32>,
    pub csv_path: Option<PathBuf>,
    pub no_csv: bool,
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Failed logins (HTTP 401) at which an IP is reported, inclusive.
    pub failed_login_threshold: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            failed_login_threshold: DEFAULT_FAILED_LOGIN_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
    pub write_csv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            write_csv: true,
        }
    }
}
