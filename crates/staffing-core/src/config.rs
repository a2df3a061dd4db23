//! Configuration loading and management
//!
//! # Configuration Hierarchy
//!
//! 1. Built-in defaults
//! 2. Global config: `<config dir>/staffing/config.toml`
//! 3. Project config: `.staffing/config.toml`
//! 4. Environment variables: `STAFFING_*`
//!
//! Later layers override earlier ones key by key. Only keys actually present
//! in a file override lower layers.
//!
//! # Example
//!
//! ```toml
//! [import]
//! policy = "fail-fast"
//! log_skipped = true
//!
//! [export]
//! pretty = false
//! ```

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT POLICY
// ═══════════════════════════════════════════════════════════════════════════

/// What a department import does with a record it cannot load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImportPolicy {
    /// Skip and log at debug level only
    Silent,
    /// Skip and log a warning per record
    #[default]
    Warn,
    /// Abort on the first bad record
    FailFast,
}

impl<'de> Deserialize<'de> for ImportPolicy {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl FromStr for ImportPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "silent" => Ok(Self::Silent),
            "warn" => Ok(Self::Warn),
            "fail-fast" | "failfast" | "fail" => Ok(Self::FailFast),
            _ => Err(Error::invalid_config(format!(
                "Invalid import policy: {s}. Must be one of: silent, warn, fail-fast"
            ))),
        }
    }
}

impl fmt::Display for ImportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent => write!(f, "silent"),
            Self::Warn => write!(f, "warn"),
            Self::FailFast => write!(f, "fail-fast"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CONFIG TYPES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportConfig {
    #[serde(default)]
    pub policy: ImportPolicy,
    /// Report skipped records through the log at all
    #[serde(default = "default_true")]
    pub log_skipped: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    /// Pretty-print exported JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            policy: ImportPolicy::Warn,
            log_skipped: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PARTIAL CONFIG (explicit-key merge)
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(default)]
    pub import: Option<PartialImportConfig>,
    #[serde(default)]
    pub export: Option<PartialExportConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialImportConfig {
    #[serde(default)]
    pub policy: Option<ImportPolicy>,
    #[serde(default)]
    pub log_skipped: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialExportConfig {
    #[serde(default)]
    pub pretty: Option<bool>,
}

impl Config {
    /// Merge partial config, only updating fields that are `Some(value)`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn merge_partial(&mut self, partial: PartialConfig) {
        if let Some(import) = partial.import {
            if let Some(policy) = import.policy {
                self.import.policy = policy;
            }
            if let Some(log_skipped) = import.log_skipped {
                self.import.log_skipped = log_skipped;
            }
        }
        if let Some(pretty) = partial.export.and_then(|export| export.pretty) {
            self.export.pretty = pretty;
        }
    }

    /// Apply environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if an environment variable value is invalid
    fn apply_env_vars(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("STAFFING_IMPORT_POLICY") {
            self.import.policy = value.parse().map_err(|e| {
                Error::invalid_config(format!("Invalid STAFFING_IMPORT_POLICY value: {e}"))
            })?;
        }

        if let Ok(value) = std::env::var("STAFFING_IMPORT_LOG_SKIPPED") {
            self.import.log_skipped = value.parse().map_err(|e| {
                Error::invalid_config(format!("Invalid STAFFING_IMPORT_LOG_SKIPPED value: {e}"))
            })?;
        }

        if let Ok(value) = std::env::var("STAFFING_EXPORT_PRETTY") {
            self.export.pretty = value.parse().map_err(|e| {
                Error::invalid_config(format!("Invalid STAFFING_EXPORT_PRETTY value: {e}"))
            })?;
        }

        Ok(())
    }

    /// Load the hierarchy from explicit file locations.
    ///
    /// Missing files are skipped. Environment overrides apply last.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for malformed TOML, unknown keys, or bad
    /// environment values, and `Error::Io` if an existing file cannot be read.
    pub fn load_from(global: Option<&Path>, project: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        for path in [global, project].into_iter().flatten() {
            if let Some(partial) = load_partial_toml_file(path)? {
                config.merge_partial(partial);
            }
        }

        config.apply_env_vars()?;
        Ok(config)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources.
///
/// # Errors
///
/// Returns error if:
/// - Config file is malformed TOML or has unknown keys
/// - An environment override cannot be parsed
pub fn load_config() -> Result<Config> {
    let global = global_config_path();
    let project = project_config_path();
    Config::load_from(global.as_deref(), project.as_deref())
}

/// Get path to project config file
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(".staffing/config.toml"))
}

/// Get path to global config file
fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "staffing")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Load a TOML file into a `PartialConfig`; `None` if the file does not exist.
///
/// # Errors
///
/// Returns `Error::Io` if the file exists but cannot be read and
/// `Error::InvalidConfig` if its contents are not a valid config.
pub fn load_partial_toml_file(path: &Path) -> Result<Option<PartialConfig>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };

    toml::from_str(&content).map(Some).map_err(|e| {
        Error::invalid_config(format!("Failed to parse config {}: {e}", path.display()))
    })
}
