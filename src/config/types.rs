//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::InstallMethod;
use crate::error::ActivateResult;

use super::loader::{self, ConfigWarning};

/// `[activate]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateConfig {
    /// Unset means the default of the chosen service directory
    #[serde(default)]
    pub install_method: Option<InstallMethod>,

    /// Seconds to wait for a stopped service to unload
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds to wait for a started service to load; unset means `timeout`
    #[serde(default)]
    pub bootstrap_timeout: Option<u64>,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for ActivateConfig {
    fn default() -> Self {
        Self {
            install_method: None,
            timeout: default_timeout(),
            bootstrap_timeout: None,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    1000
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    /// Emit NDJSON events on stdout instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub activate: ActivateConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ActivateResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys)
    pub fn load_with_warnings(path: &Path) -> ActivateResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `explicit` if given, else the user config file if present,
    /// else defaults. Environment overrides are applied last.
    pub fn resolve(explicit: Option<&Path>) -> ActivateResult<(Self, Vec<ConfigWarning>)> {
        loader::resolve(explicit)
    }

    /// Apply environment variable overrides (LAUNCHD_ACTIVATE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.activate.timeout)
    }

    pub fn bootstrap_timeout(&self) -> Duration {
        self.activate
            .bootstrap_timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.timeout())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.activate.poll_interval_ms)
    }
}
