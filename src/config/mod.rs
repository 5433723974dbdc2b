//! Configuration module for launchd-activate
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (LAUNCHD_ACTIVATE_*)
//! 3. Config file (`--config PATH`, or the user config directory)
//! 4. Built-in defaults

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    apply_env, default_config_path, parse_with_warnings, ConfigWarning, BOOTSTRAP_TIMEOUT_VAR,
    COLOR_VAR, INSTALL_METHOD_VAR, TIMEOUT_VAR,
};
pub use types::{ActivateConfig, ColorMode, Config, OutputConfig};
