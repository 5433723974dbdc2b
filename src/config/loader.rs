//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::InstallMethod;
use crate::error::{ActivateError, ActivateResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::{ColorMode, Config};

pub const INSTALL_METHOD_VAR: &str = "LAUNCHD_ACTIVATE_INSTALL_METHOD";
pub const TIMEOUT_VAR: &str = "LAUNCHD_ACTIVATE_TIMEOUT";
pub const BOOTSTRAP_TIMEOUT_VAR: &str = "LAUNCHD_ACTIVATE_BOOTSTRAP_TIMEOUT";
pub const COLOR_VAR: &str = "LAUNCHD_ACTIVATE_COLOR";

const CONFIG_FILE: &str = "launchd-activate/config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, ", did you mean '{}'?", suggestion)?;
        }
        Ok(())
    }
}

/// Default location of the user config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Load configuration and collect non-fatal warnings (unknown keys).
pub fn load_with_warnings(path: &Path) -> ActivateResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| ActivateError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_with_warnings(&content, path)
}

/// Parse TOML `content` read from `path`
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> ActivateResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ActivateError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Explicit file (must load), else default file (if present), else
/// defaults; then environment overrides.
pub fn resolve(explicit: Option<&Path>) -> ActivateResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match explicit {
        Some(path) => load_with_warnings(path)?,
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => load_with_warnings(&path)?,
            None => (Config::default(), Vec::new()),
        },
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (LAUNCHD_ACTIVATE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |key| std::env::var(key).ok())
}

/// Environment overrides with an injectable lookup
pub fn apply_env(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(value) = get_env(INSTALL_METHOD_VAR) {
        let validator = EnvVarValidator::new(INSTALL_METHOD_VAR, &["symlink", "copy"]);
        if let Some(method) = validator.parse(&value, |s| s.parse::<InstallMethod>().ok()) {
            config.activate.install_method = Some(method);
        }
    }

    if let Some(value) = get_env(TIMEOUT_VAR) {
        let validator = EnvVarValidator::new(TIMEOUT_VAR, &[]);
        if let Some(secs) = validator.parse(&value, |s| s.parse::<u64>().ok()) {
            config.activate.timeout = secs;
        }
    }

    if let Some(value) = get_env(BOOTSTRAP_TIMEOUT_VAR) {
        let validator = EnvVarValidator::new(BOOTSTRAP_TIMEOUT_VAR, &[]);
        if let Some(secs) = validator.parse(&value, |s| s.parse::<u64>().ok()) {
            config.activate.bootstrap_timeout = Some(secs);
        }
    }

    if let Some(value) = get_env(COLOR_VAR) {
        let validator = EnvVarValidator::new(COLOR_VAR, &["auto", "always", "never"]);
        if let Some(color) = validator.parse(&value, ColorMode::parse) {
            config.output.color = color;
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "activate",
        "install_method",
        "timeout",
        "bootstrap_timeout",
        "poll_interval_ms",
        "output",
        "color",
        "json",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}
