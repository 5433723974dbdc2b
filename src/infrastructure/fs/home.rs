//! Home directory resolution with test isolation support.
//!
//! The per-user agent directory lives under the home directory. Tests point
//! it at a temporary directory through `LAUNCHD_ACTIVATE_HOME` instead of
//! touching the real `~/Library/LaunchAgents`.

use std::path::PathBuf;

/// Environment variable overriding the home directory.
pub const HOME_OVERRIDE_VAR: &str = "LAUNCHD_ACTIVATE_HOME";

/// Home directory used for the per-user agent directory.
///
/// `LAUNCHD_ACTIVATE_HOME` wins over `dirs::home_dir()` when set and
/// non-empty.
pub fn home_dir() -> Option<PathBuf> {
    home_dir_from(std::env::var_os(HOME_OVERRIDE_VAR).map(PathBuf::from))
}

fn home_dir_from(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    override_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(dirs::home_dir)
}
