//! Install method value object - how a definition file is activated

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a service definition is placed into its service directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstallMethod {
    /// Destination is a symbolic link to the source
    #[default]
    Symlink,
    /// Destination is an independent byte-for-byte copy
    Copy,
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMethod::Symlink => write!(f, "symlink"),
            InstallMethod::Copy => write!(f, "copy"),
        }
    }
}

impl FromStr for InstallMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "symlink" | "link" | "ln" => Ok(InstallMethod::Symlink),
            "copy" | "cp" => Ok(InstallMethod::Copy),
            other => Err(format!(
                "unknown install method '{}' (expected 'symlink' or 'copy')",
                other
            )),
        }
    }
}
