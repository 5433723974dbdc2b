//! Service directory value object - where definitions are installed
//!
//! - `System`: `/Library/LaunchDaemons` (root only)
//! - `AllUsers`: `/Library/LaunchAgents` (root only)
//! - `User(home)`: `~/Library/LaunchAgents`

use std::fmt;
use std::path::PathBuf;

use super::{InstallMethod, ServicePath};

/// Root of system daemons
pub const SYSTEM_DAEMONS_DIR: &str = "/Library/LaunchDaemons";

/// Root of agents loaded for every user
pub const ALL_USERS_AGENTS_DIR: &str = "/Library/LaunchAgents";

/// Per-user agents directory, relative to the home directory
pub const USER_AGENTS_SUBDIR: &str = "Library/LaunchAgents";

/// Installation root for service definitions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceDirectory {
    System,
    AllUsers,
    /// Agents of the user with this home directory
    User(PathBuf),
}

impl ServiceDirectory {
    pub fn root(&self) -> PathBuf {
        match self {
            ServiceDirectory::System => PathBuf::from(SYSTEM_DAEMONS_DIR),
            ServiceDirectory::AllUsers => PathBuf::from(ALL_USERS_AGENTS_DIR),
            ServiceDirectory::User(home) => home.join(USER_AGENTS_SUBDIR),
        }
    }

    /// Whether writing into this directory requires root
    pub fn needs_privilege(&self) -> bool {
        match self {
            ServiceDirectory::System | ServiceDirectory::AllUsers => true,
            ServiceDirectory::User(_) => false,
        }
    }

    /// Install method used when none is configured.
    ///
    /// launchd refuses symlinked definitions in the root-owned directories,
    /// so those default to copies.
    pub fn default_install_method(&self) -> InstallMethod {
        match self {
            ServiceDirectory::System | ServiceDirectory::AllUsers => InstallMethod::Copy,
            ServiceDirectory::User(_) => InstallMethod::Symlink,
        }
    }

    /// Destination path of the definition for service `name`
    pub fn service_path(&self, name: &str) -> ServicePath {
        ServicePath::in_directory(&self.root(), name)
    }
}

impl fmt::Display for ServiceDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root().display())
    }
}
