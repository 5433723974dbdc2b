//! Service path value object - a service definition file on disk
//!
//! A definition is identified by its file stem: `org.example.agent.plist`
//! defines the service `org.example.agent`. The stem is the stable key used
//! to match definitions across directories.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use super::{DomainTarget, ServiceTarget};

/// File extension of service definition files
pub const DEFINITION_EXTENSION: &str = "plist";

/// Root prefix of the system-owned service directories
const PRIVILEGED_ROOT: &str = "/Library";

/// Whether `name` can be used as a service key.
///
/// Names must be non-empty, contain no whitespace and must not carry the
/// definition extension.
pub fn is_valid_service_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(char::is_whitespace)
        && !name.ends_with(&format!(".{}", DEFINITION_EXTENSION))
}

/// Location of a service definition file
///
/// Compared and hashed by full path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServicePath(PathBuf);

impl ServicePath {
    /// Wrap `path` if it names a definition file with a valid service name.
    ///
    /// Returns `None` for other extensions and for stems that are not
    /// valid service names.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        if path.extension() != Some(OsStr::new(DEFINITION_EXTENSION)) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        if !is_valid_service_name(stem) {
            return None;
        }
        Some(Self(path))
    }

    /// Definition file for service `name` inside `dir`
    pub(super) fn in_directory(dir: &Path, name: &str) -> Self {
        debug_assert!(is_valid_service_name(name), "invalid service name {name:?}");
        Self(dir.join(format!("{}.{}", name, DEFINITION_EXTENSION)))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Service name (file stem)
    pub fn name(&self) -> &str {
        // from_path guarantees a UTF-8 stem
        self.0
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
    }

    /// Whether mutating this file requires root (system-owned directories)
    pub fn needs_privilege(&self) -> bool {
        self.0.starts_with(PRIVILEGED_ROOT)
    }

    /// Service instance this definition describes in `domain`
    pub fn service_target(&self, domain: DomainTarget) -> ServiceTarget {
        ServiceTarget::new(domain, self.name())
    }
}

impl AsRef<Path> for ServicePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ServicePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
