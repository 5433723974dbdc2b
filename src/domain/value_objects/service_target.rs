//! Service target value object - a runnable service instance in a domain

use std::fmt;

use super::{is_valid_service_name, DomainTarget};

/// A service instance, addressed by launchctl as `<domain>/<name>`
///
/// Equality and hashing are by `(domain, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceTarget {
    domain: DomainTarget,
    name: String,
}

impl ServiceTarget {
    /// Create a service target.
    ///
    /// Names always come from a [`ServicePath`](super::ServicePath), which
    /// only accepts valid names, so the check here is a debug assertion.
    pub fn new(domain: DomainTarget, name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(is_valid_service_name(&name), "invalid service name {name:?}");
        Self { domain, name }
    }

    pub fn domain(&self) -> DomainTarget {
        self.domain
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ServiceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.name)
    }
}
