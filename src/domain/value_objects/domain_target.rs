//! Domain target value object - the launchd execution domain of a service
//!
//! - `System`: the system-wide daemon domain (`system`)
//! - `Gui(uid)`: a user's graphical login session (`gui/<uid>`)

use std::fmt;

use super::ServiceTarget;

/// Execution domain a service is bootstrapped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DomainTarget {
    /// System-wide daemons
    System,
    /// GUI session of the user with this uid
    Gui(u32),
}

impl DomainTarget {
    /// Service instance with the given name in this domain
    pub fn service(&self, name: impl Into<String>) -> ServiceTarget {
        ServiceTarget::new(*self, name)
    }

    /// Whether launchctl calls against this domain must run as root
    pub fn needs_privilege(&self) -> bool {
        match self {
            DomainTarget::System => true,
            DomainTarget::Gui(_) => false,
        }
    }
}

impl fmt::Display for DomainTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainTarget::System => write!(f, "system"),
            DomainTarget::Gui(uid) => write!(f, "gui/{}", uid),
        }
    }
}
