//! Plan entity - the computed reconciliation result
//!
//! A plan is inert data: which files to install or remove and which
//! services to stop or start. It is built once by the planner and read by
//! the executor. Ordered collections keep the printed plan stable; the
//! executor does not rely on ordering between services.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::value_objects::{InstallMethod, ServicePath, ServiceTarget};

use super::Operation;

/// Actions needed to reconcile desired and actual service state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Files to install: destination -> source
    pub enable: BTreeMap<ServicePath, ServicePath>,
    /// Installed files to remove
    pub disable: BTreeSet<ServicePath>,
    /// Services to start: service -> installed definition
    pub bootstrap: BTreeMap<ServiceTarget, ServicePath>,
    /// Services to stop before anything is started
    pub bootout: BTreeSet<ServiceTarget>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when applying the plan would change nothing
    pub fn is_empty(&self) -> bool {
        self.enable.is_empty()
            && self.disable.is_empty()
            && self.bootstrap.is_empty()
            && self.bootout.is_empty()
    }

    pub fn total_operations(&self) -> usize {
        self.enable.len() + self.disable.len() + self.bootstrap.len() + self.bootout.len()
    }

    /// File-phase operations: installs followed by removals
    pub fn file_operations(&self, method: InstallMethod) -> Vec<Operation> {
        let installs = self
            .enable
            .iter()
            .map(|(destination, source)| Operation::Install {
                source: source.clone(),
                destination: destination.clone(),
                method,
            });
        let removals = self
            .disable
            .iter()
            .map(|destination| Operation::Remove {
                destination: destination.clone(),
            });
        installs.chain(removals).collect()
    }

    pub fn bootout_operations(&self) -> Vec<Operation> {
        self.bootout
            .iter()
            .map(|service| Operation::Bootout {
                service: service.clone(),
            })
            .collect()
    }

    pub fn bootstrap_operations(&self) -> Vec<Operation> {
        self.bootstrap
            .iter()
            .map(|(service, path)| Operation::Bootstrap {
                service: service.clone(),
                path: path.clone(),
            })
            .collect()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No operations planned.");
        }

        if !self.enable.is_empty() {
            writeln!(f, "File installs:")?;
            for (destination, source) in &self.enable {
                writeln!(f, "  {} -> {}", source, destination)?;
            }
        }

        if !self.disable.is_empty() {
            writeln!(f, "File removals:")?;
            for destination in &self.disable {
                writeln!(f, "  {}", destination)?;
            }
        }

        if !self.bootout.is_empty() {
            writeln!(f, "Service bootouts:")?;
            for service in &self.bootout {
                writeln!(f, "  {}", service)?;
            }
        }

        if !self.bootstrap.is_empty() {
            writeln!(f, "Service bootstraps:")?;
            for (service, path) in &self.bootstrap {
                writeln!(f, "  {} from {}", service, path)?;
            }
        }

        writeln!(
            f,
            "Total operations: {} (installs: {}, removals: {}, bootouts: {}, bootstraps: {})",
            self.total_operations(),
            self.enable.len(),
            self.disable.len(),
            self.bootout.len(),
            self.bootstrap.len()
        )
    }
}
