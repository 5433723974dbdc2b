//! Activate report types

use std::fmt;

use crate::domain::entities::{Phase, Plan};

/// Largest status a process can report
const MAX_EXIT_CODE: usize = 255;

/// One failed operation or confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub phase: Phase,
    /// Command or service the failure concerns
    pub subject: String,
    pub error: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.phase, self.subject, self.error)
    }
}

/// Outcome of applying a plan
#[derive(Debug, Clone, Default)]
pub struct ActivateReport {
    /// Plan that was applied
    pub plan: Plan,
    pub dry_run: bool,
    /// Operations that ran (or would have run) without error
    pub succeeded: usize,
    pub failures: Vec<Failure>,
    /// First phase skipped because of an interrupt
    pub interrupted: Option<Phase>,
}

impl ActivateReport {
    pub fn new(plan: Plan, dry_run: bool) -> Self {
        Self {
            plan,
            dry_run,
            ..Self::default()
        }
    }

    pub fn add_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn add_failure(&mut self, phase: Phase, subject: impl Into<String>, error: impl fmt::Display) {
        self.failures.push(Failure {
            phase,
            subject: subject.into(),
            error: error.to_string(),
        });
    }

    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.interrupted.is_none()
    }

    /// Process exit status: the number of failures, capped at 255.
    ///
    /// Exit statuses are 8 bits wide; an uncapped count of 256 would read
    /// as success.
    pub fn exit_code(&self) -> i32 {
        self.error_count().min(MAX_EXIT_CODE) as i32
    }
}
