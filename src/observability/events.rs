//! Observable pipeline events
//!
//! Events are explicit and typed. Their names are stable so log lines can
//! be grepped across releases.

use std::fmt;

/// Observable events of one report run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Run begins
    RunStart,
    /// Configuration resolved
    ConfigLoaded,

    // Inputs
    /// Companies document read, checked and decoded
    CompaniesLoaded,
    /// Users document read, checked and decoded
    UsersLoaded,
    /// Lenient mode: schema validation not performed
    ValidationSkipped,
    /// Users dropped by the company/active filter
    UsersFiltered,

    // Output
    /// Aggregates built
    AggregationComplete,
    /// Report written to its destination
    ReportWritten,

    /// Run aborted, no report written
    RunFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RunStart => "RUN_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CompaniesLoaded => "COMPANIES_LOADED",
            Event::UsersLoaded => "USERS_LOADED",
            Event::ValidationSkipped => "VALIDATION_SKIPPED",
            Event::UsersFiltered => "USERS_FILTERED",
            Event::AggregationComplete => "AGGREGATION_COMPLETE",
            Event::ReportWritten => "REPORT_WRITTEN",
            Event::RunFailed => "RUN_FAILED",
        }
    }

    /// Returns true if this event ends a run without output
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::RunFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
