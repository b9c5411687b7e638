//! Aggregation of findings into per-severity counts.

use super::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// Number of findings per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub total: u32,
}

impl Summary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finding of the given severity.
    fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
        self.total += 1;
    }

    /// Count for one severity.
    pub fn count(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    /// Highest severity present, if any.
    pub fn highest(&self) -> Option<Severity> {
        Severity::DESCENDING
            .into_iter()
            .find(|s| self.count(*s) > 0)
    }

    /// Check if nothing was found.
    pub fn is_clean(&self) -> bool {
        self.total == 0
    }
}

/// Summarize a findings list. Does not reorder or modify the input.
pub fn summarize(findings: &[Finding]) -> Summary {
    let mut summary = Summary::new();
    for finding in findings {
        summary.add(finding.severity());
    }
    summary
}
