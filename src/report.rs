//! Tallies over a run's results.
//!
//! Infrastructure errors are counted apart from candidate failures so that
//! a grader never charges the candidate for the harness's own faults.

use crate::result::{ResultFamily, TestResult};
use serde::Serialize;

/// Summary of one or more runs.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    /// Successful header checks and test cases.
    pub passed: usize,
    /// Header failures.
    pub header_failures: usize,
    /// Test case failures, including timeouts.
    pub case_failures: usize,
    /// Infrastructure errors.
    pub errors: usize,
    /// Every result, in the order recorded.
    pub results: Vec<TestResult>,
}

impl RunSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a summary from a result sequence.
    pub fn from_results<I: IntoIterator<Item = TestResult>>(results: I) -> Self {
        let mut summary = Self::new();
        for result in results {
            summary.record(result);
        }
        summary
    }

    /// Record a single result.
    pub fn record(&mut self, result: TestResult) {
        match result.family() {
            ResultFamily::Success => self.passed += 1,
            ResultFamily::Failure if result.is_header_failure() => self.header_failures += 1,
            ResultFamily::Failure => self.case_failures += 1,
            ResultFamily::Error => self.errors += 1,
        }
        self.results.push(result);
    }

    /// Total number of results recorded.
    pub fn total(&self) -> usize {
        self.passed + self.header_failures + self.case_failures + self.errors
    }

    /// Returns true if every result is a success.
    pub fn all_passed(&self) -> bool {
        self.header_failures == 0 && self.case_failures == 0 && self.errors == 0
    }

    /// Candidate failures only.
    pub fn failures(&self) -> Vec<&TestResult> {
        self.results.iter().filter(|r| r.is_failure()).collect()
    }

    /// Infrastructure errors only.
    pub fn error_details(&self) -> Vec<&TestResult> {
        self.results.iter().filter(|r| r.is_error()).collect()
    }

    /// Format a summary string.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} header failures, {} case failures, {} errors (total: {})",
            self.passed,
            self.header_failures,
            self.case_failures,
            self.errors,
            self.total()
        )
    }

    /// Format as JSON for machine parsing.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
