//! Timing limits for test case execution.

use std::time::Duration;

/// Seconds before a method is considered stuck.
pub const DEFAULT_METHOD_TIMEOUT_SECS: u64 = 3;

/// Execution limits for a [`MethodTest`](crate::harness::MethodTest).
///
/// The same bound applies separately to the wait for the reference and to
/// the wait for the candidate, so a single test case can block the caller
/// for at most twice `method_timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    /// How long to wait for each invocation before giving up on it.
    pub method_timeout: Duration,
}

impl HarnessConfig {
    /// Default limits for grading practice problems.
    pub const fn standard() -> Self {
        Self {
            method_timeout: Duration::from_secs(DEFAULT_METHOD_TIMEOUT_SECS),
        }
    }

    /// Longer limits for slow machines or heavyweight references.
    pub const fn patient() -> Self {
        Self {
            method_timeout: Duration::from_secs(10),
        }
    }

    /// Replace the per-invocation timeout.
    pub const fn with_timeout(mut self, method_timeout: Duration) -> Self {
        self.method_timeout = method_timeout;
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::standard()
    }
}
