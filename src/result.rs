//! The closed set of outcomes a [`MethodTest`](crate::harness::MethodTest) can report.
//!
//! Results fall into three families:
//!
//! - **Success**: the header matched, or a test case produced the expected output.
//! - **Failure**: the candidate is at fault, either in its header (missing,
//!   wrong parameters, wrong return type, inaccessible) or in its body (wrong
//!   output, raised a fault, never finished).
//! - **Error**: the harness or the reference failed. These must never be
//!   counted against the candidate.

use crate::signature::{format_params, ReturnType, TypeDescriptor};
use crate::value::{join_values, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse grouping of a [`TestResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultFamily {
    /// Header or test case passed.
    Success,
    /// The candidate is at fault.
    Failure,
    /// The harness or the reference is at fault.
    Error,
}

/// A single result emitted by a test run. Every variant names the method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestResult {
    /// The candidate's header matches the reference.
    HeaderSuccess {
        /// Method under test.
        method: String,
    },
    /// The candidate produced the reference's output.
    TestCaseSuccess {
        /// Method under test.
        method: String,
        /// Arguments passed, in order.
        arguments: Vec<Value>,
        /// Output returned by the candidate.
        output: Value,
    },
    /// No member with the reference's name exists.
    MethodNotFoundFailure {
        /// Method under test.
        method: String,
    },
    /// Parameter count or types differ from the reference.
    WrongParametersFailure {
        /// Method under test.
        method: String,
        /// Reference parameter types.
        expected: Vec<TypeDescriptor>,
        /// Candidate parameter types.
        actual: Vec<TypeDescriptor>,
    },
    /// Return type differs from the reference.
    WrongReturnTypeFailure {
        /// Method under test.
        method: String,
        /// Reference return type.
        expected: ReturnType,
        /// Candidate return type.
        actual: ReturnType,
    },
    /// The candidate exists but cannot be made callable.
    MethodSecurityFailure {
        /// Method under test.
        method: String,
    },
    /// The candidate's output differs from the reference, or it raised a fault.
    TestCaseFailure {
        /// Method under test.
        method: String,
        /// Arguments passed, in order.
        arguments: Vec<Value>,
        /// Reference output.
        expected: Value,
        /// Candidate output; `None` if the candidate raised a fault.
        actual: Option<Value>,
    },
    /// The candidate did not finish within the timeout.
    InfiniteLoopFailure {
        /// Method under test.
        method: String,
        /// Arguments passed, in order.
        arguments: Vec<Value>,
        /// Reference output.
        expected: Value,
    },
    /// Infrastructure failure not attributable to the candidate.
    Error {
        /// Method under test.
        method: String,
    },
}

impl TestResult {
    /// Name of the method this result is about.
    pub fn method_name(&self) -> &str {
        match self {
            Self::HeaderSuccess { method }
            | Self::TestCaseSuccess { method, .. }
            | Self::MethodNotFoundFailure { method }
            | Self::WrongParametersFailure { method, .. }
            | Self::WrongReturnTypeFailure { method, .. }
            | Self::MethodSecurityFailure { method }
            | Self::TestCaseFailure { method, .. }
            | Self::InfiniteLoopFailure { method, .. }
            | Self::Error { method } => method,
        }
    }

    /// Which family this result belongs to.
    pub fn family(&self) -> ResultFamily {
        match self {
            Self::HeaderSuccess { .. } | Self::TestCaseSuccess { .. } => ResultFamily::Success,
            Self::Error { .. } => ResultFamily::Error,
            _ => ResultFamily::Failure,
        }
    }

    /// Returns true for the success family.
    pub fn is_success(&self) -> bool {
        self.family() == ResultFamily::Success
    }

    /// Returns true for the failure family.
    pub fn is_failure(&self) -> bool {
        self.family() == ResultFamily::Failure
    }

    /// Returns true for infrastructure errors.
    pub fn is_error(&self) -> bool {
        self.family() == ResultFamily::Error
    }

    /// Returns true for any result produced by header validation.
    pub fn is_header_result(&self) -> bool {
        matches!(self, Self::HeaderSuccess { .. }) || self.is_header_failure()
    }

    /// Returns true for header failures.
    pub fn is_header_failure(&self) -> bool {
        matches!(
            self,
            Self::MethodNotFoundFailure { .. }
                | Self::WrongParametersFailure { .. }
                | Self::WrongReturnTypeFailure { .. }
                | Self::MethodSecurityFailure { .. }
        )
    }

    /// Returns true for test case failures, including timeouts.
    pub fn is_test_case_failure(&self) -> bool {
        matches!(
            self,
            Self::TestCaseFailure { .. } | Self::InfiniteLoopFailure { .. }
        )
    }

    /// Arguments of the test case, if this result came from one.
    pub fn arguments(&self) -> Option<&[Value]> {
        match self {
            Self::TestCaseSuccess { arguments, .. }
            | Self::TestCaseFailure { arguments, .. }
            | Self::InfiniteLoopFailure { arguments, .. } => Some(arguments),
            _ => None,
        }
    }

    /// Reference output for a failed test case.
    pub fn expected(&self) -> Option<&Value> {
        match self {
            Self::TestCaseFailure { expected, .. } | Self::InfiniteLoopFailure { expected, .. } => {
                Some(expected)
            }
            _ => None,
        }
    }

    /// Candidate output. Always `None` for timeouts and raised faults.
    pub fn actual(&self) -> Option<&Value> {
        match self {
            Self::TestCaseSuccess { output, .. } => Some(output),
            Self::TestCaseFailure { actual, .. } => actual.as_ref(),
            _ => None,
        }
    }

    /// Human-readable description suitable for direct display.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderSuccess { method } => {
                write!(f, "The header for <{}> looks good!", method)
            }
            Self::TestCaseSuccess {
                method,
                arguments,
                output,
            } => write!(
                f,
                "Success! <{}({})> returned <{}>.",
                method,
                join_values(arguments),
                output
            ),
            Self::MethodNotFoundFailure { method } => {
                write!(f, "Failure! The method <{}> couldn't be found...", method)
            }
            Self::WrongParametersFailure {
                method,
                expected,
                actual,
            } => write!(
                f,
                "Failure! <{}> should have the parameter types <({})> but instead has <({})>.",
                method,
                format_params(expected),
                format_params(actual)
            ),
            Self::WrongReturnTypeFailure {
                method,
                expected,
                actual,
            } => write!(
                f,
                "Failure! <{}> should have return type <{}>, but instead has <{}>.",
                method, expected, actual
            ),
            Self::MethodSecurityFailure { method } => {
                write!(f, "Failure! <{}> should have public visibility.", method)
            }
            Self::TestCaseFailure {
                method,
                arguments,
                expected,
                actual: Some(actual),
            } => write!(
                f,
                "Failure! <{}({})> should output <{}> but instead outputs <{}>.",
                method,
                join_values(arguments),
                expected,
                actual
            ),
            Self::TestCaseFailure {
                method,
                arguments,
                expected,
                actual: None,
            } => write!(
                f,
                "Failure! <{}({})> should output <{}> but instead raised an error.",
                method,
                join_values(arguments),
                expected
            ),
            Self::InfiniteLoopFailure {
                method,
                arguments,
                expected,
            } => write!(
                f,
                "Failure! <{}({})> should output <{}> but took too long -- is there an infinite loop?",
                method,
                join_values(arguments),
                expected
            ),
            Self::Error { method } => write!(
                f,
                "There was an error (not your fault) trying to deal with <{}>...",
                method
            ),
        }
    }
}
