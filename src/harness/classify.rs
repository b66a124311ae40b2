//! Turning execution outcomes into results.

use super::executor::{DualOutcome, Outcome};
use crate::result::TestResult;
use crate::value::Value;

/// Classify one executed test case.
///
/// `reference_is_void` suppresses output comparison: with no side-effect
/// inspection, a void reference cannot be meaningfully mismatched.
pub fn classify(
    method: &str,
    outcome: DualOutcome,
    arguments: &[Value],
    reference_is_void: bool,
) -> TestResult {
    let method = method.to_string();
    let arguments = arguments.to_vec();

    let (expected, candidate) = match outcome {
        DualOutcome::ReferenceFailed(_) => return TestResult::Error { method },
        DualOutcome::Completed {
            expected,
            candidate,
        } => (expected, candidate),
    };

    match candidate {
        Outcome::Raised(_) => TestResult::TestCaseFailure {
            method,
            arguments,
            expected,
            actual: None,
        },
        Outcome::Infrastructure(_) => TestResult::Error { method },
        Outcome::TimedOut => TestResult::InfiniteLoopFailure {
            method,
            arguments,
            expected,
        },
        Outcome::Returned(output) if reference_is_void || output == expected => {
            TestResult::TestCaseSuccess {
                method,
                arguments,
                output,
            }
        }
        Outcome::Returned(output) => TestResult::TestCaseFailure {
            method,
            arguments,
            expected,
            actual: Some(output),
        },
    }
}
