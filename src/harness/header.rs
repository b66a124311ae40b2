//! Header validation: does the candidate look like the reference?

use crate::member::Member;
use crate::result::TestResult;
use crate::signature::{params_compatible, Signature};

/// Compare a resolved candidate's header against the reference.
///
/// Checks run in order and the first mismatch wins: presence, parameter
/// list, return type, then whether the candidate can be made callable.
pub fn validate_header(resolved: Option<&Member>, reference: &Signature) -> TestResult {
    let method = reference.name().to_string();

    let candidate = match resolved {
        Some(m) => m,
        None => return TestResult::MethodNotFoundFailure { method },
    };
    let actual = candidate.signature();

    if !params_compatible(reference.params(), actual.params()) {
        return TestResult::WrongParametersFailure {
            method,
            expected: reference.params().to_vec(),
            actual: actual.params().to_vec(),
        };
    }

    // Return types must be identical; boxing is only tolerated on parameters.
    if reference.returns() != actual.returns() {
        return TestResult::WrongReturnTypeFailure {
            method,
            expected: reference.returns().clone(),
            actual: actual.returns().clone(),
        };
    }

    if let Err(denied) = candidate.ensure_access() {
        tracing::info!(method = %method, "{}", denied);
        return TestResult::MethodSecurityFailure { method };
    }

    TestResult::HeaderSuccess { method }
}
