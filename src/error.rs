//! Error handling for the method oracle.
//!
//! Only caller misuse is reported through [`HarnessError`]. Anything the
//! candidate (or the reference) does while running is captured as a
//! [`TestResult`](crate::result::TestResult) instead, so a single bad test
//! case can never abort a batch.

use thiserror::Error;

/// Configuration errors raised by a [`MethodTest`](crate::harness::MethodTest).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// An edge case does not fit the reference signature.
    #[error("edge case #{index} is incompatible with <{method}>: {reason}")]
    InvalidEdgeCase {
        /// Name of the method under test.
        method: String,
        /// Position of the edge case in the supplied sequence.
        index: usize,
        /// Why the tuple was rejected.
        reason: String,
    },

    /// A generator produced a tuple that does not fit the reference signature.
    #[error("generation round {round} produced a case incompatible with <{method}>: {reason}")]
    InvalidGeneratedCase {
        /// Name of the method under test.
        method: String,
        /// Zero-based generation round.
        round: usize,
        /// Why the tuple was rejected.
        reason: String,
    },

    /// The builder was finished without a reference method.
    #[error("no reference method was supplied")]
    MissingReference,

    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    PoolStartup(String),

    /// The harness has already been torn down.
    #[error("<{0}> has already ended; no further test cases can run")]
    Ended(String),
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
