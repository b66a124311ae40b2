//! Method Oracle - equivalence testing of a candidate method against a reference.
//!
//! Given a reference implementation and a table of candidate members, the
//! harness finds the candidate by name, checks its header against the
//! reference, then runs both side by side on the same inputs and reports one
//! [`TestResult`] per check.
//!
//! # Architecture
//!
//! - [`value`] - dynamic argument and return values
//! - [`signature`] - type descriptors, method headers and compatibility
//! - [`member`] - callable members and the tables they are looked up in
//! - [`result`] - the closed result taxonomy
//! - [`harness`] - resolution, header checks, timed execution, orchestration
//! - [`report`] - tallies over a run
//! - [`practice`] - a bundled problem set used by the CLI
//! - [`config`] - timeouts and presets
//! - [`error`] - configuration errors
//!
//! # Outcome families
//!
//! Every result is a success, a failure charged to the candidate, or an
//! error in the harness itself. A graded run never mixes the last two up.

// Harness code must not bring down the grading process.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod harness;
pub mod member;
pub mod practice;
pub mod report;
pub mod result;
pub mod signature;
pub mod value;

// Re-export commonly used types
pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use harness::{MethodTest, MethodTestBuilder};
pub use member::{Access, Fault, Member, MemberTable};
pub use report::RunSummary;
pub use result::{ResultFamily, TestResult};
pub use signature::{ReturnType, Signature, TypeDescriptor};
pub use value::Value;
