//! Equivalence testing of a candidate method against a reference.
//!
//! This module wires the pieces together:
//!
//! - [`resolver`] finds the candidate by name in a [`MemberTable`](crate::member::MemberTable)
//! - [`header`] compares the candidate's header with the reference's
//! - [`executor`] runs both implementations side by side under a timeout
//! - [`classify`] maps execution outcomes to a [`TestResult`](crate::result::TestResult)
//! - [`orchestrator`] drives the whole run and owns the worker pool
//!
//! # Example
//!
//! ```
//! use method_oracle::harness::MethodTest;
//! use method_oracle::member::{Fault, Member, MemberTable};
//! use method_oracle::signature::{Signature, TypeDescriptor};
//! use method_oracle::value::Value;
//!
//! fn add(name: &str, op: fn(i32, i32) -> i32) -> Member {
//!     let sig = Signature::new(
//!         name,
//!         vec![TypeDescriptor::int(), TypeDescriptor::int()],
//!         TypeDescriptor::int(),
//!     );
//!     Member::new(sig, move |args| match args {
//!         [Value::Int(a), Value::Int(b)] => Ok(Value::Int(op(*a, *b))),
//!         _ => Err(Fault::new("expected two ints")),
//!     })
//! }
//!
//! let student = MemberTable::new().with(add("add", |a, b| a - b));
//! let mut test = MethodTest::new(
//!     add("add", |a, b| a + b),
//!     &student,
//!     Some(vec![vec![Value::Int(2), Value::Int(3)]]),
//!     None,
//!     None,
//! )
//! .unwrap();
//!
//! let results = test.run_all_tests_then_end().unwrap();
//! assert!(results[0].is_success());
//! assert_eq!(results[1].actual(), Some(&Value::Int(-1)));
//! ```

pub mod classify;
pub mod executor;
pub mod header;
pub mod orchestrator;
pub mod resolver;

pub use classify::classify;
pub use executor::{DualOutcome, Outcome, TimedExecutor, WorkerPool};
pub use header::validate_header;
pub use orchestrator::{Generator, MethodTest, MethodTestBuilder, Phase};
pub use resolver::resolve;
