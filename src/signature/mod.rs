//! Method signatures and the rules for comparing them.
//!
//! A [`Signature`] is the header of a method: its name, ordered parameter
//! types (each with a nullability flag), and return type. Headers are compared
//! with [`compatible`], which accepts identical descriptors and the
//! primitive/boxed pairs of the numeric, boolean and character types, and
//! nothing else.

mod compat;
mod types;

pub use compat::{
    compatible, params_compatible, validate_test_case, value_satisfies, CaseMismatch,
};
pub use types::{format_params, BaseType, ReturnType, Signature, TypeDescriptor};
