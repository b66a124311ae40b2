//! Type compatibility and test case validation.

use super::types::{BaseType, Signature, TypeDescriptor};
use crate::value::Value;
use thiserror::Error;

/// Returns true if `actual` may stand in for `declared`.
///
/// Descriptors are compatible when they are identical, or when they share a
/// primitive-like base and differ only in nullability (primitive vs boxed).
/// No widening or other coercion is applied.
pub fn compatible(declared: &TypeDescriptor, actual: &TypeDescriptor) -> bool {
    declared == actual || (declared.base == actual.base && declared.base.is_primitive_like())
}

/// Returns true if two parameter lists match position by position.
pub fn params_compatible(declared: &[TypeDescriptor], actual: &[TypeDescriptor]) -> bool {
    declared.len() == actual.len()
        && declared
            .iter()
            .zip(actual)
            .all(|(d, a)| compatible(d, a))
}

/// Why a test case was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseMismatch {
    /// Wrong number of arguments.
    #[error("expected {expected} arguments, got {actual}")]
    Arity {
        /// Parameter count of the signature.
        expected: usize,
        /// Length of the supplied tuple.
        actual: usize,
    },

    /// `null` passed to a non-nullable parameter.
    #[error("argument {position} is null but parameter type {expected} is not nullable")]
    NullNotAllowed {
        /// Zero-based argument position.
        position: usize,
        /// Declared parameter type.
        expected: String,
    },

    /// Value of the wrong runtime type.
    #[error("argument {position} is {actual} but parameter type is {expected}")]
    WrongType {
        /// Zero-based argument position.
        position: usize,
        /// Declared parameter type.
        expected: String,
        /// Runtime type of the supplied value.
        actual: String,
    },
}

/// Check whether `value` is an acceptable argument for `ty`.
pub fn value_satisfies(value: &Value, ty: &TypeDescriptor) -> bool {
    match (value, &ty.base) {
        (Value::Null, _) => ty.nullable,
        (Value::Byte(_), BaseType::Byte)
        | (Value::Short(_), BaseType::Short)
        | (Value::Int(_), BaseType::Int)
        | (Value::Long(_), BaseType::Long)
        | (Value::Float(_), BaseType::Float)
        | (Value::Double(_), BaseType::Double)
        | (Value::Bool(_), BaseType::Boolean)
        | (Value::Char(_), BaseType::Char)
        | (Value::Str(_), BaseType::Str) => true,
        (Value::List(items), BaseType::List(element)) => {
            items.iter().all(|item| value_satisfies(item, element))
        }
        _ => false,
    }
}

/// Validate a full argument tuple against a signature.
pub fn validate_test_case(case: &[Value], signature: &Signature) -> Result<(), CaseMismatch> {
    if case.len() != signature.arity() {
        return Err(CaseMismatch::Arity {
            expected: signature.arity(),
            actual: case.len(),
        });
    }

    for (position, (value, ty)) in case.iter().zip(signature.params()).enumerate() {
        if value.is_null() && !ty.nullable {
            return Err(CaseMismatch::NullNotAllowed {
                position,
                expected: ty.to_string(),
            });
        }
        if !value_satisfies(value, ty) {
            return Err(CaseMismatch::WrongType {
                position,
                expected: ty.to_string(),
                actual: value.type_name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::types::ReturnType;
    use proptest::prelude::*;

    fn add_sig() -> Signature {
        Signature::new(
            "add",
            vec![TypeDescriptor::int(), TypeDescriptor::int()],
            TypeDescriptor::int(),
        )
    }

    #[test]
    fn test_identical_is_compatible() {
        assert!(compatible(&TypeDescriptor::int(), &TypeDescriptor::int()));
        assert!(compatible(&TypeDescriptor::string(), &TypeDescriptor::string()));
    }

    #[test]
    fn test_primitive_and_boxed_are_compatible() {
        assert!(compatible(&TypeDescriptor::int(), &TypeDescriptor::int().nullable()));
        assert!(compatible(&TypeDescriptor::char().nullable(), &TypeDescriptor::char()));
        assert!(compatible(&TypeDescriptor::boolean(), &TypeDescriptor::boolean().nullable()));
    }

    #[test]
    fn test_no_widening() {
        assert!(!compatible(&TypeDescriptor::long(), &TypeDescriptor::int()));
        assert!(!compatible(&TypeDescriptor::double(), &TypeDescriptor::float()));
    }

    #[test]
    fn test_reference_types_keep_nullability() {
        assert!(!compatible(&TypeDescriptor::string(), &TypeDescriptor::string().nullable()));
    }

    #[test]
    fn test_params_compatible_checks_arity() {
        let two = [TypeDescriptor::int(), TypeDescriptor::int()];
        let three = [TypeDescriptor::int(), TypeDescriptor::int(), TypeDescriptor::int()];
        assert!(params_compatible(&two, &two));
        assert!(!params_compatible(&three, &two));
    }

    #[test]
    fn test_valid_case() {
        assert!(validate_test_case(&[Value::Int(2), Value::Int(3)], &add_sig()).is_ok());
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            validate_test_case(&[Value::Int(2)], &add_sig()),
            Err(CaseMismatch::Arity {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_null_rejected_for_primitive() {
        assert!(matches!(
            validate_test_case(&[Value::Null, Value::Int(3)], &add_sig()),
            Err(CaseMismatch::NullNotAllowed { position: 0, .. })
        ));
    }

    #[test]
    fn test_null_accepted_for_boxed() {
        let sig = Signature::new("f", vec![TypeDescriptor::int().nullable()], ReturnType::Void);
        assert!(validate_test_case(&[Value::Null], &sig).is_ok());
        assert!(validate_test_case(&[Value::Int(1)], &sig).is_ok());
    }

    #[test]
    fn test_wrong_value_type() {
        assert!(matches!(
            validate_test_case(&[Value::Int(2), Value::Double(3.0)], &add_sig()),
            Err(CaseMismatch::WrongType { position: 1, .. })
        ));
    }

    #[test]
    fn test_list_elements_are_checked() {
        let sig = Signature::new(
            "sum",
            vec![TypeDescriptor::list(TypeDescriptor::int())],
            TypeDescriptor::int(),
        );
        assert!(validate_test_case(&[Value::List(vec![Value::Int(1), Value::Int(2)])], &sig).is_ok());
        assert!(validate_test_case(&[Value::List(vec![Value::Int(1), Value::Null])], &sig).is_err());
    }

    fn primitive_base() -> impl Strategy<Value = BaseType> {
        prop_oneof![
            Just(BaseType::Byte),
            Just(BaseType::Short),
            Just(BaseType::Int),
            Just(BaseType::Long),
            Just(BaseType::Float),
            Just(BaseType::Double),
            Just(BaseType::Boolean),
            Just(BaseType::Char),
        ]
    }

    proptest! {
        #[test]
        fn prop_compatible_is_symmetric(
            a in primitive_base(),
            b in primitive_base(),
            na in any::<bool>(),
            nb in any::<bool>(),
        ) {
            let x = TypeDescriptor::new(a.clone(), na);
            let y = TypeDescriptor::new(b.clone(), nb);
            prop_assert_eq!(compatible(&x, &y), compatible(&y, &x));
            prop_assert_eq!(compatible(&x, &y), a == b);
        }
    }
}
