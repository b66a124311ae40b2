//! Signature types: BaseType, TypeDescriptor, ReturnType, Signature.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a parameter or return value, ignoring nullability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseType {
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Boolean.
    Boolean,
    /// Single character.
    Char,
    /// UTF-8 string.
    Str,
    /// List whose elements all match the inner descriptor.
    List(Box<TypeDescriptor>),
}

impl BaseType {
    /// Whether this base has a primitive form and a boxed counterpart.
    pub fn is_primitive_like(&self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::Boolean
                | Self::Char
        )
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte => write!(f, "byte"),
            Self::Short => write!(f, "short"),
            Self::Int => write!(f, "int"),
            Self::Long => write!(f, "long"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::Boolean => write!(f, "boolean"),
            Self::Char => write!(f, "char"),
            Self::Str => write!(f, "String"),
            Self::List(inner) => write!(f, "List<{}>", inner),
        }
    }
}

/// A parameter or return type: base type plus nullability.
///
/// For primitive-like bases the nullable form is the boxed counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Underlying type.
    pub base: BaseType,
    /// Whether `null` is an accepted value.
    pub nullable: bool,
}

impl TypeDescriptor {
    /// Create a descriptor.
    pub const fn new(base: BaseType, nullable: bool) -> Self {
        Self { base, nullable }
    }

    /// Non-null descriptor for `base`.
    pub const fn of(base: BaseType) -> Self {
        Self::new(base, false)
    }

    /// `byte`
    pub const fn byte() -> Self {
        Self::of(BaseType::Byte)
    }

    /// `short`
    pub const fn short() -> Self {
        Self::of(BaseType::Short)
    }

    /// `int`
    pub const fn int() -> Self {
        Self::of(BaseType::Int)
    }

    /// `long`
    pub const fn long() -> Self {
        Self::of(BaseType::Long)
    }

    /// `float`
    pub const fn float() -> Self {
        Self::of(BaseType::Float)
    }

    /// `double`
    pub const fn double() -> Self {
        Self::of(BaseType::Double)
    }

    /// `boolean`
    pub const fn boolean() -> Self {
        Self::of(BaseType::Boolean)
    }

    /// `char`
    pub const fn char() -> Self {
        Self::of(BaseType::Char)
    }

    /// `String`
    pub const fn string() -> Self {
        Self::of(BaseType::Str)
    }

    /// `List<element>`
    pub fn list(element: TypeDescriptor) -> Self {
        Self::of(BaseType::List(Box::new(element)))
    }

    /// The same base type, accepting `null` (the boxed form for primitives).
    pub fn nullable(self) -> Self {
        Self::new(self.base, true)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// Declared return type of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnType {
    /// Produces no value.
    Void,
    /// Produces a value of the given type.
    Value(TypeDescriptor),
}

impl ReturnType {
    /// Returns true for [`ReturnType::Void`].
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

impl From<TypeDescriptor> for ReturnType {
    fn from(ty: TypeDescriptor) -> Self {
        Self::Value(ty)
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Value(ty) => write!(f, "{}", ty),
        }
    }
}

/// Name, ordered parameter types, and return type of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    name: String,
    params: Vec<TypeDescriptor>,
    returns: ReturnType,
}

impl Signature {
    /// Create a signature.
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypeDescriptor>,
        returns: impl Into<ReturnType>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            returns: returns.into(),
        }
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter types in declaration order.
    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    /// Declared return type.
    pub fn returns(&self) -> &ReturnType {
        &self.returns
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}({})", self.returns, self.name, format_params(&self.params))
    }
}

/// Render parameter types as `"int, int"`.
pub fn format_params(params: &[TypeDescriptor]) -> String {
    params
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
