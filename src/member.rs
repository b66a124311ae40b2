//! Registered methods and the tables that hold them.
//!
//! Methods are never discovered by introspection. A caller registers each
//! implementation as a [`Member`]: a callable paired with the [`Signature`]
//! it claims to have. The candidate side is a [`MemberTable`] that the
//! resolver searches by name.

use crate::signature::Signature;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A fault raised by a method's own logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Fault(pub String);

impl Fault {
    /// Create a fault with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Function type behind every [`Callable`].
pub type MethodFn = dyn Fn(&[Value]) -> Result<Value, Fault> + Send + Sync;

/// A shareable handle to a method body.
#[derive(Clone)]
pub struct Callable(Arc<MethodFn>);

impl Callable {
    /// Wrap a closure or function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the method.
    pub fn call(&self, args: &[Value]) -> Result<Value, Fault> {
        (self.0)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

/// Declared visibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    /// Callable as-is.
    #[default]
    Public,
    /// Not public, but access can be granted.
    Private,
    /// Not public, and access cannot be granted.
    Sealed,
}

/// Access to a member could not be granted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("access to <{0}> cannot be granted")]
pub struct AccessDenied(pub String);

/// A method implementation together with its declared header.
#[derive(Debug, Clone)]
pub struct Member {
    signature: Signature,
    access: Access,
    body: Callable,
}

impl Member {
    /// Register a public member.
    pub fn new<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    {
        Self {
            signature,
            access: Access::Public,
            body: Callable::new(body),
        }
    }

    /// Set the member's declared visibility.
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Declared header.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Method name.
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    /// Declared visibility.
    pub fn access(&self) -> Access {
        self.access
    }

    /// Obtain an invocable handle, granting access to non-public members.
    pub fn ensure_access(&self) -> Result<Callable, AccessDenied> {
        match self.access {
            Access::Public => Ok(self.body.clone()),
            Access::Private => {
                tracing::trace!(method = self.name(), "granting access to non-public member");
                Ok(self.body.clone())
            }
            Access::Sealed => Err(AccessDenied(self.name().to_string())),
        }
    }
}

/// The declared members of a candidate submission.
#[derive(Debug, Clone, Default)]
pub struct MemberTable {
    members: Vec<Member>,
}

impl MemberTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, member: Member) -> Self {
        self.push(member);
        self
    }

    /// Append a member. Declaration order is preserved.
    pub fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    /// All members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Members whose name equals `name`, in declaration order.
    pub fn named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Member> + 'n
    where
        'a: 'n,
    {
        self.members.iter().filter(move |m| m.name() == name)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the table has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<Member> for MemberTable {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}
