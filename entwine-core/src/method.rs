//! Method identity, implementations, and receiver binding.
//!
//! A method implementation ([`MethodFn`]) is a plain callable over a
//! receiver and a slice of dynamic arguments. It carries no identity of
//! its own; identity lives in the explicit [`MethodId`] the host assigns,
//! never in runtime reflection. [`BoundMethod`] pairs an implementation
//! with a concrete receiver so it can be invoked, passed to hook
//! callbacks, and reported with stable provenance.

use crate::error::CallError;
use crate::object::Instance;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A stable, explicit method identifier.
///
/// Cheap to clone (interned string). Hosts assign these when defining
/// methods; the engine matches targets against them and keys attachment
/// records by them.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodId(Arc<str>);

impl MethodId {
    /// Create an identifier from a name.
    pub fn new(name: impl AsRef<str>) -> Self {
        MethodId(Arc::from(name.as_ref()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodId({:?})", &*self.0)
    }
}

impl From<&str> for MethodId {
    fn from(name: &str) -> Self {
        MethodId::new(name)
    }
}

impl From<String> for MethodId {
    fn from(name: String) -> Self {
        MethodId(Arc::from(name))
    }
}

impl From<&MethodId> for MethodId {
    fn from(id: &MethodId) -> Self {
        id.clone()
    }
}

/// A method implementation: receiver plus variadic arguments in, dynamic
/// result out. The engine forwards arguments untouched and never inspects
/// arity.
pub type MethodFn =
    Arc<dyn Fn(&Instance, &[Value]) -> Result<Value, CallError> + Send + Sync + 'static>;

/// The host-side contract the weaver operates through.
///
/// Anything that can enumerate its invocable method identifiers and accept
/// redefinition of an identifier's implementation can be woven: the
/// built-in [`Class`] (class-wide scope) and [`Instance`] (singleton
/// scope) both implement this, and alternative hosts can be plugged in.
///
/// A redefined implementation must be able to reach the prior one; the
/// weaver guarantees this by capturing the current implementation before
/// each redefinition.
///
/// [`Class`]: crate::Class
/// [`Instance`]: crate::Instance
pub trait MethodHost {
    /// All invocable method identifiers, in deterministic order.
    fn method_ids(&self) -> Vec<MethodId>;

    /// The current implementation for an identifier, if any.
    fn current(&self, id: &MethodId) -> Option<MethodFn>;

    /// Replace (or define) the implementation for an identifier.
    fn redefine(&self, id: &MethodId, imp: MethodFn);

    /// Whether an identifier belongs to the host's own method-definition
    /// machinery and must never be wrapped. The built-in model reserves
    /// nothing: redefinition is API surface, not a method.
    fn is_reserved(&self, _id: &MethodId) -> bool {
        false
    }
}

/// A method implementation bound to a concrete receiver.
///
/// This is what hook callbacks receive as their first argument: calling
/// it reaches the next layer inward, and [`qualified_name`] reports
/// provenance without runtime reflection.
///
/// [`qualified_name`]: BoundMethod::qualified_name
#[derive(Clone)]
pub struct BoundMethod {
    id: MethodId,
    imp: MethodFn,
    receiver: Instance,
}

impl BoundMethod {
    /// Bind an implementation to a receiver.
    pub fn bind(id: MethodId, imp: MethodFn, receiver: Instance) -> Self {
        BoundMethod { id, imp, receiver }
    }

    /// Invoke the bound implementation.
    pub fn call(&self, args: &[Value]) -> Result<Value, CallError> {
        (self.imp)(&self.receiver, args)
    }

    /// The method's identifier.
    pub fn id(&self) -> &MethodId {
        &self.id
    }

    /// The receiver the implementation is bound to.
    pub fn receiver(&self) -> &Instance {
        &self.receiver
    }

    /// `ClassName#method` provenance string.
    pub fn qualified_name(&self) -> String {
        format!("{}#{}", self.receiver.class().name(), self.id)
    }
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("method", &self.qualified_name())
            .finish_non_exhaustive()
    }
}
