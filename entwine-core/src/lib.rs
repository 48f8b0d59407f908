//! # entwine-core
//!
//! Core types and host contract for the Entwine method-interception
//! engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! hosts and hook libraries that don't need the full `entwine` engine.
//!
//! # Layers
//!
//! ## Host model ([`MethodHost`], [`Class`], [`Instance`])
//!
//! The collaborator contract the weaver operates through: enumerate a
//! type's invocable method identifiers (public and non-public alike) and
//! redefine an identifier's implementation on a type or an individual
//! object, with the new implementation able to reach the prior one bound
//! to the actual call receiver. A built-in dynamic object model
//! implements the contract.
//!
//! ## Selection ([`Target`])
//!
//! Pure, total matching of method identifiers: everything, an exact
//! name, a regular expression, or any-of a list.
//!
//! ## Hooks ([`HookKind`], [`BeforeFn`], [`AfterFn`], [`ReplaceFn`])
//!
//! The callback shapes a configuration registers for the three
//! interception positions.
//!
//! # Error Types
//!
//! - [`WeaveError`] - attach/detach failures
//! - [`CallError`] - method invocation failures, including hook failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod hook;
mod method;
mod object;
mod target;

// Re-exports
pub use error::{BoxError, CallError, WeaveError};
pub use hook::{AfterFn, BeforeFn, HookKind, HookSpec, ReplaceFn};
pub use method::{BoundMethod, MethodFn, MethodHost, MethodId};
pub use object::{Class, ClassId, Instance, ReceiverId};
pub use target::Target;

/// Dynamic argument/result payload for method calls.
pub use serde_json::Value;
