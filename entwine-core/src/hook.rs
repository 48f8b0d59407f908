//! Hook kinds, callback shapes, and registered hook specifications.
//!
//! A hook is a callback plus a [`Target`]. The three kinds differ in
//! what the callback controls:
//!
//! - **Before**: side effects only; the wrapped method's result is
//!   computed afterwards and returned unchanged.
//! - **After**: receives the already-computed result and returns the
//!   (possibly transformed) replacement.
//! - **Replace**: solely responsible for the result; may or may not
//!   invoke the inner callable at all.
//!
//! Every callback receives the inner callable bound to the actual call
//! receiver as a [`BoundMethod`], plus the untouched argument slice.

use crate::error::BoxError;
use crate::method::BoundMethod;
use crate::target::Target;
use serde_json::Value;
use std::sync::Arc;

/// The three interception positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum HookKind {
    /// Runs before the wrapped method.
    Before,
    /// Runs after the wrapped method, transforming its result.
    After,
    /// Replaces the wrapped method entirely.
    Replace,
}

/// Callback for [`HookKind::Before`]: `(inner, args)`, side effects only.
pub type BeforeFn =
    Arc<dyn Fn(&BoundMethod, &[Value]) -> Result<(), BoxError> + Send + Sync + 'static>;

/// Callback for [`HookKind::After`]: `(inner, args, result)` to new result.
pub type AfterFn =
    Arc<dyn Fn(&BoundMethod, &[Value], Value) -> Result<Value, BoxError> + Send + Sync + 'static>;

/// Callback for [`HookKind::Replace`]: `(inner, args)` to result.
pub type ReplaceFn =
    Arc<dyn Fn(&BoundMethod, &[Value]) -> Result<Value, BoxError> + Send + Sync + 'static>;

/// A registered hook: a target plus its callback.
#[derive(Clone)]
pub struct HookSpec<C> {
    /// Which method identifiers the hook applies to.
    pub target: Target,
    /// The callback to fire.
    pub callback: C,
}
