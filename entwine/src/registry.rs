//! Ordered hook registration.

use entwine_core::{AfterFn, BeforeFn, HookSpec, ReplaceFn, Target};

/// Three ordered sequences of registered hooks, one per kind.
///
/// Insertion order is significant: within a kind, later registrations
/// become outer wrapper layers at attach time. Duplicate or overlapping
/// targets are legal and all apply; no validation is performed.
#[derive(Clone, Default)]
pub struct HookRegistry {
    before: Vec<HookSpec<BeforeFn>>,
    after: Vec<HookSpec<AfterFn>>,
    replace: Vec<HookSpec<ReplaceFn>>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a before hook.
    pub fn register_before(&mut self, target: Target, callback: BeforeFn) {
        self.before.push(HookSpec { target, callback });
    }

    /// Append an after hook.
    pub fn register_after(&mut self, target: Target, callback: AfterFn) {
        self.after.push(HookSpec { target, callback });
    }

    /// Append a replace hook.
    pub fn register_replace(&mut self, target: Target, callback: ReplaceFn) {
        self.replace.push(HookSpec { target, callback });
    }

    /// Total number of registered hooks across all kinds.
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len() + self.replace.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn before(&self) -> &[HookSpec<BeforeFn>] {
        &self.before
    }

    pub(crate) fn after(&self) -> &[HookSpec<AfterFn>] {
        &self.after
    }

    pub(crate) fn replace(&self) -> &[HookSpec<ReplaceFn>] {
        &self.replace
    }
}
