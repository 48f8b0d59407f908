//! The attach engine: installs interception wrappers around matched
//! methods.
//!
//! Weaving runs three passes over the host's method set - Before, then
//! After, then Replace - and within each pass applies hooks in
//! registration order. Every wrapper privately captures the
//! implementation that was current at its own install time, forming an
//! explicit decorator chain: later-registered hooks become outer layers,
//! and each layer reaches the next one inward through its own capture.
//! No shared original table and no global dispatch state exist.
//!
//! Wrappers forward the receiver and argument slice untouched, so the
//! woven host's method set is structurally unchanged: same identifiers,
//! same arity pass-through. Unmatched methods are never redefined.
//!
//! While a weave is in progress the shared `installing` flag is set, and
//! every wrapper checks it first: any call made while wiring is still
//! underway passes straight through rather than invoking half-installed
//! hooks.

use crate::guard::ReentrancyGuard;
use crate::registry::HookRegistry;
use entwine_core::{
    AfterFn, BeforeFn, BoundMethod, CallError, HookKind, HookSpec, MethodFn, MethodHost, MethodId,
    ReplaceFn,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared pieces every wrapper for one weave captures.
#[derive(Clone)]
struct WrapperState {
    installing: Arc<AtomicBool>,
    /// `None` for single-instance attachments: nested calls re-fire
    /// hooks in that mode, intentionally.
    guard: Option<Arc<ReentrancyGuard>>,
}

/// Weave the registry's hooks onto a host.
///
/// Returns the original implementation of every method wrapped by this
/// call, captured before its first wrap (for the detach path). Sets the
/// `installing` flag for the duration of the wiring.
pub(crate) fn weave(
    host: &dyn MethodHost,
    registry: &HookRegistry,
    installing: &Arc<AtomicBool>,
    guard: Option<&Arc<ReentrancyGuard>>,
) -> BTreeMap<MethodId, MethodFn> {
    let state = WrapperState {
        installing: installing.clone(),
        guard: guard.cloned(),
    };

    installing.store(true, Ordering::SeqCst);

    let ids: Vec<MethodId> = host
        .method_ids()
        .into_iter()
        .filter(|id| !host.is_reserved(id))
        .collect();

    let mut originals = BTreeMap::new();

    install_pass(
        host,
        &ids,
        registry.before(),
        HookKind::Before,
        &mut originals,
        |id, inner, cb| before_wrapper(id, inner, cb, state.clone()),
    );
    install_pass(
        host,
        &ids,
        registry.after(),
        HookKind::After,
        &mut originals,
        |id, inner, cb| after_wrapper(id, inner, cb, state.clone()),
    );
    install_pass(
        host,
        &ids,
        registry.replace(),
        HookKind::Replace,
        &mut originals,
        |id, inner, cb| replace_wrapper(id, inner, cb, state.clone()),
    );

    installing.store(false, Ordering::SeqCst);
    originals
}

/// One pass: for each method, apply each matching hook in registration
/// order, capturing the then-current implementation as that wrapper's
/// inner callable.
fn install_pass<C: Clone>(
    host: &dyn MethodHost,
    ids: &[MethodId],
    hooks: &[HookSpec<C>],
    kind: HookKind,
    originals: &mut BTreeMap<MethodId, MethodFn>,
    build: impl Fn(MethodId, MethodFn, C) -> MethodFn,
) {
    for id in ids {
        for hook in hooks {
            if !hook.target.matches(id) {
                continue;
            }
            let Some(inner) = host.current(id) else {
                continue;
            };
            originals
                .entry(id.clone())
                .or_insert_with(|| inner.clone());
            host.redefine(id, build(id.clone(), inner, hook.callback.clone()));
            tracing::trace!(method = %id, kind = ?kind, "installed wrapper");
        }
    }
}

/// Latch acquisition shared by the three wrapper shapes.
///
/// Evaluates to the latch to hold for the call (`None` when unguarded);
/// if a latch is already held for this receiver on this call stack, the
/// wrapper returns early, passing straight through to the inner
/// callable without firing its callback.
macro_rules! acquire_or_pass_through {
    ($state:expr, $bound:expr, $args:expr) => {
        match $state.guard.as_deref() {
            Some(guard) => match guard.enter($bound.receiver().receiver_id()) {
                Some(latch) => Some(latch),
                None => return $bound.call($args),
            },
            None => None,
        }
    };
}

fn before_wrapper(
    id: MethodId,
    inner: MethodFn,
    callback: BeforeFn,
    state: WrapperState,
) -> MethodFn {
    Arc::new(move |receiver, args| {
        let bound = BoundMethod::bind(id.clone(), inner.clone(), receiver.clone());
        if state.installing.load(Ordering::SeqCst) {
            return bound.call(args);
        }
        let _latch = acquire_or_pass_through!(state, bound, args);
        callback(&bound, args).map_err(CallError::Hook)?;
        bound.call(args)
    })
}

fn after_wrapper(
    id: MethodId,
    inner: MethodFn,
    callback: AfterFn,
    state: WrapperState,
) -> MethodFn {
    Arc::new(move |receiver, args| {
        let bound = BoundMethod::bind(id.clone(), inner.clone(), receiver.clone());
        if state.installing.load(Ordering::SeqCst) {
            return bound.call(args);
        }
        let _latch = acquire_or_pass_through!(state, bound, args);
        let result = bound.call(args)?;
        callback(&bound, args, result).map_err(CallError::Hook)
    })
}

fn replace_wrapper(
    id: MethodId,
    inner: MethodFn,
    callback: ReplaceFn,
    state: WrapperState,
) -> MethodFn {
    Arc::new(move |receiver, args| {
        let bound = BoundMethod::bind(id.clone(), inner.clone(), receiver.clone());
        if state.installing.load(Ordering::SeqCst) {
            return bound.call(args);
        }
        let _latch = acquire_or_pass_through!(state, bound, args);
        callback(&bound, args).map_err(CallError::Hook)
    })
}
