//! Per-attachment state: captured originals, the installing flag, and
//! the re-entrancy guard.

use crate::guard::ReentrancyGuard;
use entwine_core::{MethodFn, MethodHost, MethodId};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// State owned by the engine for one class-wide attachment.
///
/// `originals` maps each touched method to the implementation it had
/// before its first wrap, union-ed across repeated attaches of the same
/// configuration; detach restores from it. The `installing` flag and the
/// guard are shared into every wrapper installed for this attachment,
/// and all of it is discarded together on detach - wrapping never
/// touches global state, so independent attachments cannot collide.
pub(crate) struct AttachmentRecord {
    originals: BTreeMap<MethodId, MethodFn>,
    installing: Arc<AtomicBool>,
    guard: Arc<ReentrancyGuard>,
}

impl AttachmentRecord {
    pub(crate) fn new() -> Self {
        AttachmentRecord {
            originals: BTreeMap::new(),
            installing: Arc::new(AtomicBool::new(false)),
            guard: Arc::new(ReentrancyGuard::new()),
        }
    }

    pub(crate) fn installing(&self) -> &Arc<AtomicBool> {
        &self.installing
    }

    pub(crate) fn guard(&self) -> &Arc<ReentrancyGuard> {
        &self.guard
    }

    /// Fold newly captured originals in, keeping the first capture for
    /// any method already recorded.
    pub(crate) fn absorb(&mut self, captured: BTreeMap<MethodId, MethodFn>) {
        for (id, imp) in captured {
            self.originals.entry(id).or_insert(imp);
        }
    }

    pub(crate) fn touched(&self) -> usize {
        self.originals.len()
    }

    /// Restore every touched method and consume the record; the guard
    /// state goes with it.
    pub(crate) fn restore(self, host: &dyn MethodHost) -> usize {
        let restored = self.originals.len();
        for (id, original) in self.originals {
            host.redefine(&id, original);
        }
        restored
    }
}
