//! Re-entrancy guarding for class-wide attachments.
//!
//! When an intercepted method calls another intercepted method on the
//! same receiver, the inner layer must pass straight through instead of
//! re-firing hook logic. The guard tracks which (receiver, call stack)
//! pairs currently have a hook chain active.
//!
//! # Not a lock
//!
//! This is **not** a cross-thread mutual-exclusion lock. It only
//! suppresses nested hook firing within one logical call stack: entries
//! are keyed by receiver identity *and* thread identity, so concurrent
//! calls on the same receiver from different threads each fire their own
//! hooks independently. Callers needing mutual exclusion must synchronize
//! externally.

use entwine_core::ReceiverId;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::thread::{self, ThreadId};

/// Per-attachment re-entrancy state.
///
/// One guard exists per class-wide attachment and is discarded with it
/// on detach. Single-instance attachments carry no guard at all; their
/// hooks re-fire on nested calls by design.
#[derive(Default)]
pub(crate) struct ReentrancyGuard {
    active: Mutex<HashSet<(ReceiverId, ThreadId)>>,
}

impl ReentrancyGuard {
    /// Create a guard with no active latches.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Try to latch the current call stack for a receiver.
    ///
    /// Returns `None` if a latch is already held for this receiver on
    /// this thread - the caller must pass through without firing hooks.
    /// The returned [`Latch`] releases on drop, on success and failure
    /// paths alike, so a failing hook never wedges future calls.
    pub(crate) fn enter(&self, receiver: ReceiverId) -> Option<Latch<'_>> {
        let key = (receiver, thread::current().id());
        if !self.active.lock().insert(key) {
            return None;
        }
        Some(Latch { guard: self, key })
    }

    /// Whether a latch is currently held for a receiver on this thread.
    pub(crate) fn is_held(&self, receiver: ReceiverId) -> bool {
        let key = (receiver, thread::current().id());
        self.active.lock().contains(&key)
    }
}

/// A held latch; releasing is dropping.
pub(crate) struct Latch<'a> {
    guard: &'a ReentrancyGuard,
    key: (ReceiverId, ThreadId),
}

impl Drop for Latch<'_> {
    fn drop(&mut self) {
        self.guard.active.lock().remove(&self.key);
    }
}
