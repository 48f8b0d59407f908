//! # entwine - Method-Interception Engine
//!
//! `entwine` lets a caller register cross-cutting behaviors - run before
//! a method, run after a method, or replace a method entirely - and
//! weave them onto a target type or a single object instance, without
//! editing the target's implementation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use entwine::{Class, Loom, Target};
//!
//! let class = Class::new("Counter");
//! class.define("incr", |recv, _args| { /* ... */ });
//!
//! let loom = Loom::builder()
//!     .before(Target::Any, |method, _args| {
//!         println!("-> {}", method.qualified_name());
//!         Ok(())
//!     })
//!     .build();
//!
//! loom.attach(&class)?;
//! ```
//!
//! ## Scopes
//!
//! - **Class-wide** ([`Loom::attach`] on a [`Class`]): every instance,
//!   present and future, flows through the installed wrapper chain. A
//!   re-entrancy latch makes only the outermost active layer for a call
//!   chain on a given receiver fire its callback; nested intercepted
//!   calls pass straight through. Detach restores the originals.
//! - **Single-instance** ([`Loom::attach`] on an [`Instance`]): only
//!   that object is wrapped, unguarded - nested calls re-fire hooks -
//!   and detach is reported as unsupported.
//!
//! ## Layering
//!
//! Hooks weave in three passes (before, after, replace); within a pass,
//! registration order decides nesting, with the most recently registered
//! hook outermost. Because of the latch, stacking several hooks of the
//! same kind on one method means only the outermost observably fires on
//! an external call; this literal behavior is kept and pinned by test.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod attachment;
mod guard;
mod loom;
mod registry;
mod weaver;

pub use loom::{Loom, LoomBuilder, Weavable};
pub use registry::HookRegistry;

// Core types, re-exported for one-import ergonomics.
pub use entwine_core::{
    // Hook shapes
    AfterFn,
    BeforeFn,
    // Errors
    BoxError,
    // Host model
    BoundMethod,
    CallError,
    Class,
    ClassId,
    HookKind,
    HookSpec,
    Instance,
    MethodFn,
    MethodHost,
    MethodId,
    ReceiverId,
    ReplaceFn,
    // Selection
    Target,
    Value,
    WeaveError,
};
