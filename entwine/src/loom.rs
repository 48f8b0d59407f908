//! The engine facade: configuration, attachment, and detachment.

use crate::attachment::AttachmentRecord;
use crate::registry::HookRegistry;
use crate::weaver;
use entwine_core::{
    BoundMethod, BoxError, Class, ClassId, Instance, Target, Value, WeaveError,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// A configured set of hooks that can be woven onto classes and
/// instances.
///
/// A `Loom` owns its [`HookRegistry`] and the per-class attachment
/// records it creates; independent looms attached to the same class
/// layer over each other without colliding.
///
/// # Example
///
/// ```rust,ignore
/// let loom = Loom::builder()
///     .before(Target::Any, |method, _args| {
///         println!("calling {}", method.qualified_name());
///         Ok(())
///     })
///     .build();
///
/// loom.attach(&class)?;        // class-wide: every instance, present and future
/// loom.attach(&instance)?;     // single-instance: this object only
/// loom.detach(&class)?;        // restores originals
/// loom.detach(&instance)       // Err(WeaveError::DetachUnsupported)
/// ```
pub struct Loom {
    registry: HookRegistry,
    attachments: Mutex<HashMap<ClassId, AttachmentRecord>>,
}

impl Loom {
    /// Start configuring a loom.
    pub fn builder() -> LoomBuilder {
        LoomBuilder {
            registry: HookRegistry::new(),
        }
    }

    /// Build a loom from an already-populated registry.
    pub fn with_registry(registry: HookRegistry) -> Self {
        Loom {
            registry,
            attachments: Mutex::new(HashMap::new()),
        }
    }

    /// Weave this loom's hooks onto a target.
    pub fn attach<T: Weavable>(&self, target: &T) -> Result<(), WeaveError> {
        target.attach_to(self)
    }

    /// Reverse a class-wide attachment; report single-instance detach
    /// as unsupported.
    pub fn detach<T: Weavable>(&self, target: &T) -> Result<(), WeaveError> {
        target.detach_from(self)
    }

    /// Whether this loom currently holds an attachment record for a
    /// class.
    pub fn is_attached(&self, class: &Class) -> bool {
        self.attachments.lock().contains_key(&class.id())
    }

    fn attach_class(&self, class: &Class) -> Result<(), WeaveError> {
        let mut attachments = self.attachments.lock();
        let record = attachments
            .entry(class.id())
            .or_insert_with(AttachmentRecord::new);

        let captured = weaver::weave(
            class,
            &self.registry,
            record.installing(),
            Some(record.guard()),
        );
        record.absorb(captured);

        tracing::debug!(
            class = %class.name(),
            touched = record.touched(),
            hooks = self.registry.len(),
            "attached class-wide"
        );
        Ok(())
    }

    fn detach_class(&self, class: &Class) -> Result<(), WeaveError> {
        let Some(record) = self.attachments.lock().remove(&class.id()) else {
            // Nothing of ours to restore.
            return Ok(());
        };
        let restored = record.restore(class);
        tracing::debug!(class = %class.name(), restored, "detached class-wide");
        Ok(())
    }

    fn attach_instance(&self, instance: &Instance) -> Result<(), WeaveError> {
        // Singleton weaving owns no record: there is no restore path, and
        // nested calls intentionally run unguarded.
        let installing = Arc::new(AtomicBool::new(false));
        weaver::weave(instance, &self.registry, &installing, None);

        tracing::debug!(
            class = %instance.class().name(),
            receiver = ?instance.receiver_id(),
            hooks = self.registry.len(),
            "attached single-instance"
        );
        Ok(())
    }
}

/// Targets a [`Loom`] can weave onto: the built-in [`Class`]
/// (class-wide scope) and [`Instance`] (single-instance scope).
pub trait Weavable {
    /// Weave the loom's hooks onto `self`.
    fn attach_to(&self, loom: &Loom) -> Result<(), WeaveError>;
    /// Reverse the attachment, or report it unsupported.
    fn detach_from(&self, loom: &Loom) -> Result<(), WeaveError>;
}

impl Weavable for Class {
    fn attach_to(&self, loom: &Loom) -> Result<(), WeaveError> {
        loom.attach_class(self)
    }

    fn detach_from(&self, loom: &Loom) -> Result<(), WeaveError> {
        loom.detach_class(self)
    }
}

impl Weavable for Instance {
    fn attach_to(&self, loom: &Loom) -> Result<(), WeaveError> {
        loom.attach_instance(self)
    }

    fn detach_from(&self, _loom: &Loom) -> Result<(), WeaveError> {
        Err(WeaveError::DetachUnsupported)
    }
}

/// Builder for a [`Loom`]'s hook configuration.
///
/// Targets accept anything convertible to [`Target`]: `Target::Any`, an
/// exact name (`&str`/`String`), a `regex::Regex`, or a `Vec`/array of
/// targets.
pub struct LoomBuilder {
    registry: HookRegistry,
}

impl LoomBuilder {
    /// Register a hook to run before matched methods. Side effects only;
    /// the method's own result is returned unchanged.
    pub fn before<T, F>(mut self, target: T, callback: F) -> Self
    where
        T: Into<Target>,
        F: Fn(&BoundMethod, &[Value]) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.registry
            .register_before(target.into(), Arc::new(callback));
        self
    }

    /// Register a hook to run after matched methods, receiving and
    /// possibly transforming the result.
    pub fn after<T, F>(mut self, target: T, callback: F) -> Self
    where
        T: Into<Target>,
        F: Fn(&BoundMethod, &[Value], Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.registry
            .register_after(target.into(), Arc::new(callback));
        self
    }

    /// Register a hook that replaces matched methods entirely. The
    /// callback may invoke the inner callable, or skip it.
    pub fn replace<T, F>(mut self, target: T, callback: F) -> Self
    where
        T: Into<Target>,
        F: Fn(&BoundMethod, &[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.registry
            .register_replace(target.into(), Arc::new(callback));
        self
    }

    /// Finish configuration.
    pub fn build(self) -> Loom {
        Loom::with_registry(self.registry)
    }
}
