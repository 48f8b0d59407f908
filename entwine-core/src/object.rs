//! The built-in dynamic object model.
//!
//! Rust has no mutable dispatch tables, so Entwine ships a small host
//! model that satisfies the [`MethodHost`] contract: a [`Class`] is a
//! named, interior-mutable method table; an [`Instance`] shares its
//! class's table, carries a singleton override table (consulted first)
//! and a dynamic field map for state.
//!
//! Identity is explicit: every class gets a [`ClassId`] and every
//! instance a [`ReceiverId`], allocated from a process-wide counter.
//! Receiver identity is what re-entrancy latches key on.

use crate::error::CallError;
use crate::method::{BoundMethod, MethodFn, MethodHost, MethodId};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Unique identity of a [`Class`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ClassId(u64);

/// Unique identity of an [`Instance`], used to key re-entrancy state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ReceiverId(u64);

struct ClassInner {
    id: ClassId,
    name: String,
    table: RwLock<BTreeMap<MethodId, MethodFn>>,
}

/// A named type descriptor with a redefinable method table.
///
/// Cloning is cheap and shares the table: instances created from any
/// clone see redefinitions made through any other, which is what makes
/// class-wide attachment affect present and future instances alike.
#[derive(Clone)]
pub struct Class {
    inner: Arc<ClassInner>,
}

impl Class {
    /// Create an empty class.
    pub fn new(name: impl Into<String>) -> Self {
        Class {
            inner: Arc::new(ClassInner {
                id: ClassId(next_id()),
                name: name.into(),
                table: RwLock::new(BTreeMap::new()),
            }),
        }
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The class's unique identity.
    pub fn id(&self) -> ClassId {
        self.inner.id
    }

    /// Define (or overwrite) a method.
    pub fn define<F>(&self, name: impl Into<MethodId>, body: F)
    where
        F: Fn(&Instance, &[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        self.inner
            .table
            .write()
            .insert(name.into(), Arc::new(body));
    }

    /// Create an instance of this class.
    pub fn instantiate(&self) -> Instance {
        Instance {
            inner: Arc::new(InstanceInner {
                id: ReceiverId(next_id()),
                class: self.clone(),
                singleton: RwLock::new(BTreeMap::new()),
                fields: RwLock::new(BTreeMap::new()),
            }),
        }
    }
}

impl MethodHost for Class {
    fn method_ids(&self) -> Vec<MethodId> {
        self.inner.table.read().keys().cloned().collect()
    }

    fn current(&self, id: &MethodId) -> Option<MethodFn> {
        self.inner.table.read().get(id).cloned()
    }

    fn redefine(&self, id: &MethodId, imp: MethodFn) {
        self.inner.table.write().insert(id.clone(), imp);
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.inner.name)
            .field("methods", &self.inner.table.read().len())
            .finish()
    }
}

struct InstanceInner {
    id: ReceiverId,
    class: Class,
    singleton: RwLock<BTreeMap<MethodId, MethodFn>>,
    fields: RwLock<BTreeMap<String, Value>>,
}

/// An object: shares its [`Class`] method table, owns singleton
/// overrides and dynamic field state.
///
/// Cloning is cheap and preserves identity (both clones are the same
/// receiver). Method lookup consults the singleton table first, then the
/// class table.
#[derive(Clone)]
pub struct Instance {
    inner: Arc<InstanceInner>,
}

impl Instance {
    /// The class this instance was created from.
    pub fn class(&self) -> &Class {
        &self.inner.class
    }

    /// The instance's unique receiver identity.
    pub fn receiver_id(&self) -> ReceiverId {
        self.inner.id
    }

    /// Read a field.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.inner.fields.read().get(field).cloned()
    }

    /// Write a field.
    pub fn set(&self, field: impl Into<String>, value: Value) {
        self.inner.fields.write().insert(field.into(), value);
    }

    /// Invoke a method through the current lookup chain (singleton
    /// overrides first, then the class table).
    pub fn call(&self, name: impl Into<MethodId>, args: &[Value]) -> Result<Value, CallError> {
        let id = name.into();
        let Some(imp) = self.current(&id) else {
            return Err(CallError::NoSuchMethod(id));
        };
        BoundMethod::bind(id, imp, self.clone()).call(args)
    }
}

impl MethodHost for Instance {
    fn method_ids(&self) -> Vec<MethodId> {
        self.inner.class.method_ids()
    }

    fn current(&self, id: &MethodId) -> Option<MethodFn> {
        if let Some(imp) = self.inner.singleton.read().get(id) {
            return Some(imp.clone());
        }
        self.inner.class.current(id)
    }

    fn redefine(&self, id: &MethodId, imp: MethodFn) {
        self.inner.singleton.write().insert(id.clone(), imp);
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.inner.class.name())
            .field("id", &self.inner.id)
            .finish()
    }
}
