//! Call tracing over any woven target.

use entwine::{Loom, Target, Weavable, WeaveError};
use std::sync::Arc;

/// Reports each outer call to a method of whatever it is attached to,
/// by qualified name (`Class#method`).
///
/// The default sink emits a `tracing` event; [`CallTrace::with_sink`]
/// routes the report elsewhere (a collector in tests, a writer, ...).
/// As with [`CallCount`], class-wide nested calls are latched and go
/// unreported.
///
/// [`CallCount`]: crate::CallCount
pub struct CallTrace {
    loom: Loom,
}

impl CallTrace {
    /// Create a tracer reporting through `tracing::info!`.
    pub fn new() -> Self {
        Self::with_sink(|call| tracing::info!(target: "entwine::trace", %call))
    }

    /// Create a tracer with a custom sink.
    pub fn with_sink(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        let sink = Arc::new(sink);
        let loom = Loom::builder()
            .before(Target::Any, move |method, _args| {
                sink(&method.qualified_name());
                Ok(())
            })
            .build();
        CallTrace { loom }
    }

    /// Start tracing calls on a target.
    pub fn attach<T: Weavable>(&self, target: &T) -> Result<(), WeaveError> {
        self.loom.attach(target)
    }

    /// Stop tracing.
    pub fn detach<T: Weavable>(&self, target: &T) -> Result<(), WeaveError> {
        self.loom.detach(target)
    }
}

impl Default for CallTrace {
    fn default() -> Self {
        Self::new()
    }
}
