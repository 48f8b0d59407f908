//! Call counting over any woven target.

use entwine::{Loom, Target, Weavable, WeaveError};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Counts calls to every method of whatever it is attached to, keyed by
/// qualified name (`Class#method`).
///
/// Counting happens in a before hook, so only calls that fire hooks are
/// tallied: with a class-wide attachment, nested intercepted calls on
/// the same receiver pass through latched and are not counted.
pub struct CallCount {
    loom: Loom,
    counts: Arc<Mutex<BTreeMap<String, u64>>>,
}

impl CallCount {
    /// Create a counter with an empty tally.
    pub fn new() -> Self {
        let counts = Arc::new(Mutex::new(BTreeMap::new()));
        let tally = counts.clone();
        let loom = Loom::builder()
            .before(Target::Any, move |method, _args| {
                *tally.lock().entry(method.qualified_name()).or_insert(0) += 1;
                Ok(())
            })
            .build();
        CallCount { loom, counts }
    }

    /// Start counting calls on a target.
    pub fn attach<T: Weavable>(&self, target: &T) -> Result<(), WeaveError> {
        self.loom.attach(target)
    }

    /// Stop counting; tallies so far are kept.
    pub fn detach<T: Weavable>(&self, target: &T) -> Result<(), WeaveError> {
        self.loom.detach(target)
    }

    /// Snapshot of the tallies.
    pub fn counts(&self) -> BTreeMap<String, u64> {
        self.counts.lock().clone()
    }
}

impl Default for CallCount {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::CallCount;
    use entwine::Class;
    use serde_json::json;

    fn counter_class() -> Class {
        let class = Class::new("Counter");
        class.define("incr", |recv, _args| {
            let n = recv.get("n").and_then(|v| v.as_i64()).unwrap_or(0) + 1;
            recv.set("n", json!(n));
            Ok(json!(n))
        });
        class.define("value", |recv, _args| {
            Ok(recv.get("n").unwrap_or(json!(0)))
        });
        class
    }

    #[test]
    fn tallies_by_qualified_name() {
        let class = counter_class();
        let count = CallCount::new();
        count.attach(&class).unwrap();

        let obj = class.instantiate();
        obj.call("incr", &[]).unwrap();
        obj.call("incr", &[]).unwrap();
        obj.call("incr", &[]).unwrap();
        obj.call("value", &[]).unwrap();

        let counts = count.counts();
        assert_eq!(counts.get("Counter#incr"), Some(&3));
        assert_eq!(counts.get("Counter#value"), Some(&1));
    }

    #[test]
    fn detach_stops_counting_and_keeps_tallies() {
        let class = counter_class();
        let count = CallCount::new();
        count.attach(&class).unwrap();

        let obj = class.instantiate();
        obj.call("incr", &[]).unwrap();
        count.detach(&class).unwrap();
        obj.call("incr", &[]).unwrap();

        assert_eq!(count.counts().get("Counter#incr"), Some(&1));
    }
}
