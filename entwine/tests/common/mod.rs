#![allow(dead_code)] // not every test binary uses every fixture

use entwine::{CallError, Class, Instance, Value};
use serde_json::json;

// ============================================================================
// Fixture Class
// ============================================================================

/// A counter with a mix of pure, mutating, and self-calling methods:
///
/// - `value`: returns the current count
/// - `incr`: bumps the count, returns the new value
/// - `add`: bumps the count by the first argument, returns the new value
/// - `five`: returns 5, ignores arguments
/// - `refresh`: calls `incr` on self (nested intercepted call)
pub fn counter_class() -> Class {
    let class = Class::new("Counter");
    class.define("value", |recv, _args| Ok(recv.get("n").unwrap_or(json!(0))));
    class.define("incr", |recv, _args| {
        let n = current(recv) + 1;
        recv.set("n", json!(n));
        Ok(json!(n))
    });
    class.define("add", |recv, args| {
        let delta = args.first().and_then(Value::as_i64).unwrap_or(0);
        let n = current(recv) + delta;
        recv.set("n", json!(n));
        Ok(json!(n))
    });
    class.define("five", |_recv, _args| Ok(json!(5)));
    class.define("refresh", |recv, _args| recv.call("incr", &[]));
    class
}

pub fn current(recv: &Instance) -> i64 {
    recv.get("n").and_then(|v| v.as_i64()).unwrap_or(0)
}

/// Invoke a no-argument method expected to return an integer.
pub fn call_i64(recv: &Instance, name: &str) -> Result<i64, CallError> {
    let result = recv.call(name, &[])?;
    Ok(result.as_i64().expect("integer result"))
}
