//! Detach semantics for class-wide attachments.

use entwine::Loom;
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

mod common;
use common::{call_i64, counter_class};

fn counting_loom(fired: Arc<AtomicUsize>) -> Loom {
    Loom::builder()
        .before("incr", move |_method, _args| {
            fired.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .build()
}

#[test]
fn detach_restores_original_behavior() {
    let class = counter_class();
    let fired = Arc::new(AtomicUsize::new(0));
    let loom = counting_loom(fired.clone());

    loom.attach(&class).unwrap();
    let obj = class.instantiate();
    call_i64(&obj, "incr").unwrap();
    call_i64(&obj, "incr").unwrap();

    loom.detach(&class).unwrap();
    assert_eq!(call_i64(&obj, "incr").unwrap(), 3);
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn detach_restores_transformed_results() {
    let class = counter_class();
    let loom = Loom::builder()
        .after("five", |_m, _a, result| {
            Ok(serde_json::json!(result.as_i64().unwrap() * 2))
        })
        .build();

    loom.attach(&class).unwrap();
    let obj = class.instantiate();
    assert_eq!(call_i64(&obj, "five").unwrap(), 10);

    loom.detach(&class).unwrap();
    assert_eq!(call_i64(&obj, "five").unwrap(), 5);
}

#[test]
fn reattach_behaves_as_the_first_attach() {
    let class = counter_class();
    let fired = Arc::new(AtomicUsize::new(0));
    let loom = counting_loom(fired.clone());

    loom.attach(&class).unwrap();
    let obj = class.instantiate();
    call_i64(&obj, "incr").unwrap();
    loom.detach(&class).unwrap();

    loom.attach(&class).unwrap();
    call_i64(&obj, "incr").unwrap();

    // One firing per external call: re-attach did not stack a second
    // wrapper chain on top of a stale one.
    assert_eq!(fired.load(Ordering::SeqCst), 2);
    assert_eq!(call_i64(&obj, "value").unwrap(), 2);
}

#[test]
fn detach_of_an_unattached_class_is_a_no_op() {
    let class = counter_class();
    let loom = counting_loom(Arc::new(AtomicUsize::new(0)));
    loom.detach(&class).unwrap();

    let obj = class.instantiate();
    assert_eq!(call_i64(&obj, "incr").unwrap(), 1);
}

#[test]
fn is_attached_tracks_the_attachment_lifecycle() {
    let class = counter_class();
    let loom = counting_loom(Arc::new(AtomicUsize::new(0)));

    assert!(!loom.is_attached(&class));
    loom.attach(&class).unwrap();
    assert!(loom.is_attached(&class));
    loom.detach(&class).unwrap();
    assert!(!loom.is_attached(&class));
}

// Independent looms layer rather than collide: each records its own
// originals. Unwinding in reverse attach order restores cleanly.
#[test]
fn independent_looms_layer_and_unwind_in_reverse_order() {
    let class = counter_class();
    let log = Arc::new(Mutex::new(Vec::new()));
    let (log_a, log_b) = (log.clone(), log.clone());

    let loom_a = Loom::builder()
        .before("incr", move |_m, _args| {
            log_a.lock().push("A");
            Ok(())
        })
        .build();
    let loom_b = Loom::builder()
        .before("incr", move |_m, _args| {
            log_b.lock().push("B");
            Ok(())
        })
        .build();

    loom_a.attach(&class).unwrap();
    loom_b.attach(&class).unwrap();

    let obj = class.instantiate();
    call_i64(&obj, "incr").unwrap();
    // Both looms fire: each holds its own latch, so neither suppresses
    // the other. B wove last, so B's wrapper is outermost.
    assert_eq!(*log.lock(), vec!["B", "A"]);

    log.lock().clear();
    loom_b.detach(&class).unwrap();
    call_i64(&obj, "incr").unwrap();
    assert_eq!(*log.lock(), vec!["A"]);

    log.lock().clear();
    loom_a.detach(&class).unwrap();
    call_i64(&obj, "incr").unwrap();
    assert!(log.lock().is_empty());
}
