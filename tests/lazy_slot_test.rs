use solo::LazySlot;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;

#[test]
fn test_lazy_slot_forces_once() {
    let constructions = AtomicUsize::new(0);
    let slot = LazySlot::new(|| {
        constructions.fetch_add(1, Ordering::SeqCst);
        42u64
    });

    assert!(!LazySlot::is_initialized(&slot));
    assert_eq!(LazySlot::get(&slot), None);
    assert_eq!(constructions.load(Ordering::SeqCst), 0);

    assert_eq!(*slot, 42);
    assert_eq!(*slot, 42);
    assert!(LazySlot::is_initialized(&slot));
    assert_eq!(LazySlot::get(&slot), Some(&42));
    assert_eq!(constructions.load(Ordering::SeqCst), 1);
}

#[test]
fn test_lazy_slot_deref_identity() {
    let slot = LazySlot::new(|| String::from("instance"));
    let a: &String = &slot;
    let b: &String = &slot;
    assert!(ptr::eq(a, b));
}

#[test]
fn test_lazy_slot_concurrent_force() {
    let constructions = AtomicUsize::new(0);
    let slot = LazySlot::new(|| {
        constructions.fetch_add(1, Ordering::SeqCst);
        vec![7u8; 32]
    });
    let barrier = Barrier::new(8);

    let addresses: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let slot = &slot;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    ptr::from_ref(LazySlot::force(slot)) as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(constructions.load(Ordering::SeqCst), 1);
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_lazy_slot_default() {
    let slot: LazySlot<u64> = LazySlot::default();
    assert_eq!(*slot, 0);
}

#[test]
fn test_lazy_slot_into_inner() {
    let forced = LazySlot::new(|| 5u64);
    LazySlot::force(&forced);
    match LazySlot::into_inner(forced) {
        Ok(value) => assert_eq!(value, 5),
        Err(_) => panic!("forced slot must yield its instance"),
    }

    let unforced = LazySlot::new(|| 5u64);
    match LazySlot::into_inner(unforced) {
        Ok(_) => panic!("unforced slot must yield its initializer"),
        Err(init) => assert_eq!(init(), 5),
    }
}

#[test]
fn test_lazy_slot_consumed_initializer_panics_loudly() {
    let slot: LazySlot<u64, fn() -> u64> = LazySlot::new(|| panic!("constructor exploded"));

    let first = catch_unwind(AssertUnwindSafe(|| LazySlot::force(&slot)));
    assert!(first.is_err());
    assert!(!LazySlot::is_initialized(&slot));

    // The one-shot initializer is gone; later access fails loudly instead of
    // yielding a placeholder.
    let second = catch_unwind(AssertUnwindSafe(|| LazySlot::force(&slot)));
    assert!(second.is_err());
}
