use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use solo::OnceSlot;
use std::sync::{Barrier, Mutex, OnceLock};
use std::thread;

fn bench_steady_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("steady_state_access");

    // Post-initialization access: the documented motivation for
    // check-lock-check is that this path takes no lock.
    let slot = OnceSlot::new();
    slot.get_or_init(|| 42u64);
    group.bench_function("once_slot_get_or_init", |b| {
        b.iter(|| *black_box(&slot).get_or_init(|| 42))
    });
    group.bench_function("once_slot_get", |b| {
        b.iter(|| *black_box(&slot).get().unwrap())
    });

    let std_lock: OnceLock<u64> = OnceLock::new();
    std_lock.get_or_init(|| 42);
    group.bench_function("std_once_lock", |b| {
        b.iter(|| *black_box(&std_lock).get_or_init(|| 42))
    });

    // The "synchronize the whole accessor" strategy pays the lock every call.
    let mutexed: Mutex<Option<u64>> = Mutex::new(Some(42));
    group.bench_function("mutex_every_call", |b| {
        b.iter(|| {
            let mut guard = black_box(&mutexed).lock().unwrap();
            *guard.get_or_insert(42)
        })
    });

    group.finish();
}

fn bench_first_init(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_init");

    group.bench_function("once_slot_uncontended", |b| {
        b.iter_batched(
            OnceSlot::new,
            |slot| *slot.get_or_init(|| black_box(42u64)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("once_slot_contended_x4", |b| {
        b.iter_batched(
            || (OnceSlot::new(), Barrier::new(4)),
            |(slot, barrier)| {
                thread::scope(|s| {
                    for _ in 0..4 {
                        let slot = &slot;
                        let barrier = &barrier;
                        s.spawn(move || {
                            barrier.wait();
                            *slot.get_or_init(|| black_box(42u64))
                        });
                    }
                });
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_steady_state, bench_first_init);
criterion_main!(benches);
