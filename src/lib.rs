//! # `solo` - Single-Instance Slot Toolkit
//!
//! Lazy, thread-safe single-instance slots with a lock-free steady-state path.
//! A slot holds at most one instance of a value, constructed on first demand by
//! exactly one caller even under concurrent access.
//!
//! ## Guarantees
//!
//! ### Uniqueness
//! - **At most one instance per slot**: under arbitrary concurrency, exactly one
//!   construction occurs; every caller observes the same instance (identity, not
//!   just equality) for the lifetime of the slot.
//! - **No partial observation**: a caller can never see a half-constructed value.
//!   Publication uses release/acquire ordering, so construction happens-before
//!   any observation by any thread.
//!
//! ### Steady-state performance
//! - **Lock-free fast path**: once a slot is initialized, access is a single
//!   atomic load. No lock is taken on the fast path, ever.
//! - **Scoped slow path**: only callers that arrive before initialization
//!   completes touch the slot's lock, and only until publication.
//!
//! ### Failure recovery
//! - **No permanent poisoning**: a constructor that fails (error or panic)
//!   publishes nothing; the slot stays empty and a later caller may retry
//!   construction from scratch.
//!
//! ## Architecture
//!
//! The slot family is stratified:
//!
//! 1. **[`OnceSlot`]**: the core check-lock-check primitive. An explicit,
//!    injectable owner object rather than ambient global state; placing one in
//!    a `static` recovers the process-wide singleton idiom.
//! 2. **[`LazySlot`]**: a slot packaged with its one-shot initializer, so the
//!    factory function is the sole path to construction. Dereferences to the
//!    instance.
//! 3. **[`EagerSlot`]**: the construct-at-start alternative. Trivially safe,
//!    never locks, pays construction cost even if the value goes unused.
//! 4. **[`SharedInstance`]**: the accessor seam the variants share, so calling
//!    code (and tests) can swap strategies without changing shape.
//!
//! ## Example
//!
//! ```rust
//! use solo::OnceSlot;
//! use std::thread;
//!
//! let slot = OnceSlot::new();
//!
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             // Exactly one thread runs the constructor; all four observe
//!             // the same instance.
//!             let value = slot.get_or_init(|| vec![1, 2, 3]);
//!             assert_eq!(value.len(), 3);
//!         });
//!     }
//! });
//!
//! // Process-wide idiom: a slot in a `static`.
//! static ANSWER: OnceSlot<u64> = OnceSlot::new();
//! assert_eq!(*ANSWER.get_or_init(|| 42), 42);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod slot;

pub use slot::{EagerSlot, LazySlot, OnceSlot, SharedInstance};

// Compile-time layout assertions.
const _: () = {
    use core::mem;

    // EagerSlot is a transparent wrapper.
    assert!(mem::size_of::<EagerSlot<u64>>() == mem::size_of::<u64>());

    // Slots stay small and allocation-free (struct size). Intentionally loose
    // upper bounds to avoid platform brittleness, while still catching
    // accidental large regressions.
    assert!(mem::size_of::<OnceSlot<u64>>() <= mem::size_of::<usize>() * 6);
    assert!(mem::size_of::<LazySlot<u64>>() <= mem::size_of::<usize>() * 8);
};
