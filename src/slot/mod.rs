//! Single-instance slot family.
//!
//! The module tree is intentionally stratified:
//! - `once::*` is the core check-lock-check primitive.
//! - `lazy::*` packages a slot with its one-shot initializer.
//! - `eager` is the construct-at-start alternative.
//! - `traits` is the accessor seam shared by the variants.

pub mod eager;
pub mod lazy;
pub mod once;
pub mod traits;

pub use eager::EagerSlot;
pub use lazy::LazySlot;
pub use once::OnceSlot;
pub use traits::SharedInstance;

#[cfg(feature = "proptest")]
pub use once::strategies;
