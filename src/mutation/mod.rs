//! Optimistic concurrency on mutation.
//!
//! Records carry a monotonically incrementing version counter; updates are
//! conditioned on both identity and the version the record was read at, so
//! a concurrent writer surfaces as an explicit conflict instead of a lost
//! write. Field-level edits are expressed as explicit [`FieldPatch`]es and
//! applied onto a loaded record before re-validation.

pub mod guard;
pub mod patch;
pub mod store;

pub use guard::UpdateGuard;
pub use patch::FieldPatch;
pub use store::{BoxError, StoreError, Versioned, VersionedStore};
