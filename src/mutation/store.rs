//! The seam between the update guard and the external store.

use async_trait::async_trait;
use thiserror::Error;

/// Boxed driver/connection error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Opaque transient fault from the external store. The cause is kept for
/// server-side logging; it is never shown to the caller.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(BoxError);

impl StoreError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self(source.into())
    }
}

/// A record carrying an optimistic-concurrency version counter.
///
/// The version increments by exactly one per successful update, is never
/// reset, and is owned by the store: after an update the caller adopts the
/// version the store reports rather than assuming `old + 1`.
pub trait Versioned {
    fn version(&self) -> i64;
    fn set_version(&mut self, version: i64);
}

/// Conditional-update operations the guard needs from a store.
///
/// Implementations execute against the real store; the store remains the
/// single source of truth and no record is cached in process.
#[async_trait]
pub trait VersionedStore: Send + Sync {
    type Id: Send + Sync;
    type Record: Versioned + Send + Sync;

    /// Fetch the current record for `id`, or `None` when it does not exist.
    async fn get(&self, id: &Self::Id) -> Result<Option<Self::Record>, StoreError>;

    /// Conditionally write `record`, matching on both identity and
    /// `expected_version`, incrementing the stored version by one.
    ///
    /// Returns `Some(new_version)` when exactly one row matched (e.g.
    /// `... SET ..., version = version + 1 WHERE id = $1 AND version = $2
    /// RETURNING version`), `None` when zero rows matched — which leaves
    /// "gone" and "concurrently changed" indistinguishable at this level;
    /// the guard disambiguates.
    async fn update(
        &self,
        id: &Self::Id,
        expected_version: i64,
        record: &Self::Record,
    ) -> Result<Option<i64>, StoreError>;
}
