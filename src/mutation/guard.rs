//! Optimistic-concurrency guard over conditional updates.

use std::future::Future;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::error::{GovernanceError, GovernanceResult};
use crate::mutation::store::{StoreError, Versioned, VersionedStore};
use crate::observability::metrics;

/// Wraps a [`VersionedStore`] with the deadline policy and the zero-rows
/// disambiguation.
///
/// Per-record lifecycle: read at version `v`, edit in memory, then
/// [`apply`](UpdateGuard::apply). On success the record is clean at the
/// store-reported version; on zero rows the attempt is terminal and the
/// caller must re-read and retry or surface the conflict.
pub struct UpdateGuard<S> {
    store: S,
    operation_timeout: Duration,
}

impl<S: VersionedStore> UpdateGuard<S> {
    pub fn new(store: S, config: &StoreConfig) -> Self {
        Self::with_timeout(store, config.operation_timeout())
    }

    pub fn with_timeout(store: S, operation_timeout: Duration) -> Self {
        Self {
            store,
            operation_timeout,
        }
    }

    /// Deadline-bounded read. Absent ids surface as
    /// [`GovernanceError::NotFound`].
    pub async fn get(&self, id: &S::Id) -> GovernanceResult<S::Record> {
        match self.bounded("get", self.store.get(id)).await? {
            Some(record) => Ok(record),
            None => Err(GovernanceError::NotFound),
        }
    }

    /// Commit an edited record, conditioned on the version it was read at.
    ///
    /// On success the store-reported version is adopted into `record` and
    /// returned. Zero rows affected is ambiguous between "record no longer
    /// exists" and "a concurrent writer changed it first"; an existence
    /// re-check splits that into [`GovernanceError::NotFound`] and
    /// [`GovernanceError::EditConflict`].
    pub async fn apply(&self, id: &S::Id, record: &mut S::Record) -> GovernanceResult<i64> {
        let expected_version = record.version();

        match self
            .bounded("update", self.store.update(id, expected_version, record))
            .await?
        {
            Some(new_version) => {
                record.set_version(new_version);
                Ok(new_version)
            }
            None => {
                if self.bounded("update", self.store.get(id)).await?.is_some() {
                    Err(GovernanceError::EditConflict)
                } else {
                    Err(GovernanceError::NotFound)
                }
            }
        }
    }

    /// Run a store call under the configured deadline. Timeouts abort the
    /// operation and surface as a server fault; they are never silently
    /// retried.
    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> GovernanceResult<T> {
        match tokio::time::timeout(self.operation_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(fault)) => {
                tracing::error!(operation, error = %fault, "store fault");
                Err(GovernanceError::Store(fault))
            }
            Err(_) => {
                tracing::error!(operation, timeout = ?self.operation_timeout, "store operation timed out");
                metrics::record_store_timeout(operation);
                Err(GovernanceError::StoreTimeout(self.operation_timeout))
            }
        }
    }
}

impl<S> UpdateGuard<S> {
    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
