//! Per-client admission registry with idle eviction.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::admission::bucket::ClientBucket;
use crate::config::AdmissionConfig;
use crate::observability::metrics;

/// One token-bucket limiter per client key, shared across all concurrent
/// request handlers.
///
/// A single exclusive critical section protects the client map: admission
/// is O(1) under the lock, the sweep is O(registry size) under the same
/// lock, so a key is never evicted while it is being admitted. The registry
/// has no global instance; construct one and pass it to the handlers.
pub struct ClientRegistry {
    config: AdmissionConfig,
    clients: Mutex<HashMap<String, ClientBucket>>,
}

impl ClientRegistry {
    pub fn new(config: AdmissionConfig) -> Self {
        Self {
            config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Decide whether a request from `client_key` may proceed.
    ///
    /// Creates a full bucket on first sight of a key, refills by elapsed
    /// time, and consumes one token on admission. `last_seen` is updated
    /// whether or not the request is admitted, so an active-but-throttled
    /// client is not evicted. With admission disabled this returns `true`
    /// without taking the lock or touching any state.
    ///
    /// The key must already be well-formed: extracting it from the request
    /// is the caller's job, and a request whose client cannot be identified
    /// is a server error before the registry is ever consulted.
    pub fn admit(&self, client_key: &str) -> bool {
        if !self.config.enabled {
            return true;
        }

        let now = Instant::now();
        let capacity = f64::from(self.config.burst_size);
        let mut clients = self.clients.lock().expect("client registry mutex poisoned");

        let bucket = clients
            .entry(client_key.to_string())
            .or_insert_with(|| ClientBucket::new(capacity, now));
        bucket.touch(now);
        bucket.try_acquire(capacity, self.config.requests_per_second, now)
    }

    /// Remove every client idle longer than the threshold (three sweep
    /// intervals). Returns the number of evicted clients. This is the only
    /// bound on registry memory; without it the map grows with every
    /// distinct client ever seen.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let idle_threshold = self.config.idle_threshold();
        let mut clients = self.clients.lock().expect("client registry mutex poisoned");

        let before = clients.len();
        clients.retain(|_, bucket| bucket.idle_for(now) <= idle_threshold);
        before - clients.len()
    }

    /// Number of client buckets currently held.
    pub fn client_count(&self) -> usize {
        self.clients
            .lock()
            .expect("client registry mutex poisoned")
            .len()
    }

    /// Spawn the background eviction task, sweeping at the configured
    /// interval for the life of the process (or until the handle stops it).
    pub fn spawn_sweeper(self: Arc<Self>) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let registry = self;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(registry.config.sweep_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = registry.sweep();
                        if evicted > 0 {
                            tracing::debug!(evicted, remaining = registry.client_count(), "evicted idle clients");
                            metrics::record_sweep_evictions(evicted);
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::debug!("admission sweeper stopping");
                        break;
                    }
                }
            }
        });

        SweeperHandle { shutdown_tx, task }
    }
}

/// Handle to the background sweeper task. Dropping the handle also stops
/// the sweeper, so the consuming service holds it for the process lifetime.
pub struct SweeperHandle {
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper to stop and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.task.await;
    }
}
