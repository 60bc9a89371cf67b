//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or empty) config is usable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the governance layer.
///
/// Set once at process startup; the registry and guards take what they need
/// at construction time. There is no runtime reload.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Admission control (per-client rate limiting).
    pub admission: AdmissionConfig,

    /// External store call policy.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Admission control configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Enable admission control. When disabled, every request is admitted
    /// and no per-client state is kept.
    pub enabled: bool,

    /// Token refill rate per client, in tokens per second.
    pub requests_per_second: f64,

    /// Burst capacity: the maximum tokens a client bucket can hold.
    pub burst_size: u32,

    /// Interval between idle-client eviction sweeps, in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_second: 2.0,
            burst_size: 5,
            sweep_interval_secs: 60,
        }
    }
}

impl AdmissionConfig {
    /// Interval between eviction sweeps.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// How long a client may go unseen before the sweep removes it.
    /// Fixed at three sweep intervals.
    pub fn idle_threshold(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.saturating_mul(3))
    }
}

/// Policy for calls into the external store.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Deadline for a single store operation, in seconds. On expiry the
    /// operation is aborted and reported as a server fault.
    pub operation_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            operation_timeout_secs: 3,
        }
    }
}

impl StoreConfig {
    /// Deadline for a single store operation.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
