//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees syntactically.
//! Returns all violations, not just the first, so a bad config can be fixed
//! in one pass.

use std::net::SocketAddr;

use crate::config::schema::GovernanceConfig;
use crate::validation::{permitted_value, ValidationErrors, Validator};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a loaded configuration.
pub fn validate_config(config: &GovernanceConfig) -> Result<(), ValidationErrors> {
    let mut v = Validator::new();

    v.check(
        config.admission.requests_per_second > 0.0 && config.admission.requests_per_second.is_finite(),
        "admission.requests_per_second",
        "must be a positive finite number",
    );
    v.check(
        config.admission.burst_size >= 1,
        "admission.burst_size",
        "must be at least one",
    );
    v.check(
        config.admission.sweep_interval_secs >= 1,
        "admission.sweep_interval_secs",
        "must be at least one second",
    );

    v.check(
        config.store.operation_timeout_secs >= 1,
        "store.operation_timeout_secs",
        "must be at least one second",
    );

    v.check(
        permitted_value(&config.observability.log_level.as_str(), &LOG_LEVELS),
        "observability.log_level",
        "must be one of trace, debug, info, warn, error",
    );
    if config.observability.metrics_enabled {
        v.check(
            config.observability.metrics_address.parse::<SocketAddr>().is_ok(),
            "observability.metrics_address",
            "must be a valid socket address",
        );
    }

    if v.is_empty() {
        Ok(())
    } else {
        Err(v.into_errors())
    }
}
