//! Admission control: per-client rate limiting with bounded memory.
//!
//! A [`ClientRegistry`] holds one token bucket per client key and answers
//! admit/deny from every concurrent request handler; a background sweeper
//! evicts clients that have gone idle so the registry cannot grow without
//! bound. [`admission_middleware`] is the axum entry point.

mod bucket;
pub mod middleware;
pub mod registry;

pub use middleware::admission_middleware;
pub use registry::{ClientRegistry, SweeperHandle};
