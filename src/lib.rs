//! Request governance for CRUD HTTP services.
//!
//! Three pieces sit between the router and the store, and they are the only
//! places where correctness depends on concurrent state, adversarial input,
//! or numeric edge cases:
//!
//! - [`admission`] — a per-client token-bucket registry shared across all
//!   concurrent requests, with idle eviction bounding its memory.
//! - [`query`] — parameterized, sorted, paginated, full-text-filtered list
//!   query plans built from untrusted query-string input; the sort clause
//!   is validated against a closed safelist because it cannot be a bound
//!   parameter.
//! - [`mutation`] — optimistic-concurrency update guarding: conditional
//!   writes matched on identity and expected version, with the zero-rows
//!   outcome split into not-found and edit-conflict.
//!
//! The consuming service owns the transport, the resource shapes, and the
//! connection pool; this crate owns the governance decisions.

pub mod admission;
pub mod config;
pub mod error;
pub mod http;
pub mod mutation;
pub mod observability;
pub mod query;
pub mod validation;

pub use admission::{admission_middleware, ClientRegistry};
pub use config::GovernanceConfig;
pub use error::{GovernanceError, GovernanceResult};
pub use mutation::UpdateGuard;
pub use query::{Filters, Metadata, QueryPlan, SortSafelist};
