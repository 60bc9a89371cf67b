//! Safe dynamic list-query construction.
//!
//! Builds parameterized, sorted, paginated, full-text-filtered query plans
//! from untrusted query-string input. The sort clause is the one piece that
//! cannot be a bound parameter, so it is resolved against a closed,
//! developer-controlled safelist; everything else travels as a bind value.

pub mod filters;
pub mod metadata;
pub mod plan;

pub use filters::{Filters, SortDirection, SortSafelist};
pub use metadata::Metadata;
pub use plan::{plan, BindValue, QueryPlan, TextFilter};
