//! HTTP surfacing of governance outcomes.
//!
//! This crate does not own a server; the consuming service wires its own
//! router. What lives here is the boundary contract: every
//! [`GovernanceError`](crate::error::GovernanceError) renders as a JSON
//! `{"error": ...}` envelope with a status the client can act on —
//! validation as 422, missing records as 404, edit conflicts as 409,
//! admission denials as 429 (backoff-able, distinct from the others), and
//! store faults as an opaque 500.

pub mod response;
