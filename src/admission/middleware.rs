//! Admission middleware.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::admission::ClientRegistry;
use crate::error::GovernanceError;
use crate::observability::metrics;

/// Middleware that gates every request through the admission registry,
/// keyed by the peer IP. Denied requests terminate here with a 429 body
/// the client can back off on.
pub async fn admission_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(registry): State<Arc<ClientRegistry>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client_key = addr.ip().to_string();

    if registry.admit(&client_key) {
        next.run(request).await
    } else {
        tracing::warn!(client = %client_key, "rate limit exceeded");
        metrics::record_admission_denied();
        GovernanceError::RateLimited.into_response()
    }
}
