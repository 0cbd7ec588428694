//! Log output for the todo service
//!
//! `RUST_LOG` filters events (default `info`). Each HTTP request produces exactly one
//! `request summary` event; failed RPC calls are additionally visible through the
//! `rpc call audited` event emitted by the dispatcher.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration_ms = started_at.elapsed().as_millis();

    // 5xx only comes from the framework itself; RPC failures are HTTP 200.
    if response.status().is_server_error() {
        warn!(method = %method, path = %path, status, duration_ms, "request summary");
    } else {
        info!(method = %method, path = %path, status, duration_ms, "request summary");
    }

    response
}
