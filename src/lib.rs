use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod rpc;
pub mod seed;
pub mod store;

use store::TodoStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/todos", get(http::handlers::discovery))
        .route(http::handlers::RPC_ENDPOINT, post(http::handlers::rpc_endpoint))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
