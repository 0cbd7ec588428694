//! HTTP surface of the todo service
//!
//! `POST /rpc` carries every store operation as JSON-RPC 2.0. A batch is an array of
//! messages whose members run one after another, so a `todos/createOne` followed by a
//! `todos/getOne` in the same batch sees the new record. Input that owes no reply
//! (notifications only) answers `204 No Content`.
//!
//! `GET /.well-known/todos` tells clients where that endpoint lives; `GET /health`
//! is a liveness check.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::rpc::envelope::{json_rpc_error, INVALID_REQUEST, PARSE_ERROR};
use crate::rpc::server::handle_json_rpc_value;
use crate::AppState;

pub const RPC_ENDPOINT: &str = "/rpc";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub rpc_endpoint: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery() -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        rpc_endpoint: RPC_ENDPOINT,
    })
}

pub async fn rpc_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::OK,
                Json(json_rpc_error(None, PARSE_ERROR, "Parse error")),
            )
                .into_response()
        }
    };

    let reply = match payload {
        Value::Array(batch) if batch.is_empty() => Some(Value::Array(vec![json_rpc_error(
            None,
            INVALID_REQUEST,
            "Invalid Request",
        )])),
        Value::Array(batch) => run_batch(&state, batch).await,
        message => handle_json_rpc_value(&state, message).await,
    };

    match reply {
        Some(reply) => (StatusCode::OK, Json(reply)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn run_batch(state: &AppState, batch: Vec<Value>) -> Option<Value> {
    let mut replies = Vec::with_capacity(batch.len());
    for message in batch {
        if let Some(reply) = handle_json_rpc_value(state, message).await {
            replies.push(reply);
        }
    }

    (!replies.is_empty()).then_some(Value::Array(replies))
}
