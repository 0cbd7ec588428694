//! JSON-RPC message routing
//!
//! Classifies incoming messages (request, notification, stray response), routes
//! methods to the todo handlers and audits every dispatched call.

use rust_mcp_sdk::schema::JsonrpcMessage;
use serde_json::{json, Value};
use tracing::info;

use crate::domain::todos::{build_method_list, handle_todo_method, is_todo_method};
use crate::rpc::envelope::{
    app_error_to_json_rpc, is_json_rpc_error, json_rpc_error, json_rpc_result,
    request_id_to_value, value_to_request_id, INVALID_REQUEST, METHOD_NOT_FOUND,
};
use crate::AppState;

pub const DISCOVER_METHOD: &str = "rpc/discover";

/// Handles one decoded message. Returns `None` when no reply is owed.
pub async fn handle_json_rpc_value(state: &AppState, payload: Value) -> Option<Value> {
    if !payload.is_object() {
        return Some(json_rpc_error(None, INVALID_REQUEST, "Invalid Request"));
    }

    let request_id = payload.get("id").cloned();
    // Only an absent id makes a notification; an id that is present but not a
    // string or integer is answered, never executed.
    if request_id
        .as_ref()
        .is_some_and(|id| value_to_request_id(id).is_none())
    {
        return Some(json_rpc_error(None, INVALID_REQUEST, "Invalid Request"));
    }

    let parsed: JsonrpcMessage = match serde_json::from_value(payload) {
        Ok(message) => message,
        Err(_) => return Some(json_rpc_error(request_id, INVALID_REQUEST, "Invalid Request")),
    };

    match parsed {
        JsonrpcMessage::Request(request) => {
            let request_id = request_id_to_value(request.id);
            if request.method.trim().is_empty() {
                return Some(json_rpc_error(
                    Some(request_id),
                    INVALID_REQUEST,
                    "Invalid Request",
                ));
            }

            Some(
                handle_json_rpc_request(
                    state,
                    Some(request_id),
                    request.method,
                    request.params.map(Value::Object),
                )
                .await,
            )
        }
        JsonrpcMessage::Notification(notification) => {
            if notification.method.trim().is_empty() {
                return None;
            }

            let _ = handle_json_rpc_request(
                state,
                None,
                notification.method,
                notification.params.map(Value::Object),
            )
            .await;
            None
        }
        JsonrpcMessage::ResultResponse(_) | JsonrpcMessage::ErrorResponse(_) => {
            Some(json_rpc_error(request_id, INVALID_REQUEST, "Invalid Request"))
        }
    }
}

pub async fn handle_json_rpc_request(
    state: &AppState,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
) -> Value {
    let audit_params = params.clone().unwrap_or(Value::Null);

    let response = match method.as_str() {
        "ping" => json_rpc_result(id, json!({})),
        DISCOVER_METHOD => json_rpc_result(
            id,
            json!({
                "service": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "methods": build_method_list(),
            }),
        ),
        name if is_todo_method(name) => match handle_todo_method(state, name, params).await {
            Ok(result) => json_rpc_result(id, result),
            Err(err) => app_error_to_json_rpc(id, err),
        },
        _ => json_rpc_error(id, METHOD_NOT_FOUND, "Method not found"),
    };

    info!(
        method = %method,
        params = %audit_params,
        outcome = if is_json_rpc_error(&response) { "failure" } else { "success" },
        "rpc call audited"
    );

    response
}
