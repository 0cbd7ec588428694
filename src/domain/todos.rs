//! Todo methods exposed over JSON-RPC
//!
//! Each request type doubles as the method descriptor published by `rpc/discover`,
//! so the advertised params schema and the decoder cannot drift apart.

use rust_mcp_sdk::{macros, schema::Tool};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{errors::AppError, AppState};

pub const GET_MANY: &str = "todos/getMany";
pub const GET_ONE: &str = "todos/getOne";
pub const CREATE_ONE: &str = "todos/createOne";
pub const UPDATE_ONE: &str = "todos/updateOne";
pub const DELETE_ONE: &str = "todos/deleteOne";

#[macros::mcp_tool(
    name = "todos/getMany",
    description = "List every todo in insertion order"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GetManyRequest {}

#[macros::mcp_tool(name = "todos/getOne", description = "Fetch a single todo by id")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GetOneRequest {
    pub id: i32,
}

#[macros::mcp_tool(
    name = "todos/createOne",
    description = "Append a new, not yet completed todo"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct CreateOneRequest {
    pub title: String,
}

#[macros::mcp_tool(
    name = "todos/updateOne",
    description = "Replace the title and completion flag of a todo"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct UpdateOneRequest {
    pub id: i32,
    pub title: String,
    pub completed: bool,
}

#[macros::mcp_tool(name = "todos/deleteOne", description = "Remove a todo by id")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct DeleteOneRequest {
    pub id: i32,
}

pub fn build_method_list() -> Vec<Tool> {
    vec![
        GetManyRequest::tool(),
        GetOneRequest::tool(),
        CreateOneRequest::tool(),
        UpdateOneRequest::tool(),
        DeleteOneRequest::tool(),
    ]
}

pub fn is_todo_method(method: &str) -> bool {
    matches!(
        method,
        GET_MANY | GET_ONE | CREATE_ONE | UPDATE_ONE | DELETE_ONE
    )
}

/// Runs one todo method against the store and returns the JSON-RPC `result` object.
pub async fn handle_todo_method(
    state: &AppState,
    method: &str,
    params: Option<Value>,
) -> Result<Value, AppError> {
    match method {
        GET_MANY => {
            let _: GetManyRequest = decode_params(params)?;
            let todos = state.store.list_all().await;
            Ok(json!({ "todos": todos }))
        }
        GET_ONE => {
            let request: GetOneRequest = decode_params(params)?;
            let todo = state.store.get_by_id(request.id).await?;
            Ok(json!(todo))
        }
        CREATE_ONE => {
            let request: CreateOneRequest = decode_params(params)?;
            let todo = state.store.create(request.title).await?;
            Ok(json!(todo))
        }
        UPDATE_ONE => {
            let request: UpdateOneRequest = decode_params(params)?;
            let todo = state
                .store
                .update(request.id, request.title, request.completed)
                .await?;
            Ok(json!(todo))
        }
        DELETE_ONE => {
            let request: DeleteOneRequest = decode_params(params)?;
            let message = state.store.delete(request.id).await?;
            Ok(json!({ "message": message }))
        }
        other => Err(AppError::internal(format!(
            "{other} is not a todo method"
        ))),
    }
}

fn decode_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, AppError> {
    let params = params.unwrap_or_else(|| json!({}));
    serde_json::from_value(params)
        .map_err(|err| AppError::bad_request("invalid_params", err.to_string()))
}
