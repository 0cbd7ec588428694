//! HTTP transport for the todo service
//!
//! Routes the JSON-RPC listener at `/rpc` and the health and discovery endpoints.

pub mod handlers;
