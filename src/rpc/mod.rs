//! JSON-RPC 2.0 handling for the todo service
//!
//! Envelope formatting lives in `envelope`; message classification, method routing
//! and call auditing live in `server`.

pub mod envelope;
pub mod server;
