//! Todo domain logic exposed over JSON-RPC

pub mod todos;
