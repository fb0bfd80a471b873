// crates/learnsync-rpc/src/handlers/mod.rs
//
// Handler modules, one per method group. Each defines its request/response
// types and maps service errors to strings for the response envelope.

pub mod node;
pub mod resource;
pub mod section;
