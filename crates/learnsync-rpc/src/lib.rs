// crates/learnsync-rpc/src/lib.rs
//
// learnsync-rpc: JSON-RPC over tonic. A single unary service accepts a
// `{method, params}` envelope and dispatches to the handlers.

pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{JsonRpcRequest, JsonRpcResponse, LearnSyncRpcServer, RpcConfig, SERVICE_NAME};
