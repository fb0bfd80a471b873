// crates/learnsync-rpc/src/middleware.rs
//
// Request interceptors for the RPC server.

use tonic::{Request, Status};

/// Log each incoming request's metadata.
pub fn logging_interceptor(req: Request<()>) -> Result<Request<()>, Status> {
    tracing::debug!("Incoming RPC request: {:?}", req.metadata());
    Ok(req)
}
