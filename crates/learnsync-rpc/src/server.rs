// crates/learnsync-rpc/src/server.rs
//
// RPC server: a single tonic unary service carrying JSON-encoded
// `JsonRpcRequest`/`JsonRpcResponse` envelopes, so no proto codegen is needed
// while tonic still provides transport and interceptors.

use std::sync::Arc;
use std::time::Instant;

use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use tonic::transport::Server;
use tonic::Status;

use learnsync_service::LearningService;

use crate::handlers;
use crate::middleware;

/// Largest request body the server will buffer.
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

/// Configuration for the RPC server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50061,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-RPC Envelope
// ---------------------------------------------------------------------------

/// Request envelope: a method name and its JSON params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The RPC method to invoke (e.g., "resource/add", "section/path").
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response envelope. Exactly one of `result`/`error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub success: bool,
    pub result: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl JsonRpcResponse {
    fn ok(value: serde_json::Value) -> Self {
        Self {
            success: true,
            result: Some(value),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message),
        }
    }
}

// ---------------------------------------------------------------------------
// LearnSyncRpcServer
// ---------------------------------------------------------------------------

/// The daemon's RPC server over a shared `LearningService`.
#[derive(Clone)]
pub struct LearnSyncRpcServer {
    config: RpcConfig,
    service: Arc<LearningService>,
    start_time: Option<Instant>,
}

impl std::fmt::Debug for LearnSyncRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearnSyncRpcServer")
            .field("config", &self.config)
            .finish()
    }
}

impl LearnSyncRpcServer {
    pub fn new(config: RpcConfig, service: Arc<LearningService>) -> Self {
        Self {
            config,
            service,
            start_time: None,
        }
    }

    /// Set the daemon start time for uptime reporting.
    pub fn with_start_time(mut self, st: Instant) -> Self {
        self.start_time = Some(st);
        self
    }

    /// Bind to the configured address and serve until the process exits.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = format!("{}:{}", self.config.host, self.config.port).parse()?;

        tracing::info!("LearnSync RPC server starting on {}", addr);

        let service = LearnSyncServiceImpl {
            service: self.service.clone(),
            start_time: self.start_time,
        };

        Server::builder()
            .accept_http1(true)
            .add_service(tonic::service::interceptor::InterceptedService::new(
                LearnSyncJsonRpcServer::new(service),
                middleware::logging_interceptor,
            ))
            .serve(addr)
            .await?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct LearnSyncServiceImpl {
    service: Arc<LearningService>,
    start_time: Option<Instant>,
}

impl LearnSyncServiceImpl {
    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let service = self.service.as_ref();
        let result = match request.method.as_str() {
            "resource/add" => {
                dispatch_handler(request.params, |r| {
                    handlers::resource::handle_add_resource(service, r)
                })
                .await
            }
            "resource/get" => {
                dispatch_handler(request.params, |r| {
                    handlers::resource::handle_get_resource(service, r)
                })
                .await
            }
            "section/path" => {
                dispatch_handler(request.params, |r| {
                    handlers::section::handle_get_path(service, r)
                })
                .await
            }
            "section/list" => {
                dispatch_handler(request.params, |r| {
                    handlers::section::handle_list_sections(service, r)
                })
                .await
            }
            "node/health" => {
                let start_time = self.start_time;
                dispatch_handler(request.params, |r| {
                    handlers::node::handle_get_health(service, r, start_time)
                })
                .await
            }
            _ => Err(format!("Unknown method: {}", request.method)),
        };

        match result {
            Ok(value) => JsonRpcResponse::ok(value),
            Err(err) => {
                tracing::debug!("RPC {} failed: {}", request.method, err);
                JsonRpcResponse::err(err)
            }
        }
    }
}

/// Deserialize params into the handler's request type, run it, and
/// serialize the result. A null params value is treated as `{}`.
async fn dispatch_handler<Req, Resp, F, Fut>(
    params: serde_json::Value,
    handler: F,
) -> Result<serde_json::Value, String>
where
    Req: serde::de::DeserializeOwned,
    Resp: serde::Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: std::future::Future<Output = Result<Resp, String>>,
{
    let params = if params.is_null() {
        serde_json::json!({})
    } else {
        params
    };
    let request: Req = serde_json::from_value(params)
        .map_err(|e| format!("Failed to deserialize request: {}", e))?;
    let response = handler(request).await?;
    serde_json::to_value(response).map_err(|e| format!("Failed to serialize response: {}", e))
}

// ---------------------------------------------------------------------------
// Tonic Service Wiring
// ---------------------------------------------------------------------------

/// Low-level tonic service: reads the body, decodes the envelope, dispatches.
#[derive(Clone)]
pub struct LearnSyncJsonRpcServer {
    inner: LearnSyncServiceImpl,
}

impl std::fmt::Debug for LearnSyncJsonRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearnSyncJsonRpcServer").finish()
    }
}

impl LearnSyncJsonRpcServer {
    fn new(inner: LearnSyncServiceImpl) -> Self {
        Self { inner }
    }
}

/// Route prefix of the JSON-RPC service. Clients POST to `/{SERVICE_NAME}/Call`.
pub const SERVICE_NAME: &str = "learnsync.rpc.LearnSyncService";

impl tonic::server::NamedService for LearnSyncJsonRpcServer {
    const NAME: &'static str = SERVICE_NAME;
}

impl<B> tower_service::Service<http::Request<B>> for LearnSyncJsonRpcServer
where
    B: HttpBody + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
    B::Data: Send,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();

        Box::pin(async move {
            let body_bytes = match collect_body(req.into_body(), MAX_REQUEST_BODY_BYTES).await {
                Ok(b) => b,
                Err(e) => {
                    tracing::error!("Failed to read request body: {}", e);
                    let resp =
                        JsonRpcResponse::err(format!("Failed to read request body: {}", e));
                    return Ok(build_response(serde_json::to_vec(&resp).unwrap_or_default()));
                }
            };

            let rpc_request: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
                Ok(r) => r,
                Err(e) => {
                    let resp = JsonRpcResponse::err(format!("Invalid JSON-RPC request: {}", e));
                    return Ok(build_response(serde_json::to_vec(&resp).unwrap_or_default()));
                }
            };

            let rpc_response = inner.dispatch(rpc_request).await;
            Ok(build_response(
                serde_json::to_vec(&rpc_response).unwrap_or_default(),
            ))
        })
    }
}

/// Buffer a request body, giving up once it exceeds `limit` bytes.
async fn collect_body<B>(body: B, limit: usize) -> Result<Vec<u8>, String>
where
    B: HttpBody + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    B::Data: Send,
{
    let mut collected = Vec::new();
    let mut body = std::pin::pin!(body);

    loop {
        match std::future::poll_fn(|cx| HttpBody::poll_frame(body.as_mut(), cx)).await {
            Some(Ok(frame)) => {
                if let Ok(mut data) = frame.into_data() {
                    use bytes::Buf;
                    if collected.len() + data.remaining() > limit {
                        return Err(format!("request body exceeds {} bytes", limit));
                    }
                    while data.has_remaining() {
                        let chunk = data.chunk();
                        collected.extend_from_slice(chunk);
                        let read = chunk.len();
                        data.advance(read);
                    }
                }
            }
            Some(Err(e)) => return Err(e.into().to_string()),
            None => break,
        }
    }

    Ok(collected)
}

fn build_response(json: Vec<u8>) -> http::Response<tonic::body::BoxBody> {
    let body = tonic::body::BoxBody::new(
        http_body_util::Full::new(bytes::Bytes::from(json))
            .map_err(|e| Status::internal(format!("body error: {}", e))),
    );

    let mut response = http::Response::new(body);
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}
