// crates/learnsync-rpc/src/handlers/node.rs
//
// Node health handler.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use learnsync_service::LearningService;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHealthRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHealthResponse {
    /// "healthy" or "degraded".
    pub status: String,
    pub version: String,
    pub storage_ok: bool,
    pub section_count: usize,
    /// Embedding model in use.
    pub embedding_model: String,
    pub uptime_seconds: u64,
    pub details: Option<String>,
}

/// Report node health. Storage is probed by listing sections.
pub async fn handle_get_health(
    service: &LearningService,
    _request: GetHealthRequest,
    start_time: Option<Instant>,
) -> Result<GetHealthResponse, String> {
    let (storage_ok, section_count, details) = match service.list_sections().await {
        Ok(sections) => (true, sections.len(), None),
        Err(e) => (false, 0, Some(format!("storage error: {}", e))),
    };

    Ok(GetHealthResponse {
        status: if storage_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage_ok,
        section_count,
        embedding_model: service.analyzer().model().to_string(),
        uptime_seconds: start_time.map(|t| t.elapsed().as_secs()).unwrap_or(0),
        details,
    })
}
