// crates/learnsync-rpc/src/handlers/resource.rs
//
// Resource handlers: AddResource, GetResource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use learnsync_core::{Level, ResourceRecord};
use learnsync_service::{AddResourceRequest, LearningService};

/// Client-facing view of a resource. Fingerprints stay server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceView {
    pub id: Uuid,
    pub section_id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub level: Level,
    pub similarity: f64,
    pub suitable: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&ResourceRecord> for ResourceView {
    fn from(record: &ResourceRecord) -> Self {
        Self {
            id: record.id(),
            section_id: record.section_id,
            url: record.url.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            thumbnail: record.thumbnail.clone(),
            level: record.analysis.level(),
            similarity: record.analysis.similarity(),
            suitable: record.analysis.suitable(),
            created_at: record.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// AddResource
// ---------------------------------------------------------------------------

/// Request to ingest a resource into a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddResourceRpcRequest {
    pub url: String,
    pub section_name: String,
    /// Optional level label overriding inference.
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddResourceResponse {
    pub resource: ResourceView,
}

pub async fn handle_add_resource(
    service: &LearningService,
    request: AddResourceRpcRequest,
) -> Result<AddResourceResponse, String> {
    let record = service
        .add_resource(AddResourceRequest {
            url: request.url,
            section_name: request.section_name,
            level: request.level,
        })
        .await
        .map_err(|e| e.to_string())?;

    Ok(AddResourceResponse {
        resource: ResourceView::from(&record),
    })
}

// ---------------------------------------------------------------------------
// GetResource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResourceRequest {
    pub resource_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResourceResponse {
    pub resource: ResourceView,
}

pub async fn handle_get_resource(
    service: &LearningService,
    request: GetResourceRequest,
) -> Result<GetResourceResponse, String> {
    let record = service
        .get_resource(&request.resource_id)
        .await
        .map_err(|e| e.to_string())?;
    Ok(GetResourceResponse {
        resource: ResourceView::from(&record),
    })
}
