// crates/learnsync-rpc/src/handlers/section.rs
//
// Section handlers: GetPath, ListSections.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use learnsync_service::LearningService;

use super::resource::ResourceView;

// ---------------------------------------------------------------------------
// GetPath
// ---------------------------------------------------------------------------

/// Request for a section's learning path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPathRequest {
    pub section_name: String,
}

/// Resources in learning order, first to last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPathResponse {
    pub section_name: String,
    pub resources: Vec<ResourceView>,
}

pub async fn handle_get_path(
    service: &LearningService,
    request: GetPathRequest,
) -> Result<GetPathResponse, String> {
    let records = service
        .section_path(&request.section_name)
        .await
        .map_err(|e| e.to_string())?;

    Ok(GetPathResponse {
        section_name: request.section_name,
        resources: records.iter().map(ResourceView::from).collect(),
    })
}

// ---------------------------------------------------------------------------
// ListSections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSectionsRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    pub id: Uuid,
    pub name: String,
    pub resource_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSectionsResponse {
    pub sections: Vec<SectionEntry>,
}

pub async fn handle_list_sections(
    service: &LearningService,
    _request: ListSectionsRequest,
) -> Result<ListSectionsResponse, String> {
    let summaries = service.list_sections().await.map_err(|e| e.to_string())?;
    Ok(ListSectionsResponse {
        sections: summaries
            .into_iter()
            .map(|s| SectionEntry {
                id: s.section.id,
                name: s.section.name,
                resource_count: s.resource_count,
            })
            .collect(),
    })
}
