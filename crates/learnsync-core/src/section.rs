// crates/learnsync-core/src/section.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named curriculum section. Sections are the grouping boundary for paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique identifier (UUID v7 for time-ordering).
    pub id: Uuid,
    /// Section name as supplied by the caller; unique per store.
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// A section together with how many resources it holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSummary {
    pub section: Section,
    pub resource_count: usize,
}
