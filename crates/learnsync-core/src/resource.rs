// crates/learnsync-core/src/resource.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::embedding::Fingerprint;
use crate::level::Level;

/// Similarity at or above which a resource counts as suitable for its section.
pub const DEFAULT_SUITABILITY_THRESHOLD: f64 = 0.45;

/// Result of analyzing one resource against one section.
///
/// Created once at ingestion and never mutated. `suitable` is derived from
/// `similarity` at construction; there is no way to set either afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedResource {
    id: Uuid,
    section_fingerprint: Fingerprint,
    resource_fingerprint: Fingerprint,
    similarity: f64,
    level: Level,
    suitable: bool,
}

impl AnalyzedResource {
    /// Assemble an analysis result, deriving `suitable = similarity >= threshold`.
    pub fn new(
        section_fingerprint: Fingerprint,
        resource_fingerprint: Fingerprint,
        similarity: f64,
        level: Level,
        threshold: f64,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            section_fingerprint,
            resource_fingerprint,
            similarity,
            level,
            suitable: similarity >= threshold,
        }
    }

    /// Replace the inferred level with a caller-supplied one (ingestion time only).
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn section_fingerprint(&self) -> &Fingerprint {
        &self.section_fingerprint
    }

    pub fn resource_fingerprint(&self) -> &Fingerprint {
        &self.resource_fingerprint
    }

    pub fn similarity(&self) -> f64 {
        self.similarity
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn suitable(&self) -> bool {
        self.suitable
    }

    /// Whether the stored `suitable` flag still agrees with `similarity`.
    ///
    /// Records read back from storage are not re-derived, so callers that
    /// load them can check the invariant here.
    pub fn suitability_holds(&self, threshold: f64) -> bool {
        self.suitable == (self.similarity >= threshold)
    }
}

/// Persisted form of an ingested resource: analysis plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Section this resource was analyzed against.
    pub section_id: Uuid,
    /// Source URL as submitted.
    pub url: String,
    pub title: String,
    /// Description shown to learners (the transcript for videos).
    #[serde(default)]
    pub description: String,
    /// Thumbnail URL, when one can be derived from the source.
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub analysis: AnalyzedResource,
    pub created_at: DateTime<Utc>,
}

impl ResourceRecord {
    pub fn id(&self) -> Uuid {
        self.analysis.id()
    }
}
