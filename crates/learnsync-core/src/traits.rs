// crates/learnsync-core/src/traits.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::embedding::Fingerprint;
use crate::error::LearnSyncError;
use crate::resource::ResourceRecord;
use crate::section::{Section, SectionSummary};

/// Maps text to a semantic fingerprint.
///
/// Implemented by the hash provider in this crate and the OpenAI client in
/// learnsync-service. Errors are fatal to the calling operation.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed `text` with the named model.
    async fn embed(&self, text: &str, model: &str) -> Result<Fingerprint, LearnSyncError>;
}

/// Produces plain body text for a resource URL (e.g., a video transcript).
///
/// Implemented by learnsync-service. Callers treat any error as empty text.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, LearnSyncError>;
}

/// Persistent storage for sections and analyzed resources.
///
/// Implemented by learnsync-store (RocksDB and in-memory backends).
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Look up a section by exact name.
    async fn find_section(&self, name: &str) -> Result<Option<Section>, LearnSyncError>;

    /// Return the named section, creating it if it does not exist yet.
    async fn get_or_create_section(&self, name: &str) -> Result<Section, LearnSyncError>;

    /// List every section with its resource count.
    async fn list_sections(&self) -> Result<Vec<SectionSummary>, LearnSyncError>;

    /// Save a resource record. Overwrites if the ID already exists.
    async fn save_resource(&self, record: &ResourceRecord) -> Result<(), LearnSyncError>;

    /// Retrieve a resource record by its UUID.
    async fn get_resource(&self, id: &Uuid) -> Result<Option<ResourceRecord>, LearnSyncError>;

    /// List the resources of a section in ingestion order.
    async fn list_resources(&self, section_id: &Uuid) -> Result<Vec<ResourceRecord>, LearnSyncError>;
}
