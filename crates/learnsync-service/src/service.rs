// crates/learnsync-service/src/service.rs
//
// Ingestion and learning-path orchestration over a store, an analyzer and an
// optional transcript source.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use learnsync_analysis::{PathComposer, ResourceAnalyzer};
use learnsync_core::{
    LearnSyncError, Level, ResourceRecord, ResourceStore, SectionSummary, TranscriptSource,
};

use crate::providers::{extract_youtube_id, is_youtube_url, thumbnail_url};

/// A resource submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddResourceRequest {
    pub url: String,
    pub section_name: String,
    /// Optional level label overriding the inferred one
    /// (English or Arabic, case-insensitive).
    #[serde(default)]
    pub level: Option<String>,
}

pub struct LearningService {
    store: Arc<dyn ResourceStore>,
    analyzer: ResourceAnalyzer,
    composer: PathComposer,
    transcripts: Option<Arc<dyn TranscriptSource>>,
}

impl LearningService {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        analyzer: ResourceAnalyzer,
        composer: PathComposer,
        transcripts: Option<Arc<dyn TranscriptSource>>,
    ) -> Self {
        Self {
            store,
            analyzer,
            composer,
            transcripts,
        }
    }

    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    pub fn analyzer(&self) -> &ResourceAnalyzer {
        &self.analyzer
    }

    /// Ingest a resource: resolve its section, gather text, analyze, persist.
    ///
    /// Transcript failures degrade to empty text. Embedding failures abort
    /// the ingestion before anything about the resource is stored.
    pub async fn add_resource(
        &self,
        request: AddResourceRequest,
    ) -> Result<ResourceRecord, LearnSyncError> {
        let url = request.url.trim();
        let section_name = request.section_name.trim();
        if url.is_empty() {
            return Err(LearnSyncError::InvalidInput("url must not be empty".to_string()));
        }
        if section_name.is_empty() {
            return Err(LearnSyncError::InvalidInput(
                "section name must not be empty".to_string(),
            ));
        }
        let level_override = match request.level.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => Some(label.parse::<Level>()?),
            _ => None,
        };

        let section = self.store.get_or_create_section(section_name).await?;

        let mut thumbnail = None;
        let mut transcript = String::new();
        if is_youtube_url(url) {
            transcript = self.fetch_transcript(url).await;
            thumbnail = extract_youtube_id(url).map(|id| thumbnail_url(&id));
        }
        // No metadata lookup: the URL doubles as the title, the transcript as
        // the description.
        let title = url.to_string();
        let description = transcript.clone();

        let mut analysis = self
            .analyzer
            .analyze(&title, &description, &transcript, &section.name)
            .await?;
        if let Some(level) = level_override {
            analysis = analysis.with_level(level);
        }

        let record = ResourceRecord {
            section_id: section.id,
            url: url.to_string(),
            title,
            description,
            thumbnail,
            analysis,
            created_at: Utc::now(),
        };
        self.store.save_resource(&record).await?;

        tracing::info!(
            "Added resource {} to section '{}' (similarity {:.3}, level {}, suitable {})",
            record.id(),
            section.name,
            record.analysis.similarity(),
            record.analysis.level(),
            record.analysis.suitable()
        );

        Ok(record)
    }

    async fn fetch_transcript(&self, url: &str) -> String {
        let Some(source) = &self.transcripts else {
            return String::new();
        };
        match source.fetch_text(url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Transcript unavailable for {}: {}", url, e);
                String::new()
            }
        }
    }

    pub async fn get_resource(&self, id: &Uuid) -> Result<ResourceRecord, LearnSyncError> {
        self.store
            .get_resource(id)
            .await?
            .ok_or_else(|| LearnSyncError::NotFound(format!("resource {}", id)))
    }

    /// The section's resources ordered as a learning path.
    pub async fn section_path(&self, name: &str) -> Result<Vec<ResourceRecord>, LearnSyncError> {
        let section = self
            .store
            .find_section(name.trim())
            .await?
            .ok_or_else(|| LearnSyncError::NotFound(format!("section '{}'", name)))?;

        let records = self.store.list_resources(&section.id).await?;
        let threshold = self.analyzer.threshold();
        for record in &records {
            if !record.analysis.suitability_holds(threshold) {
                tracing::warn!(
                    "Resource {} suitable flag disagrees with similarity {:.3} at threshold {}",
                    record.id(),
                    record.analysis.similarity(),
                    threshold
                );
            }
        }

        Ok(self.composer.compose(records))
    }

    pub async fn list_sections(&self) -> Result<Vec<SectionSummary>, LearnSyncError> {
        self.store.list_sections().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use learnsync_analysis::AnalysisConfig;
    use learnsync_core::{EmbeddingProvider, Fingerprint, HashEmbeddingProvider};
    use learnsync_store::InMemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedTranscript(&'static str);

    #[async_trait]
    impl TranscriptSource for FixedTranscript {
        async fn fetch_text(&self, _url: &str) -> Result<String, LearnSyncError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingTranscript;

    #[async_trait]
    impl TranscriptSource for FailingTranscript {
        async fn fetch_text(&self, url: &str) -> Result<String, LearnSyncError> {
            Err(LearnSyncError::TranscriptUnavailable(url.to_string()))
        }
    }

    struct DownProvider(AtomicUsize);

    #[async_trait]
    impl EmbeddingProvider for DownProvider {
        async fn embed(&self, _text: &str, _model: &str) -> Result<Fingerprint, LearnSyncError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(LearnSyncError::EmbeddingProvider("unreachable".to_string()))
        }
    }

    fn service_with(
        provider: Arc<dyn EmbeddingProvider>,
        transcripts: Option<Arc<dyn TranscriptSource>>,
    ) -> (LearningService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let analyzer = ResourceAnalyzer::new(provider, "hash", &AnalysisConfig::default());
        let service = LearningService::new(
            store.clone(),
            analyzer,
            PathComposer::default(),
            transcripts,
        );
        (service, store)
    }

    fn request(url: &str, section: &str, level: Option<&str>) -> AddResourceRequest {
        AddResourceRequest {
            url: url.to_string(),
            section_name: section.to_string(),
            level: level.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn youtube_resource_uses_transcript_and_thumbnail() {
        let (service, _) = service_with(
            Arc::new(HashEmbeddingProvider::default()),
            Some(Arc::new(FixedTranscript("an intro to ownership"))),
        );
        let record = service
            .add_resource(request("https://youtu.be/abc123", "Rust Basics", None))
            .await
            .unwrap();

        assert_eq!(record.title, "https://youtu.be/abc123");
        assert_eq!(record.description, "an intro to ownership");
        assert_eq!(
            record.thumbnail.as_deref(),
            Some("https://img.youtube.com/vi/abc123/hqdefault.jpg")
        );
        // "intro" matches the beginner rule.
        assert_eq!(record.analysis.level(), Level::Beginner);

        let stored = service.get_resource(&record.id()).await.unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn transcript_failure_degrades_to_empty_text() {
        let (service, _) = service_with(
            Arc::new(HashEmbeddingProvider::default()),
            Some(Arc::new(FailingTranscript)),
        );
        let record = service
            .add_resource(request(
                "https://www.youtube.com/watch?v=xyz",
                "Networking",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.analysis.level(), Level::Intermediate);
    }

    #[tokio::test]
    async fn plain_url_has_no_thumbnail_or_transcript() {
        let (service, _) = service_with(
            Arc::new(HashEmbeddingProvider::default()),
            Some(Arc::new(FixedTranscript("should not be used"))),
        );
        let record = service
            .add_resource(request("https://example.com/rust", "Rust", None))
            .await
            .unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.thumbnail, None);
    }

    #[tokio::test]
    async fn level_label_overrides_inference() {
        let (service, _) = service_with(Arc::new(HashEmbeddingProvider::default()), None);
        let record = service
            .add_resource(request("https://example.com/intro", "Rust", Some("متقدم")))
            .await
            .unwrap();
        assert_eq!(record.analysis.level(), Level::Advanced);

        let blank = service
            .add_resource(request("https://example.com/intro", "Rust", Some("  ")))
            .await
            .unwrap();
        assert_eq!(blank.analysis.level(), Level::Beginner);
    }

    #[tokio::test]
    async fn bad_input_is_rejected_before_side_effects() {
        let (service, store) = service_with(Arc::new(HashEmbeddingProvider::default()), None);

        let err = service
            .add_resource(request("", "Rust", None))
            .await
            .unwrap_err();
        assert!(matches!(err, LearnSyncError::InvalidInput(_)));

        let err = service
            .add_resource(request("https://example.com", " ", None))
            .await
            .unwrap_err();
        assert!(matches!(err, LearnSyncError::InvalidInput(_)));

        let err = service
            .add_resource(request("https://example.com", "Rust", Some("expert")))
            .await
            .unwrap_err();
        assert!(matches!(err, LearnSyncError::InvalidInput(_)));

        assert!(store.list_sections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn embedding_failure_persists_no_resource() {
        let provider = Arc::new(DownProvider(AtomicUsize::new(0)));
        let (service, store) = service_with(provider.clone(), None);

        let err = service
            .add_resource(request("https://example.com/a", "Rust", None))
            .await
            .unwrap_err();
        assert!(matches!(err, LearnSyncError::EmbeddingProvider(_)));

        let sections = store.list_sections().await.unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].resource_count, 0);
    }

    #[tokio::test]
    async fn section_path_covers_every_resource_once() {
        let (service, _) = service_with(Arc::new(HashEmbeddingProvider::default()), None);
        let mut ids = Vec::new();
        for i in 0..7 {
            let record = service
                .add_resource(request(&format!("https://example.com/r{}", i), "Rust", None))
                .await
                .unwrap();
            ids.push(record.id());
        }
        service
            .add_resource(request("https://example.com/other", "Go", None))
            .await
            .unwrap();

        let path = service.section_path("Rust").await.unwrap();
        let mut got: Vec<Uuid> = path.iter().map(|r| r.id()).collect();
        got.sort();
        ids.sort();
        assert_eq!(got, ids);

        let again: Vec<Uuid> = service
            .section_path("Rust")
            .await
            .unwrap()
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(again, path.iter().map(|r| r.id()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn unknown_section_is_not_found() {
        let (service, _) = service_with(Arc::new(HashEmbeddingProvider::default()), None);
        let err = service.section_path("Nope").await.unwrap_err();
        assert!(matches!(err, LearnSyncError::NotFound(_)));

        let err = service.get_resource(&Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, LearnSyncError::NotFound(_)));
    }

    #[tokio::test]
    async fn sections_are_reused_by_name() {
        let (service, _) = service_with(Arc::new(HashEmbeddingProvider::default()), None);
        let a = service
            .add_resource(request("https://example.com/a", "Rust", None))
            .await
            .unwrap();
        let b = service
            .add_resource(request("https://example.com/b", "Rust", None))
            .await
            .unwrap();
        assert_eq!(a.section_id, b.section_id);

        let sections = service.list_sections().await.unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].resource_count, 2);
    }
}
