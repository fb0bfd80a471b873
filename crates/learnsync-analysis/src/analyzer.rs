// crates/learnsync-analysis/src/analyzer.rs
//
// Resource analysis: fingerprint a resource and its section, score their
// similarity, infer a level, and derive suitability.

use std::sync::Arc;

use learnsync_core::{cosine_similarity, AnalyzedResource, EmbeddingProvider, LearnSyncError};

use crate::config::AnalysisConfig;
use crate::level::LevelInferencer;

/// Build the single labeled representation that is fingerprinted and classified.
pub fn combined_text(title: &str, description: &str, body_text: &str) -> String {
    format!(
        "Title: {}\nDescription: {}\nContent: {}",
        title, description, body_text
    )
}

/// Orchestrates fingerprinting, similarity and level inference for one resource.
///
/// Holds no state beyond its configuration; every call issues exactly two
/// embedding requests and performs no persistence.
#[derive(Clone)]
pub struct ResourceAnalyzer {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    inferencer: LevelInferencer,
    threshold: f64,
}

impl std::fmt::Debug for ResourceAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceAnalyzer")
            .field("model", &self.model)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl ResourceAnalyzer {
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
        config: &AnalysisConfig,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            inferencer: LevelInferencer::new(config.levels.clone()),
            threshold: config.suitability_threshold,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Analyze a resource against a section.
    ///
    /// `body_text` may be empty (e.g., when no transcript was available); the
    /// analysis then runs on title and description alone. Embedding failures
    /// and dimension mismatches are returned to the caller.
    pub async fn analyze(
        &self,
        title: &str,
        description: &str,
        body_text: &str,
        section_name: &str,
    ) -> Result<AnalyzedResource, LearnSyncError> {
        let combined = combined_text(title, description, body_text);

        // Both fingerprints are independent; they join before scoring.
        let (resource_fp, section_fp) = tokio::try_join!(
            self.provider.embed(&combined, &self.model),
            self.provider.embed(section_name, &self.model),
        )?;

        let similarity = cosine_similarity(&resource_fp, &section_fp)?;
        let level = self.inferencer.infer(&combined);

        let analyzed =
            AnalyzedResource::new(section_fp, resource_fp, similarity, level, self.threshold);

        tracing::debug!(
            "Analyzed resource {} against section '{}': similarity={:.4} level={} suitable={}",
            analyzed.id(),
            section_name,
            similarity,
            level,
            analyzed.suitable()
        );

        Ok(analyzed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use learnsync_core::{Fingerprint, Level};

    /// Returns fixed vectors: the section name maps to a known vector, every
    /// other text to the resource vector. Records the texts it was asked for.
    struct StubProvider {
        section: Vec<f32>,
        resource: Vec<f32>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EmbeddingProvider for StubProvider {
        async fn embed(&self, text: &str, _model: &str) -> Result<Fingerprint, LearnSyncError> {
            self.seen.lock().unwrap().push(text.to_string());
            if text.starts_with("Title: ") {
                Fingerprint::new(self.resource.clone())
            } else {
                Fingerprint::new(self.section.clone())
            }
        }
    }

    struct FailingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for FailingProvider {
        async fn embed(&self, _text: &str, _model: &str) -> Result<Fingerprint, LearnSyncError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LearnSyncError::EmbeddingProvider("quota exceeded".to_string()))
        }
    }

    struct TableProvider(HashMap<String, Vec<f32>>);

    #[async_trait]
    impl EmbeddingProvider for TableProvider {
        async fn embed(&self, text: &str, _model: &str) -> Result<Fingerprint, LearnSyncError> {
            let values = self
                .0
                .get(text)
                .cloned()
                .unwrap_or_else(|| vec![1.0, 0.0, 0.0]);
            Fingerprint::new(values)
        }
    }

    fn analyzer(provider: Arc<dyn EmbeddingProvider>) -> ResourceAnalyzer {
        ResourceAnalyzer::new(provider, "test-model", &AnalysisConfig::default())
    }

    #[test]
    fn combined_text_labels_fields() {
        assert_eq!(
            combined_text("Ownership", "", "borrowing"),
            "Title: Ownership\nDescription: \nContent: borrowing"
        );
    }

    #[tokio::test]
    async fn analyze_scores_and_classifies() {
        let provider = Arc::new(StubProvider {
            section: vec![1.0, 0.0],
            resource: vec![1.0, 1.0],
            seen: Mutex::new(Vec::new()),
        });
        let a = analyzer(provider.clone());
        let r = a
            .analyze("Rust for Beginners", "intro video", "", "Rust Basics")
            .await
            .unwrap();

        // cos(45deg) ~= 0.7071
        assert!((r.similarity() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert!(r.suitable());
        assert_eq!(r.level(), Level::Beginner);
        assert_eq!(r.section_fingerprint().as_slice(), &[1.0, 0.0]);
        assert_eq!(r.resource_fingerprint().as_slice(), &[1.0, 1.0]);

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&"Rust Basics".to_string()));
        assert!(seen.contains(&combined_text("Rust for Beginners", "intro video", "")));
    }

    #[tokio::test]
    async fn low_similarity_is_not_suitable() {
        let provider = Arc::new(StubProvider {
            section: vec![1.0, 0.0],
            resource: vec![0.2, 1.0],
            seen: Mutex::new(Vec::new()),
        });
        let r = analyzer(provider)
            .analyze("Cooking pasta", "", "", "Linear Algebra")
            .await
            .unwrap();
        assert!(r.similarity() < 0.45);
        assert!(!r.suitable());
        assert_eq!(r.level(), Level::Intermediate);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = Arc::new(FailingProvider {
            calls: AtomicUsize::new(0),
        });
        let err = analyzer(provider.clone())
            .analyze("t", "d", "b", "s")
            .await
            .unwrap_err();
        assert!(matches!(err, LearnSyncError::EmbeddingProvider(_)));
        assert!(provider.calls.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn dimension_mismatch_propagates() {
        let mut table = HashMap::new();
        table.insert("Section".to_string(), vec![1.0, 0.0]);
        let err = analyzer(Arc::new(TableProvider(table)))
            .analyze("t", "", "", "Section")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LearnSyncError::DimensionMismatch { left: 3, right: 2 }
        ));
    }

    #[tokio::test]
    async fn configured_threshold_is_applied() {
        let provider = Arc::new(StubProvider {
            section: vec![1.0, 0.0],
            resource: vec![1.0, 1.0],
            seen: Mutex::new(Vec::new()),
        });
        let config = AnalysisConfig {
            suitability_threshold: 0.9,
            ..AnalysisConfig::default()
        };
        let a = ResourceAnalyzer::new(provider, "m", &config);
        let r = a.analyze("t", "", "", "s").await.unwrap();
        assert!(!r.suitable());
        assert!(r.suitability_holds(0.9));
    }
}
