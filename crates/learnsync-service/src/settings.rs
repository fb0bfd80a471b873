// crates/learnsync-service/src/settings.rs
//
// Settings for the external collaborators, deserialized from the daemon's
// `[embedding]` and `[transcripts]` TOML tables.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use learnsync_core::{EmbeddingProvider, HashEmbeddingProvider, LearnSyncError};

use crate::providers::{CachedEmbeddingProvider, OpenAiEmbeddingProvider, YouTubeTranscriptClient};

/// Embedding provider selection and client tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// "openai" or "hash".
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Inline API key. Prefer `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries after the first request; 0 sends exactly one request.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// Requested output dimensions (OpenAI `dimensions` parameter).
    #[serde(default)]
    pub dimensions: Option<usize>,
    /// Cached fingerprints; 0 disables the cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_cache_capacity() -> usize {
    1024
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: default_base_url(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            dimensions: None,
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl EmbeddingSettings {
    /// Resolve the API key: inline value first, then the named environment variable.
    pub fn api_key(&self) -> Result<String, LearnSyncError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.to_string());
        }
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(LearnSyncError::Config(format!(
                "embedding API key missing: set [embedding].api_key or ${}",
                self.api_key_env
            ))),
        }
    }
}

/// Transcript client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Caption languages, tried in order.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_transcript_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_timedtext_url")]
    pub base_url: String,
}

fn default_enabled() -> bool {
    true
}

fn default_languages() -> Vec<String> {
    vec!["ar".to_string(), "en".to_string()]
}

fn default_transcript_timeout_secs() -> u64 {
    15
}

fn default_timedtext_url() -> String {
    "https://www.youtube.com/api/timedtext".to_string()
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            languages: default_languages(),
            timeout_secs: default_transcript_timeout_secs(),
            base_url: default_timedtext_url(),
        }
    }
}

impl TranscriptSettings {
    /// Build the transcript client, or `None` when transcripts are disabled.
    pub fn build_client(&self) -> Result<Option<YouTubeTranscriptClient>, LearnSyncError> {
        if !self.enabled {
            return Ok(None);
        }
        YouTubeTranscriptClient::new(
            &self.base_url,
            self.languages.clone(),
            Duration::from_secs(self.timeout_secs),
        )
        .map(Some)
    }
}

/// Construct the configured embedding provider, wrapped in the cache when
/// `cache_capacity > 0`.
pub fn build_embedding_provider(
    settings: &EmbeddingSettings,
) -> Result<Arc<dyn EmbeddingProvider>, LearnSyncError> {
    let base: Arc<dyn EmbeddingProvider> = match settings.provider.as_str() {
        "openai" => {
            let key = settings.api_key()?;
            Arc::new(OpenAiEmbeddingProvider::new(
                &key,
                &settings.base_url,
                Duration::from_secs(settings.timeout_secs),
                settings.max_retries,
                settings.dimensions,
            )?)
        }
        "hash" => Arc::new(HashEmbeddingProvider::new(settings.dimensions.unwrap_or(64))),
        other => {
            return Err(LearnSyncError::Config(format!(
                "unknown embedding provider: {}",
                other
            )))
        }
    };

    if settings.cache_capacity == 0 {
        return Ok(base);
    }
    Ok(Arc::new(CachedEmbeddingProvider::new(base, settings.cache_capacity)))
}
