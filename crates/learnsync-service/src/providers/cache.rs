// crates/learnsync-service/src/providers/cache.rs
//
// Fingerprint cache in front of another provider. Section names are embedded
// on every ingestion, so repeated texts are served from memory.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use learnsync_core::{EmbeddingProvider, Fingerprint, LearnSyncError};

/// LRU cache keyed by `(model, text)`. Errors are never cached.
pub struct CachedEmbeddingProvider {
    inner: Arc<dyn EmbeddingProvider>,
    cache: Mutex<LruCache<(String, String), Fingerprint>>,
}

impl CachedEmbeddingProvider {
    /// A zero capacity is bumped to one entry.
    pub fn new(inner: Arc<dyn EmbeddingProvider>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached fingerprints.
    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EmbeddingProvider for CachedEmbeddingProvider {
    async fn embed(&self, text: &str, model: &str) -> Result<Fingerprint, LearnSyncError> {
        let key = (model.to_string(), text.to_string());
        if let Some(hit) = {
            let mut guard = self.cache.lock().await;
            guard.get(&key).cloned()
        } {
            return Ok(hit);
        }

        let fingerprint = self.inner.embed(text, model).await?;
        self.cache.lock().await.put(key, fingerprint.clone());
        Ok(fingerprint)
    }
}
