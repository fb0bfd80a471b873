// crates/learnsync-core/src/embedding.rs

use std::ops::Deref;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LearnSyncError;
use crate::traits::EmbeddingProvider;

/// Semantic fingerprint of a text: a non-empty, fixed-length float vector.
///
/// Serialized as a plain numeric array so stored records can rebuild
/// path inputs without re-embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Fingerprint(Vec<f32>);

impl Fingerprint {
    /// Wrap raw provider output. Fails with `EmptyFingerprint` for an empty vector
    /// and `NonFiniteFingerprint` when any component is NaN or infinite.
    pub fn new(values: Vec<f32>) -> Result<Self, LearnSyncError> {
        if values.is_empty() {
            return Err(LearnSyncError::EmptyFingerprint);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(LearnSyncError::NonFiniteFingerprint { index });
        }
        Ok(Self(values))
    }

    /// Number of components.
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    /// L2 magnitude, accumulated in f64.
    pub fn magnitude(&self) -> f64 {
        self.0
            .iter()
            .map(|&v| (v as f64) * (v as f64))
            .sum::<f64>()
            .sqrt()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl Deref for Fingerprint {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.0
    }
}

impl TryFrom<Vec<f32>> for Fingerprint {
    type Error = LearnSyncError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Fingerprint::new(values)
    }
}

impl From<Fingerprint> for Vec<f32> {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

/// Offline fingerprint for a piece of text.
///
/// Each component is seeded from a SHA-256 digest of the text and the
/// component position, and the result is scaled to unit length. The same
/// text and dimension count give the same fingerprint on every run.
pub fn hash_embedding(text: &str, dimensions: usize) -> Vec<f32> {
    use sha2::{Digest, Sha256};

    let mut raw = Vec::with_capacity(dimensions);
    for i in 0..dimensions {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update(i.to_le_bytes());
        let hash = hasher.finalize();
        // component in [-1, 1] from the leading digest word
        let bits = u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]]);
        let val = (bits as f64 / u32::MAX as f64) * 2.0 - 1.0;
        raw.push(val as f32);
    }

    let norm: f32 = raw.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in raw.iter_mut() {
            *v /= norm;
        }
    }

    raw
}

/// Offline embedding provider backed by [`hash_embedding`].
///
/// The model name salts the hash, so two models never share a vector space.
/// Used for local development and as the deterministic stub in tests.
#[derive(Debug, Clone)]
pub struct HashEmbeddingProvider {
    dimensions: usize,
}

impl HashEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for HashEmbeddingProvider {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    async fn embed(&self, text: &str, model: &str) -> Result<Fingerprint, LearnSyncError> {
        let salted = format!("{}:{}", model, text);
        Fingerprint::new(hash_embedding(&salted, self.dimensions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fingerprint_rejected() {
        assert!(matches!(
            Fingerprint::new(Vec::new()),
            Err(LearnSyncError::EmptyFingerprint)
        ));
    }

    #[test]
    fn non_finite_components_rejected() {
        assert!(matches!(
            Fingerprint::new(vec![1.0, f32::INFINITY]),
            Err(LearnSyncError::NonFiniteFingerprint { index: 1 })
        ));
        assert!(matches!(
            Fingerprint::new(vec![f32::NAN, 0.5]),
            Err(LearnSyncError::NonFiniteFingerprint { index: 0 })
        ));
        assert!(matches!(
            Fingerprint::new(vec![0.5, 0.5, f32::NEG_INFINITY]),
            Err(LearnSyncError::NonFiniteFingerprint { index: 2 })
        ));
    }

    #[test]
    fn fingerprint_serializes_as_plain_array() {
        let fp = Fingerprint::new(vec![0.5, -0.25]).unwrap();
        assert_eq!(serde_json::to_string(&fp).unwrap(), "[0.5,-0.25]");
        let back: Fingerprint = serde_json::from_str("[0.5,-0.25]").unwrap();
        assert_eq!(back, fp);
    }

    #[test]
    fn empty_array_does_not_deserialize() {
        let parsed: Result<Fingerprint, _> = serde_json::from_str("[]");
        assert!(parsed.is_err());
    }

    #[test]
    fn hash_embedding_is_deterministic_and_normalized() {
        let a = hash_embedding("rust ownership", 32);
        let b = hash_embedding("rust ownership", 32);
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn hash_provider_salts_by_model() {
        let provider = HashEmbeddingProvider::new(16);
        let a = provider.embed("loops", "model-a").await.unwrap();
        let b = provider.embed("loops", "model-b").await.unwrap();
        let again = provider.embed("loops", "model-a").await.unwrap();
        assert_eq!(a.dimensions(), 16);
        assert_eq!(a, again);
        assert_ne!(a, b);
    }
}
