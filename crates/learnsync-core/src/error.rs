use thiserror::Error;

/// Error types shared by every LearnSync crate.
#[derive(Debug, Error)]
pub enum LearnSyncError {
    /// The embedding provider failed or returned an unusable response.
    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    /// Transcript or body text could not be produced for a resource.
    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    /// Two fingerprints of different lengths were compared.
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Resource fingerprints could not be clustered.
    #[error("Clustering failure: {0}")]
    ClusteringFailure(String),

    /// A fingerprint with zero components was produced.
    #[error("Fingerprint must not be empty")]
    EmptyFingerprint,

    /// A fingerprint component was NaN or infinite.
    #[error("Fingerprint component {index} is not finite")]
    NonFiniteFingerprint { index: usize },

    /// Storage layer error (RocksDB, in-memory store).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource or section not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller supplied an invalid argument.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for LearnSyncError {
    fn from(e: serde_json::Error) -> Self {
        LearnSyncError::Serialization(e.to_string())
    }
}
