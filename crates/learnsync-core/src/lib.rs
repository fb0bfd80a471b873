// crates/learnsync-core/src/lib.rs
//
// learnsync-core: Core types, traits, and similarity primitives for LearnSync.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the canonical data structures (fingerprints, levels, analyzed
// resources, sections), the error type, cosine similarity, and the trait
// interfaces for the embedding provider, transcript source, and store.

pub mod embedding;
pub mod error;
pub mod level;
pub mod resource;
pub mod section;
pub mod similarity;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use learnsync_core::Fingerprint;`

// Embedding types
pub use embedding::{hash_embedding, Fingerprint, HashEmbeddingProvider};

// Level types
pub use level::Level;

// Resource types
pub use resource::{AnalyzedResource, ResourceRecord, DEFAULT_SUITABILITY_THRESHOLD};

// Section types
pub use section::{Section, SectionSummary};

// Similarity
pub use similarity::cosine_similarity;

// Error type
pub use error::LearnSyncError;

// Traits
pub use traits::{EmbeddingProvider, ResourceStore, TranscriptSource};
