// crates/learnsync-service/src/lib.rs
//
// learnsync-service: the request-facing side of LearnSync.
//
// `service` ingests resources (transcript fetch, analysis, persistence) and
// answers learning-path queries; `providers` holds the network collaborators
// (OpenAI embeddings, embedding cache, YouTube transcripts); `settings`
// describes how they are configured and builds them.

pub mod providers;
pub mod service;
pub mod settings;

pub use providers::{CachedEmbeddingProvider, OpenAiEmbeddingProvider, YouTubeTranscriptClient};
pub use service::{AddResourceRequest, LearningService};
pub use settings::{build_embedding_provider, EmbeddingSettings, TranscriptSettings};
