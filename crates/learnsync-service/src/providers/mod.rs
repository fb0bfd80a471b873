// crates/learnsync-service/src/providers/mod.rs
//
// Network collaborators behind the core provider traits.

pub mod cache;
pub mod openai;
pub mod youtube;

pub use cache::CachedEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;
pub use youtube::{extract_youtube_id, is_youtube_url, thumbnail_url, YouTubeTranscriptClient};
