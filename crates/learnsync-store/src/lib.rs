// crates/learnsync-store/src/lib.rs
//
// learnsync-store: Storage layer for LearnSync.
//
// Provides a RocksDB-backed `ResourceStore` for the daemon and an in-memory
// implementation for tests and throwaway deployments.

pub mod memory;
pub mod rocks;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::InMemoryStore;
pub use rocks::RocksStore;

#[cfg(test)]
pub(crate) mod test_support {
    use learnsync_core::{AnalyzedResource, Fingerprint, Level, ResourceRecord, Section};

    /// Build a record for `section` with the given similarity.
    pub fn make_record(section: &Section, url: &str, similarity: f64) -> ResourceRecord {
        let analysis = AnalyzedResource::new(
            Fingerprint::new(vec![1.0, 0.0, 0.0]).unwrap(),
            Fingerprint::new(vec![0.6, 0.8, 0.0]).unwrap(),
            similarity,
            Level::Beginner,
            learnsync_core::DEFAULT_SUITABILITY_THRESHOLD,
        );
        ResourceRecord {
            section_id: section.id,
            url: url.to_string(),
            title: url.to_string(),
            description: String::new(),
            thumbnail: None,
            analysis,
            created_at: chrono::Utc::now(),
        }
    }
}
