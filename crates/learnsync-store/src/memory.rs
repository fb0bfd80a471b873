// crates/learnsync-store/src/memory.rs
//
// In-memory `ResourceStore`. Nothing survives a restart; used by tests and by
// the daemon when `storage.backend = "memory"`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use learnsync_core::error::LearnSyncError;
use learnsync_core::resource::ResourceRecord;
use learnsync_core::section::{Section, SectionSummary};
use learnsync_core::traits::ResourceStore;

#[derive(Debug, Default)]
struct Inner {
    /// Sections in creation order.
    sections: Vec<Section>,
    resources: HashMap<Uuid, ResourceRecord>,
    /// Section ID -> resource IDs in ingestion order.
    by_section: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory store guarded by a single `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, LearnSyncError> {
        self.inner
            .read()
            .map_err(|e| LearnSyncError::Storage(format!("RwLock poisoned: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, LearnSyncError> {
        self.inner
            .write()
            .map_err(|e| LearnSyncError::Storage(format!("RwLock poisoned: {}", e)))
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn find_section(&self, name: &str) -> Result<Option<Section>, LearnSyncError> {
        Ok(self.read()?.sections.iter().find(|s| s.name == name).cloned())
    }

    async fn get_or_create_section(&self, name: &str) -> Result<Section, LearnSyncError> {
        let mut inner = self.write()?;
        if let Some(existing) = inner.sections.iter().find(|s| s.name == name) {
            return Ok(existing.clone());
        }
        let section = Section::new(name);
        inner.sections.push(section.clone());
        Ok(section)
    }

    async fn list_sections(&self) -> Result<Vec<SectionSummary>, LearnSyncError> {
        let inner = self.read()?;
        Ok(inner
            .sections
            .iter()
            .map(|s| SectionSummary {
                section: s.clone(),
                resource_count: inner.by_section.get(&s.id).map_or(0, Vec::len),
            })
            .collect())
    }

    async fn save_resource(&self, record: &ResourceRecord) -> Result<(), LearnSyncError> {
        let mut inner = self.write()?;
        let id = record.id();
        if inner.resources.insert(id, record.clone()).is_none() {
            inner.by_section.entry(record.section_id).or_default().push(id);
        }
        Ok(())
    }

    async fn get_resource(&self, id: &Uuid) -> Result<Option<ResourceRecord>, LearnSyncError> {
        Ok(self.read()?.resources.get(id).cloned())
    }

    async fn list_resources(&self, section_id: &Uuid) -> Result<Vec<ResourceRecord>, LearnSyncError> {
        let inner = self.read()?;
        Ok(inner
            .by_section
            .get(section_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.resources.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_record;

    #[tokio::test]
    async fn sections_are_unique_by_name() {
        let store = InMemoryStore::new();
        let a = store.get_or_create_section("Physics").await.unwrap();
        let b = store.get_or_create_section("Physics").await.unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(store.list_sections().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn overwrite_does_not_duplicate_index() {
        let store = InMemoryStore::new();
        let section = store.get_or_create_section("Physics").await.unwrap();
        let record = make_record(&section, "https://x", 0.5);
        store.save_resource(&record).await.unwrap();
        store.save_resource(&record).await.unwrap();

        let listed = store.list_resources(&section.id).await.unwrap();
        assert_eq!(listed, vec![record]);
        let summaries = store.list_sections().await.unwrap();
        assert_eq!(summaries[0].resource_count, 1);
    }

    #[tokio::test]
    async fn unknown_section_lists_nothing() {
        let store = InMemoryStore::new();
        assert!(store.find_section("Nope").await.unwrap().is_none());
        assert!(store.list_resources(&Uuid::now_v7()).await.unwrap().is_empty());
    }
}
