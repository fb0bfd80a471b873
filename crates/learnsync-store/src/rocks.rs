// crates/learnsync-store/src/rocks.rs
//
// RocksDB-backed persistent storage for sections and resources.
//
// Key format:
//   - `section:{uuid}`                         -> JSON-serialized Section
//   - `section_name:{name}`                    -> section UUID (name lookup)
//   - `resource:{uuid}`                        -> JSON-serialized ResourceRecord
//   - `section_resource:{section}:{resource}`  -> empty value (index only)
//
// Resource IDs are UUID v7, so the secondary index is roughly time-ordered;
// listings are sorted by `created_at` before they are returned.

use async_trait::async_trait;
use rocksdb::{DBWithThreadMode, MultiThreaded, Options};
use tokio::sync::Mutex;
use uuid::Uuid;

use learnsync_core::error::LearnSyncError;
use learnsync_core::resource::ResourceRecord;
use learnsync_core::section::{Section, SectionSummary};
use learnsync_core::traits::ResourceStore;

/// RocksDB wrapper implementing the `ResourceStore` trait.
#[derive(Debug)]
pub struct RocksStore {
    db: DBWithThreadMode<MultiThreaded>,
    /// Serializes find-or-create so concurrent ingestions share one section.
    section_lock: Mutex<()>,
}

impl RocksStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, LearnSyncError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path).map_err(|e| {
            LearnSyncError::Storage(format!("Failed to open RocksDB at {}: {}", path, e))
        })?;

        Ok(Self {
            db,
            section_lock: Mutex::new(()),
        })
    }

    fn section_key(id: &Uuid) -> Vec<u8> {
        format!("section:{}", id).into_bytes()
    }

    fn section_name_key(name: &str) -> Vec<u8> {
        format!("section_name:{}", name).into_bytes()
    }

    fn resource_key(id: &Uuid) -> Vec<u8> {
        format!("resource:{}", id).into_bytes()
    }

    fn section_resource_prefix(section_id: &Uuid) -> String {
        format!("section_resource:{}:", section_id)
    }

    fn section_resource_key(section_id: &Uuid, resource_id: &Uuid) -> Vec<u8> {
        format!("{}{}", Self::section_resource_prefix(section_id), resource_id).into_bytes()
    }

    /// Put raw bytes into RocksDB, mapping errors to LearnSyncError::Storage.
    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), LearnSyncError> {
        self.db
            .put(key, value)
            .map_err(|e| LearnSyncError::Storage(format!("RocksDB put failed: {}", e)))
    }

    /// Get raw bytes from RocksDB, mapping errors to LearnSyncError::Storage.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, LearnSyncError> {
        self.db
            .get(key)
            .map_err(|e| LearnSyncError::Storage(format!("RocksDB get failed: {}", e)))
    }

    /// Collect the key suffixes (after `prefix`) of every key under `prefix`.
    fn scan_suffixes(&self, prefix: &str) -> Result<Vec<String>, LearnSyncError> {
        let prefix = prefix.as_bytes();
        let mut suffixes = Vec::new();

        for item in self.db.prefix_iterator(prefix) {
            let (key, _value) = item
                .map_err(|e| LearnSyncError::Storage(format!("RocksDB iteration error: {}", e)))?;

            // Stop when the prefix no longer matches.
            if !key.starts_with(prefix) {
                break;
            }
            if let Ok(suffix) = std::str::from_utf8(&key[prefix.len()..]) {
                suffixes.push(suffix.to_string());
            }
        }

        Ok(suffixes)
    }

    /// Get a section by UUID.
    pub fn get_section_sync(&self, id: &Uuid) -> Result<Option<Section>, LearnSyncError> {
        match self.get_raw(&Self::section_key(id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Look up a section by exact name.
    pub fn find_section_sync(&self, name: &str) -> Result<Option<Section>, LearnSyncError> {
        let Some(bytes) = self.get_raw(&Self::section_name_key(name))? else {
            return Ok(None);
        };
        let id_str = std::str::from_utf8(&bytes)
            .map_err(|e| LearnSyncError::Storage(format!("Corrupt section name index: {}", e)))?;
        let id = Uuid::parse_str(id_str)
            .map_err(|e| LearnSyncError::Storage(format!("Corrupt section name index: {}", e)))?;
        self.get_section_sync(&id)
    }

    /// Get a resource record by UUID without going through the async trait.
    pub fn get_resource_sync(&self, id: &Uuid) -> Result<Option<ResourceRecord>, LearnSyncError> {
        match self.get_raw(&Self::resource_key(id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Store a resource record with its primary key and section index entry.
    pub fn save_resource_sync(&self, record: &ResourceRecord) -> Result<(), LearnSyncError> {
        let json = serde_json::to_vec(record)?;
        self.put_raw(&Self::resource_key(&record.id()), &json)?;
        // Secondary index (empty value; existence is the signal).
        self.put_raw(&Self::section_resource_key(&record.section_id, &record.id()), &[])?;
        Ok(())
    }

    fn resource_ids(&self, section_id: &Uuid) -> Result<Vec<Uuid>, LearnSyncError> {
        Ok(self
            .scan_suffixes(&Self::section_resource_prefix(section_id))?
            .iter()
            .filter_map(|s| Uuid::parse_str(s).ok())
            .collect())
    }
}

#[async_trait]
impl ResourceStore for RocksStore {
    async fn find_section(&self, name: &str) -> Result<Option<Section>, LearnSyncError> {
        self.find_section_sync(name)
    }

    async fn get_or_create_section(&self, name: &str) -> Result<Section, LearnSyncError> {
        let _guard = self.section_lock.lock().await;

        if let Some(existing) = self.find_section_sync(name)? {
            return Ok(existing);
        }

        let section = Section::new(name);
        let json = serde_json::to_vec(&section)?;
        self.put_raw(&Self::section_key(&section.id), &json)?;
        self.put_raw(
            &Self::section_name_key(name),
            section.id.to_string().as_bytes(),
        )?;
        tracing::info!("Created section '{}' ({})", section.name, section.id);

        Ok(section)
    }

    async fn list_sections(&self) -> Result<Vec<SectionSummary>, LearnSyncError> {
        let mut summaries = Vec::new();
        for suffix in self.scan_suffixes("section:")? {
            let Ok(id) = Uuid::parse_str(&suffix) else {
                continue;
            };
            if let Some(section) = self.get_section_sync(&id)? {
                let resource_count = self.resource_ids(&id)?.len();
                summaries.push(SectionSummary {
                    section,
                    resource_count,
                });
            }
        }
        Ok(summaries)
    }

    async fn save_resource(&self, record: &ResourceRecord) -> Result<(), LearnSyncError> {
        self.save_resource_sync(record)
    }

    async fn get_resource(&self, id: &Uuid) -> Result<Option<ResourceRecord>, LearnSyncError> {
        self.get_resource_sync(id)
    }

    async fn list_resources(&self, section_id: &Uuid) -> Result<Vec<ResourceRecord>, LearnSyncError> {
        let mut records = Vec::new();
        for id in self.resource_ids(section_id)? {
            if let Some(record) = self.get_resource_sync(&id)? {
                records.push(record);
            }
        }
        // v7 IDs minted in the same millisecond can land out of order.
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id().cmp(&b.id())));
        Ok(records)
    }
}
