// crates/learnsync-daemon/src/config.rs
//
// Runtime configuration for the LearnSync daemon.
// Loaded from a TOML file or populated with defaults.

use serde::Deserialize;
use std::fs;

use learnsync_analysis::AnalysisConfig;
use learnsync_service::{EmbeddingSettings, TranscriptSettings};

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Directory for local data (RocksDB).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_rpc_host")]
    pub rpc_host: String,

    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub embedding: EmbeddingSettings,

    #[serde(default)]
    pub transcripts: TranscriptSettings,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Storage backend selection.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// "rocks" (persistent, default) or "memory".
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

fn default_backend() -> String {
    "rocks".to_string()
}

fn default_data_dir() -> String {
    "~/.learnsync/data".to_string()
}

fn default_rpc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    50061
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            rpc_host: default_rpc_host(),
            rpc_port: default_rpc_port(),
            log_level: default_log_level(),
            storage: StorageConfig::default(),
            embedding: EmbeddingSettings::default(),
            transcripts: TranscriptSettings::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: DaemonConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: DaemonConfig = toml::from_str("").unwrap();
        assert_eq!(config.rpc_port, 50061);
        assert_eq!(config.storage.backend, "rocks");
        assert_eq!(config.embedding.provider, "openai");
        assert_eq!(config.transcripts.languages, vec!["ar", "en"]);
        assert!((config.analysis.suitability_threshold - 0.45).abs() < 1e-12);
    }

    #[test]
    fn nested_tables_override_defaults() {
        let config: DaemonConfig = toml::from_str(
            r#"
rpc_port = 6000
log_level = "debug"

[storage]
backend = "memory"

[embedding]
provider = "hash"
dimensions = 32

[transcripts]
enabled = false

[analysis]
suitability_threshold = 0.6

[analysis.path]
max_clusters = 4
"#,
        )
        .unwrap();
        assert_eq!(config.rpc_port, 6000);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.embedding.dimensions, Some(32));
        assert!(!config.transcripts.enabled);
        assert!((config.analysis.suitability_threshold - 0.6).abs() < 1e-12);
        assert_eq!(config.analysis.path.max_clusters, 4);
        assert_eq!(config.analysis.path.resources_per_cluster, 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(DaemonConfig::load("/nonexistent/learnsync/config.toml").is_err());
    }
}
