// crates/learnsync-daemon/src/main.rs
//
// Binary entrypoint for the LearnSync daemon.
//
// Initializes tracing, parses CLI arguments, loads configuration, opens the
// store, builds the embedding and transcript collaborators, and serves RPC.

mod config;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use config::DaemonConfig;

use learnsync_analysis::{PathComposer, ResourceAnalyzer};
use learnsync_core::{ResourceStore, TranscriptSource};
use learnsync_rpc::{LearnSyncRpcServer, RpcConfig};
use learnsync_service::{build_embedding_provider, LearningService};
use learnsync_store::{InMemoryStore, RocksStore};

/// LearnSync daemon: resource ingestion and learning paths over JSON-RPC.
#[derive(Parser, Debug)]
#[command(name = "learnsync-daemon", version, about = "LearnSync daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.learnsync/config.toml")]
    config: String,

    /// Override the RPC port from the config file.
    #[arg(long)]
    rpc_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Config is read before the subscriber exists so `log_level` can seed the
    // filter; the load outcome is logged right after init.
    let config_path = expand_tilde(&args.config);
    let loaded = DaemonConfig::load(&config_path);
    let default_level = match &loaded {
        Ok(cfg) => cfg.log_level.clone(),
        Err(_) => "info".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_level)),
        )
        .init();

    let mut daemon_config = match loaded {
        Ok(cfg) => {
            tracing::info!("Loaded configuration from {}", config_path);
            cfg
        }
        Err(e) => {
            tracing::warn!(
                "Could not load config from {}: {}. Using defaults.",
                config_path,
                e
            );
            DaemonConfig::default()
        }
    };

    if let Some(port) = args.rpc_port {
        daemon_config.rpc_port = port;
    }

    tracing::info!("LearnSync Daemon v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", daemon_config.data_dir);
    tracing::info!("Storage backend: {}", daemon_config.storage.backend);
    tracing::info!(
        "Embedding provider: {} ({})",
        daemon_config.embedding.provider,
        daemon_config.embedding.model
    );

    // A missing API key fails here, before anything is served.
    let provider = build_embedding_provider(&daemon_config.embedding)?;

    let store: Arc<dyn ResourceStore> = match daemon_config.storage.backend.as_str() {
        "rocks" => {
            let data_dir = expand_tilde(&daemon_config.data_dir);
            std::fs::create_dir_all(&data_dir)?;
            let db_path = format!("{}/rocksdb", data_dir);
            let store = RocksStore::open(&db_path)?;
            tracing::info!("RocksDB store opened at {}", db_path);
            Arc::new(store)
        }
        "memory" => {
            tracing::warn!("Using in-memory storage; data will not survive a restart");
            Arc::new(InMemoryStore::new())
        }
        other => {
            return Err(format!("unknown storage backend: {}", other).into());
        }
    };

    let transcripts: Option<Arc<dyn TranscriptSource>> =
        match daemon_config.transcripts.build_client()? {
            Some(client) => Some(Arc::new(client)),
            None => {
                tracing::info!("Transcript fetching disabled");
                None
            }
        };

    let analyzer = ResourceAnalyzer::new(
        provider,
        daemon_config.embedding.model.clone(),
        &daemon_config.analysis,
    );
    let composer = PathComposer::new(daemon_config.analysis.path.clone());
    let service = Arc::new(LearningService::new(store, analyzer, composer, transcripts));

    let rpc_config = RpcConfig {
        host: daemon_config.rpc_host.clone(),
        port: daemon_config.rpc_port,
    };
    let server = LearnSyncRpcServer::new(rpc_config, service).with_start_time(Instant::now());

    tokio::select! {
        result = server.start() => {
            if let Err(e) = result {
                tracing::error!("RPC server error: {}", e);
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal");
        }
    }

    tracing::info!("LearnSync daemon stopped");
    Ok(())
}

/// Expand a leading `~/` to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
