// crates/learnsync-cli/src/commands/status.rs
//
// `learnsync status`: daemon health.

use learnsync_rpc::handlers::node::GetHealthResponse;

use crate::rpc_client::call;

pub async fn run(rpc: &str) -> Result<(), Box<dyn std::error::Error>> {
    let health: GetHealthResponse = match call(rpc, "node/health", serde_json::json!({})).await {
        Ok(h) => h,
        Err(e) => {
            println!("LearnSync daemon unreachable at {}", rpc);
            println!("  Error: {}", e);
            return Ok(());
        }
    };

    println!("LearnSync daemon v{}", health.version);
    println!();
    println!("  RPC endpoint:    {}", rpc);
    println!("  Status:          {}", health.status);
    println!(
        "  Storage:         {}",
        if health.storage_ok { "ok" } else { "error" }
    );
    println!("  Sections:        {}", health.section_count);
    println!("  Embedding model: {}", health.embedding_model);
    println!("  Uptime:          {}s", health.uptime_seconds);
    if let Some(details) = &health.details {
        println!("  Details:         {}", details);
    }

    Ok(())
}
