// crates/learnsync-cli/src/commands/add.rs
//
// `learnsync add <url> --section <name> [--level <label>]`

use clap::Args;

use learnsync_rpc::handlers::resource::{AddResourceResponse, AddResourceRpcRequest};

use crate::output::format_json;
use crate::rpc_client::call;

#[derive(Debug, Args)]
pub struct AddCmd {
    /// Resource URL (YouTube links get transcript and thumbnail).
    pub url: String,
    /// Section name; created on first use.
    #[arg(long)]
    pub section: String,
    /// Override the inferred level (beginner, intermediate, advanced, or Arabic).
    #[arg(long)]
    pub level: Option<String>,
    /// Print the stored resource as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(cmd: &AddCmd, rpc: &str) -> Result<(), Box<dyn std::error::Error>> {
    let params = serde_json::to_value(AddResourceRpcRequest {
        url: cmd.url.clone(),
        section_name: cmd.section.clone(),
        level: cmd.level.clone(),
    })?;
    let response: AddResourceResponse = call(rpc, "resource/add", params).await?;
    let resource = response.resource;

    if cmd.json {
        println!("{}", format_json(&resource));
        return Ok(());
    }

    println!("Added resource {}", resource.id);
    println!("  Section:    {}", cmd.section);
    println!("  Level:      {}", resource.level);
    println!("  Similarity: {:.3}", resource.similarity);
    println!(
        "  Suitable:   {}",
        if resource.suitable { "yes" } else { "no" }
    );
    if let Some(thumb) = &resource.thumbnail {
        println!("  Thumbnail:  {}", thumb);
    }

    Ok(())
}
