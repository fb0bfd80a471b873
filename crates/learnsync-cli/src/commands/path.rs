// crates/learnsync-cli/src/commands/path.rs
//
// `learnsync path <section> [--json]`

use clap::Args;

use learnsync_rpc::handlers::section::{GetPathRequest, GetPathResponse};

use crate::output::{format_json, format_table, PathRow};
use crate::rpc_client::call;

#[derive(Debug, Args)]
pub struct PathCmd {
    pub section: String,
    #[arg(long)]
    pub json: bool,
}

pub async fn run(cmd: &PathCmd, rpc: &str) -> Result<(), Box<dyn std::error::Error>> {
    let params = serde_json::to_value(GetPathRequest {
        section_name: cmd.section.clone(),
    })?;
    let response: GetPathResponse = call(rpc, "section/path", params).await?;

    if cmd.json {
        println!("{}", format_json(&response.resources));
        return Ok(());
    }

    if response.resources.is_empty() {
        println!("Section '{}' has no resources yet.", response.section_name);
        return Ok(());
    }

    let rows: Vec<PathRow> = response
        .resources
        .iter()
        .enumerate()
        .map(|(i, r)| PathRow::new(i + 1, r))
        .collect();
    println!("Learning path for '{}':", response.section_name);
    println!("{}", format_table(&rows));

    Ok(())
}
