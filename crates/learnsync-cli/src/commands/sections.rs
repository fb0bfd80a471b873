// crates/learnsync-cli/src/commands/sections.rs
//
// `learnsync sections [--json]`

use clap::Args;

use learnsync_rpc::handlers::section::{ListSectionsRequest, ListSectionsResponse};

use crate::output::{format_json, format_table, SectionRow};
use crate::rpc_client::call;

#[derive(Debug, Args)]
pub struct SectionsCmd {
    #[arg(long)]
    pub json: bool,
}

pub async fn run(cmd: &SectionsCmd, rpc: &str) -> Result<(), Box<dyn std::error::Error>> {
    let params = serde_json::to_value(ListSectionsRequest {})?;
    let response: ListSectionsResponse = call(rpc, "section/list", params).await?;

    if cmd.json {
        println!("{}", format_json(&response.sections));
    } else if response.sections.is_empty() {
        println!("No sections yet. Add a resource with `learnsync add`.");
    } else {
        let rows: Vec<SectionRow> = response.sections.iter().map(SectionRow::from).collect();
        println!("{}", format_table(&rows));
    }

    Ok(())
}
