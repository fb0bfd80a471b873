// crates/learnsync-cli/src/output.rs
//
// Output formatting for the CLI: tables for people, JSON for scripts.

use serde::Serialize;
use tabled::{Table, Tabled};

use learnsync_rpc::handlers::resource::ResourceView;
use learnsync_rpc::handlers::section::SectionEntry;

/// One learning-path step as a table row.
#[derive(Debug, Tabled)]
pub struct PathRow {
    #[tabled(rename = "#")]
    pub step: usize,
    #[tabled(rename = "Level")]
    pub level: String,
    #[tabled(rename = "Similarity")]
    pub similarity: String,
    #[tabled(rename = "Suitable")]
    pub suitable: String,
    #[tabled(rename = "Title")]
    pub title: String,
}

impl PathRow {
    pub fn new(step: usize, resource: &ResourceView) -> Self {
        Self {
            step,
            level: resource.level.to_string(),
            similarity: format!("{:.3}", resource.similarity),
            suitable: if resource.suitable { "yes" } else { "no" }.to_string(),
            title: truncate(&resource.title, 60),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct SectionRow {
    #[tabled(rename = "Section")]
    pub name: String,
    #[tabled(rename = "Resources")]
    pub resources: usize,
    #[tabled(rename = "ID")]
    pub id: String,
}

impl From<&SectionEntry> for SectionRow {
    fn from(entry: &SectionEntry) -> Self {
        Self {
            name: entry.name.clone(),
            resources: entry.resource_count,
            id: entry.id.to_string(),
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data)
        .unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Truncate to `max_chars` characters, appending "..." if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
