// crates/learnsync-cli/src/commands/mod.rs

pub mod add;
pub mod path;
pub mod sections;
pub mod status;
