// crates/learnsync-analysis/src/lib.rs
//
// learnsync-analysis: the resource scoring and path-ordering pipeline.
//
// `level` classifies resource text into a difficulty tier from keyword rules,
// `analyzer` turns raw resource text into an `AnalyzedResource` against a
// section, `clustering` groups fingerprints by average-linkage agglomeration,
// and `path` orders a section's resources into a learning path.

pub mod analyzer;
pub mod clustering;
pub mod config;
pub mod level;
pub mod path;

pub use analyzer::{combined_text, ResourceAnalyzer};
pub use config::AnalysisConfig;
pub use level::{LevelInferencer, LevelRule, LevelRules};
pub use path::{PathCandidate, PathComposer, PathConfig};
