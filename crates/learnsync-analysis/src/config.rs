// crates/learnsync-analysis/src/config.rs
//
// Tunable constants of the analysis pipeline, loadable from the `[analysis]`
// table of the daemon configuration.

use serde::Deserialize;

use learnsync_core::DEFAULT_SUITABILITY_THRESHOLD;

use crate::level::LevelRules;
use crate::path::PathConfig;

/// Configuration for analysis and path composition.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum section similarity for a resource to be marked suitable.
    #[serde(default = "default_suitability_threshold")]
    pub suitability_threshold: f64,

    /// Cluster-count heuristic for path composition.
    #[serde(default)]
    pub path: PathConfig,

    /// Keyword rules for level inference.
    #[serde(default)]
    pub levels: LevelRules,
}

fn default_suitability_threshold() -> f64 {
    DEFAULT_SUITABILITY_THRESHOLD
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            suitability_threshold: default_suitability_threshold(),
            path: PathConfig::default(),
            levels: LevelRules::default(),
        }
    }
}
