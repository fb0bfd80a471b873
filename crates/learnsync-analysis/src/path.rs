// crates/learnsync-analysis/src/path.rs
//
// Learning-path composition for one section.
//
// Resources are clustered by fingerprint proximity, clusters are ordered by
// descending mean section similarity, and each cluster is ordered by
// ascending level rank then descending similarity. The result reads as
// "most relevant topics first, beginner to advanced within each topic".

use std::cmp::Ordering;

use serde::Deserialize;

use learnsync_core::{AnalyzedResource, Fingerprint, Level, ResourceRecord};

use crate::clustering::{agglomerative_average, cluster_count};

/// Anything the composer can order.
pub trait PathCandidate {
    /// Fingerprint used for topical clustering.
    fn fingerprint(&self) -> &Fingerprint;
    /// Similarity to the section.
    fn similarity(&self) -> f64;
    /// Difficulty level, if known. Unknown levels sort as Intermediate.
    fn level(&self) -> Option<Level>;
}

impl PathCandidate for AnalyzedResource {
    fn fingerprint(&self) -> &Fingerprint {
        self.resource_fingerprint()
    }

    fn similarity(&self) -> f64 {
        AnalyzedResource::similarity(self)
    }

    fn level(&self) -> Option<Level> {
        Some(AnalyzedResource::level(self))
    }
}

impl PathCandidate for ResourceRecord {
    fn fingerprint(&self) -> &Fingerprint {
        self.analysis.resource_fingerprint()
    }

    fn similarity(&self) -> f64 {
        self.analysis.similarity()
    }

    fn level(&self) -> Option<Level> {
        Some(self.analysis.level())
    }
}

/// Cluster-count heuristic: `min(max_clusters, max(1, n / resources_per_cluster))`.
#[derive(Debug, Clone, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_max_clusters")]
    pub max_clusters: usize,

    #[serde(default = "default_resources_per_cluster")]
    pub resources_per_cluster: usize,
}

fn default_max_clusters() -> usize {
    3
}

fn default_resources_per_cluster() -> usize {
    3
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_clusters: default_max_clusters(),
            resources_per_cluster: default_resources_per_cluster(),
        }
    }
}

/// Orders a section's resources into a learning path.
#[derive(Debug, Clone, Default)]
pub struct PathComposer {
    config: PathConfig,
}

impl PathComposer {
    pub fn new(config: PathConfig) -> Self {
        Self { config }
    }

    /// Compose a learning path. Never fails: if clustering cannot run, every
    /// resource is treated as one cluster.
    pub fn compose<T: PathCandidate>(&self, resources: Vec<T>) -> Vec<T> {
        let n = resources.len();
        if n <= 1 {
            return resources;
        }

        let k = cluster_count(n, self.config.max_clusters, self.config.resources_per_cluster);
        let labels = {
            let vectors: Vec<&[f32]> = resources.iter().map(|r| r.fingerprint().as_slice()).collect();
            match agglomerative_average(&vectors, k) {
                Ok(labels) => labels,
                Err(e) => {
                    tracing::warn!("{}; ordering {} resources as a single cluster", e, n);
                    vec![0; n]
                }
            }
        };

        let cluster_total = labels.iter().copied().max().map_or(0, |m| m + 1);
        let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); cluster_total];
        for (idx, &label) in labels.iter().enumerate() {
            clusters[label].push(idx);
        }
        clusters.retain(|c| !c.is_empty());

        let mean_similarity = |members: &[usize]| -> f64 {
            members.iter().map(|&i| resources[i].similarity()).sum::<f64>() / members.len() as f64
        };

        // Most relevant clusters first; equal means keep earliest-member order.
        clusters.sort_by(|a, b| {
            descending_nan_last(mean_similarity(a), mean_similarity(b))
                .then_with(|| a[0].cmp(&b[0]))
        });

        for members in clusters.iter_mut() {
            members.sort_by(|&a, &b| {
                let (ra, rb) = (&resources[a], &resources[b]);
                Level::rank_or_default(ra.level())
                    .cmp(&Level::rank_or_default(rb.level()))
                    .then_with(|| descending_nan_last(ra.similarity(), rb.similarity()))
            });
        }

        tracing::debug!(
            "Composed path over {} resources in {} clusters",
            n,
            clusters.len()
        );

        let mut slots: Vec<Option<T>> = resources.into_iter().map(Some).collect();
        clusters
            .into_iter()
            .flatten()
            .filter_map(|idx| slots[idx].take())
            .collect()
    }
}

/// Total order for similarities: larger first, NaN after every number.
fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}
