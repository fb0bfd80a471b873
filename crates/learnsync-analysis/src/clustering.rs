// crates/learnsync-analysis/src/clustering.rs
//
// Agglomerative clustering with cosine distance and average linkage.
//
// Starts from singleton clusters and repeatedly merges the pair with the
// smallest group-average distance until `k` clusters remain. Inter-cluster
// distances are maintained with the Lance-Williams update for average
// linkage. Ties resolve to the lowest (i, j) pair, so results are fully
// deterministic.

use learnsync_core::LearnSyncError;

/// Number of clusters for `n` resources: one per `per_cluster` resources,
/// capped at `max_clusters` and never below one.
pub fn cluster_count(n: usize, max_clusters: usize, per_cluster: usize) -> usize {
    let per_cluster = per_cluster.max(1);
    (n / per_cluster).max(1).min(max_clusters.max(1))
}

/// Cosine distance `1 - cos(a, b)`, clamped to [0, 2].
///
/// A zero-magnitude vector is treated as orthogonal to everything (distance 1).
fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 1.0;
    }
    (1.0 - dot / denom).clamp(0.0, 2.0)
}

/// Check that the vectors form a well-formed matrix.
fn validate(vectors: &[&[f32]], k: usize) -> Result<(), LearnSyncError> {
    let n = vectors.len();
    if n == 0 {
        return Err(LearnSyncError::ClusteringFailure(
            "no vectors to cluster".to_string(),
        ));
    }
    if k == 0 || k > n {
        return Err(LearnSyncError::ClusteringFailure(format!(
            "cannot form {} clusters from {} vectors",
            k, n
        )));
    }
    let dim = vectors[0].len();
    if dim == 0 {
        return Err(LearnSyncError::ClusteringFailure(
            "vectors have zero dimensions".to_string(),
        ));
    }
    for (i, v) in vectors.iter().enumerate() {
        if v.len() != dim {
            return Err(LearnSyncError::ClusteringFailure(format!(
                "vector {} has {} dimensions, expected {}",
                i,
                v.len(),
                dim
            )));
        }
        if v.iter().any(|x| !x.is_finite()) {
            return Err(LearnSyncError::ClusteringFailure(format!(
                "vector {} contains non-finite values",
                i
            )));
        }
    }
    Ok(())
}

/// Partition `vectors` into `k` clusters.
///
/// Returns one label per input vector. Labels are dense in `0..k` and
/// numbered by the position of each cluster's earliest member.
pub fn agglomerative_average(vectors: &[&[f32]], k: usize) -> Result<Vec<usize>, LearnSyncError> {
    validate(vectors, k)?;
    let n = vectors.len();

    let mut dist = vec![vec![0.0_f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = cosine_distance(vectors[i], vectors[j]);
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    // members[slot] is None once the slot has been merged away.
    let mut members: Vec<Option<Vec<usize>>> = (0..n).map(|i| Some(vec![i])).collect();
    let mut active = n;

    while active > k {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            if members[i].is_none() {
                continue;
            }
            for j in (i + 1)..n {
                if members[j].is_none() {
                    continue;
                }
                let d = dist[i][j];
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((i, j, d));
                }
            }
        }

        let (i, j, _) = best.ok_or_else(|| {
            LearnSyncError::ClusteringFailure("no mergeable cluster pair".to_string())
        })?;

        let size_i = members[i].as_ref().map_or(0, Vec::len) as f64;
        let merged = members[j].take().unwrap_or_default();
        let size_j = merged.len() as f64;

        for c in 0..n {
            if c == i || members[c].is_none() {
                continue;
            }
            let d = (size_i * dist[i][c] + size_j * dist[j][c]) / (size_i + size_j);
            dist[i][c] = d;
            dist[c][i] = d;
        }

        if let Some(target) = members[i].as_mut() {
            target.extend(merged);
        }
        active -= 1;
    }

    let mut labels = vec![0usize; n];
    for (label, group) in members.iter().flatten().enumerate() {
        for &idx in group {
            labels[idx] = label;
        }
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_count_heuristic() {
        assert_eq!(cluster_count(2, 3, 3), 1);
        assert_eq!(cluster_count(5, 3, 3), 1);
        assert_eq!(cluster_count(6, 3, 3), 2);
        assert_eq!(cluster_count(9, 3, 3), 3);
        assert_eq!(cluster_count(40, 3, 3), 3);
        assert_eq!(cluster_count(4, 3, 0), 3);
    }

    #[test]
    fn separates_two_directions() {
        let data: Vec<Vec<f32>> = vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.98, 0.05],
            vec![0.02, 0.99],
        ];
        let refs: Vec<&[f32]> = data.iter().map(|v| v.as_slice()).collect();
        let labels = agglomerative_average(&refs, 2).unwrap();
        assert_eq!(labels, vec![0, 1, 0, 1]);
    }

    #[test]
    fn single_cluster_labels_everything_zero() {
        let data: Vec<Vec<f32>> = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]];
        let refs: Vec<&[f32]> = data.iter().map(|v| v.as_slice()).collect();
        assert_eq!(agglomerative_average(&refs, 1).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn k_equal_to_n_keeps_singletons() {
        let data: Vec<Vec<f32>> = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
        let refs: Vec<&[f32]> = data.iter().map(|v| v.as_slice()).collect();
        assert_eq!(agglomerative_average(&refs, 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn average_linkage_uses_group_mean() {
        // Points on a unit circle at 0, 10, 20 and 80 degrees. The three
        // close points merge first; the outlier stays alone at k = 2.
        let angles: [f32; 4] = [0.0, 10.0, 20.0, 80.0];
        let data: Vec<Vec<f32>> = angles
            .iter()
            .map(|a| vec![a.to_radians().cos(), a.to_radians().sin()])
            .collect();
        let refs: Vec<&[f32]> = data.iter().map(|v| v.as_slice()).collect();
        assert_eq!(agglomerative_average(&refs, 2).unwrap(), vec![0, 0, 0, 1]);
    }

    #[test]
    fn deterministic_across_runs() {
        let data: Vec<Vec<f32>> = (0..12)
            .map(|i| learnsync_core::hash_embedding(&format!("doc-{}", i), 16))
            .collect();
        let refs: Vec<&[f32]> = data.iter().map(|v| v.as_slice()).collect();
        let first = agglomerative_average(&refs, 3).unwrap();
        let second = agglomerative_average(&refs, 3).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().all(|&l| l < 3));
    }

    #[test]
    fn mismatched_dimensions_fail() {
        let data: Vec<Vec<f32>> = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
        let refs: Vec<&[f32]> = data.iter().map(|v| v.as_slice()).collect();
        assert!(matches!(
            agglomerative_average(&refs, 1),
            Err(LearnSyncError::ClusteringFailure(_))
        ));
    }

    #[test]
    fn non_finite_values_fail() {
        let data: Vec<Vec<f32>> = vec![vec![1.0, f32::NAN], vec![1.0, 0.0]];
        let refs: Vec<&[f32]> = data.iter().map(|v| v.as_slice()).collect();
        assert!(agglomerative_average(&refs, 1).is_err());
    }

    #[test]
    fn invalid_k_fails() {
        let data: Vec<Vec<f32>> = vec![vec![1.0], vec![2.0]];
        let refs: Vec<&[f32]> = data.iter().map(|v| v.as_slice()).collect();
        assert!(agglomerative_average(&refs, 0).is_err());
        assert!(agglomerative_average(&refs, 3).is_err());
        assert!(agglomerative_average(&[], 1).is_err());
    }
}
