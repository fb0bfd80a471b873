// crates/learnsync-core/src/similarity.rs
//
// Cosine similarity between semantic fingerprints.

use crate::embedding::Fingerprint;
use crate::error::LearnSyncError;

/// Compute cosine similarity between two fingerprints.
///
/// Returns a value in [-1.0, 1.0], or 0.0 if either vector has zero magnitude
/// or the ratio is not finite.
/// Fingerprints of different lengths come from different models and fail with
/// `DimensionMismatch`.
pub fn cosine_similarity(a: &Fingerprint, b: &Fingerprint) -> Result<f64, LearnSyncError> {
    if a.dimensions() != b.dimensions() {
        return Err(LearnSyncError::DimensionMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as f64) * (y as f64))
        .sum();

    let denom = a.magnitude() * b.magnitude();
    if denom == 0.0 {
        return Ok(0.0);
    }

    let sim = dot / denom;
    if !sim.is_finite() {
        return Ok(0.0);
    }
    Ok(sim.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(values: &[f32]) -> Fingerprint {
        Fingerprint::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let v = fp(&[1.0, 2.0, 3.0]);
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&fp(&[1.0, 0.0]), &fp(&[0.0, 1.0])).unwrap();
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let sim = cosine_similarity(&fp(&[1.0, 0.0]), &fp(&[-1.0, 0.0])).unwrap();
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let zero = fp(&[0.0, 0.0]);
        assert_eq!(cosine_similarity(&fp(&[1.0, 2.0]), &zero).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = fp(&[0.3, -1.2, 4.0, 0.5]);
        let b = fp(&[2.0, 0.1, -0.7, 1.5]);
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_cosine_similarity_extreme_magnitudes_stay_finite() {
        let big = fp(&[f32::MAX, f32::MAX, f32::MAX]);
        let tiny = fp(&[f32::MIN_POSITIVE, 0.0, f32::MIN_POSITIVE]);
        for (a, b) in [(&big, &big), (&big, &tiny), (&tiny, &tiny)] {
            let sim = cosine_similarity(a, b).unwrap();
            assert!(sim.is_finite());
            assert!((-1.0..=1.0).contains(&sim));
        }
        let self_sim = cosine_similarity(&big, &big).unwrap();
        assert!((self_sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_different_lengths() {
        let err = cosine_similarity(&fp(&[1.0, 2.0, 3.0]), &fp(&[1.0, 2.0])).unwrap_err();
        assert!(matches!(
            err,
            LearnSyncError::DimensionMismatch { left: 3, right: 2 }
        ));
    }
}
