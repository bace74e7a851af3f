//! Shared vector math over `f32` slices.
//!
//! All functions here fail closed: a length mismatch, empty input, or
//! zero-magnitude vector yields `0.0` rather than an error, so one malformed
//! stored vector can never abort a scan or rerank.

/// Dot product of two equal-length slices. `0.0` on mismatch or empty input.
#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean (L2) norm.
#[inline]
pub fn l2_norm(a: &[f32]) -> f32 {
    a.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity of two vectors: `dot(a,b) / (‖a‖·‖b‖)`, range [-1, 1].
///
/// Returns `0.0` when the lengths differ, either slice is empty, or either
/// magnitude is zero. A malformed vector ranks last instead of crashing.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-6;

    #[test]
    fn test_self_similarity_is_one() {
        let v = vec![0.3f32, -1.2, 4.5, 0.01];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = [1.0f32, 0.0];
        let b = [0.0f32, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < TOLERANCE);
    }

    #[test]
    fn test_opposite_vectors_score_negative_one() {
        let a = [1.0f32, 2.0];
        let b = [-1.0f32, -2.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_mismatched_lengths_score_zero() {
        let a = [1.0f32, 0.0, 0.0];
        let b = [1.0f32, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_zero_norm_scores_zero() {
        let a = [0.0f32, 0.0];
        let b = [1.0f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let empty: [f32; 0] = [];
        assert_eq!(cosine_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn test_scale_invariance() {
        let a = [0.5f32, 1.5, -2.0];
        let scaled: Vec<f32> = a.iter().map(|x| x * 7.0).collect();
        assert!((cosine_similarity(&a, &scaled) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_dot_mismatch_is_zero() {
        assert_eq!(dot(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_l2_norm() {
        assert!((l2_norm(&[3.0, 4.0]) - 5.0).abs() < TOLERANCE);
    }
}
