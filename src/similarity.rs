//! Cosine similarity between page embeddings
//!
//! Pure scoring primitives: no state, no I/O, safe to call from any thread.
//! Ranking and filtering live in [`crate::recommend`].

use rayon::prelude::*;

use crate::error::SimilarityError;

/// Compute cosine similarity between two embedding vectors
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 = identical direction
/// - 0.0 = orthogonal vectors
/// - -1.0 = opposite vectors
///
/// Components are accumulated in `f64`. The result is not clamped.
///
/// # Errors
/// - [`SimilarityError::EmptyVector`] if either vector is empty
/// - [`SimilarityError::DimensionMismatch`] if lengths differ
/// - [`SimilarityError::DegenerateVector`] if either vector has zero magnitude
/// - [`SimilarityError::NonFinite`] if the result is NaN or infinite
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    if a.is_empty() || b.is_empty() {
        return Err(SimilarityError::EmptyVector);
    }
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (dot_product, sum_sq_a, sum_sq_b) = a.iter().zip(b.iter()).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, sq_a, sq_b), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, sq_a + x * x, sq_b + y * y)
        },
    );

    if sum_sq_a == 0.0 || sum_sq_b == 0.0 {
        return Err(SimilarityError::DegenerateVector);
    }

    let similarity = dot_product / (sum_sq_a.sqrt() * sum_sq_b.sqrt());
    if !similarity.is_finite() {
        return Err(SimilarityError::NonFinite);
    }

    Ok(similarity)
}

/// Score every candidate against the reference, keeping per-candidate failures
///
/// Candidates are scored in parallel; the output follows input order.
pub fn similarity_each<K, V>(
    reference: &[f32],
    candidates: &[(K, V)],
) -> Vec<(K, Result<f64, SimilarityError>)>
where
    K: Clone + Send + Sync,
    V: AsRef<[f32]> + Sync,
{
    candidates
        .par_iter()
        .map(|(key, vector)| (key.clone(), cosine_similarity(reference, vector.as_ref())))
        .collect()
}

/// Score every candidate against the reference
///
/// Output follows input order. Sorting is left to the caller.
///
/// # Errors
/// The failure of the first candidate (in input order) that cannot be scored.
pub fn similarity_all<K, V>(
    reference: &[f32],
    candidates: &[(K, V)],
) -> Result<Vec<(K, f64)>, SimilarityError>
where
    K: Clone + Send + Sync,
    V: AsRef<[f32]> + Sync,
{
    similarity_each(reference, candidates)
        .into_iter()
        .map(|(key, score)| score.map(|s| (key, s)))
        .collect()
}

/// Scale a similarity to 0-100 and round to two decimals
///
/// Rounds half away from zero. Negative zero is normalised to `0.0`.
pub fn to_percent_score(similarity: f64) -> f64 {
    (similarity * 100.0 * 100.0).round() / 100.0 + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_relative_eq!(cosine_similarity(&a, &b).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert_relative_eq!(cosine_similarity(&a, &b).unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![-1.0, -2.0, -3.0];
        assert_relative_eq!(cosine_similarity(&a, &b).unwrap(), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cosine_similarity_ignores_magnitude() {
        let a = vec![1.0, 1.0];
        let b = vec![10.0, 10.0];
        assert_relative_eq!(cosine_similarity(&a, &b).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.3, -1.2, 4.5, 0.01];
        let b = vec![2.0, 0.5, -0.7, 3.3];
        assert_eq!(
            cosine_similarity(&a, &b).unwrap(),
            cosine_similarity(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_cosine_similarity_different_dimensions() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(
            cosine_similarity(&a, &b),
            Err(SimilarityError::DimensionMismatch { left: 2, right: 3 })
        );
    }

    #[test]
    fn test_cosine_similarity_empty() {
        let empty: Vec<f32> = vec![];
        assert_eq!(
            cosine_similarity(&empty, &empty),
            Err(SimilarityError::EmptyVector)
        );
    }

    #[test]
    fn test_cosine_similarity_zero_magnitude() {
        let zero = vec![0.0, 0.0];
        let a = vec![1.0, 0.0];
        assert_eq!(
            cosine_similarity(&zero, &a),
            Err(SimilarityError::DegenerateVector)
        );
        assert_eq!(
            cosine_similarity(&a, &zero),
            Err(SimilarityError::DegenerateVector)
        );
    }

    #[test]
    fn test_cosine_similarity_nan_component() {
        let a = vec![f32::NAN, 1.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), Err(SimilarityError::NonFinite));
    }

    #[test]
    fn test_similarity_all_preserves_input_order() {
        let reference = [1.0, 0.0];
        let candidates = vec![
            ("c", vec![0.0, 1.0]),
            ("a", vec![1.0, 0.0]),
            ("b", vec![1.0, 1.0]),
        ];

        let scored = similarity_all(&reference, &candidates).unwrap();

        let keys: Vec<_> = scored.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
        assert_relative_eq!(scored[0].1, 0.0, epsilon = 1e-9);
        assert_relative_eq!(scored[1].1, 1.0, epsilon = 1e-9);
        assert_relative_eq!(scored[2].1, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_similarity_all_reports_first_failure() {
        let reference = [1.0, 0.0];
        let candidates = vec![
            ("ok", vec![1.0, 0.0]),
            ("short", vec![1.0]),
            ("zero", vec![0.0, 0.0]),
        ];

        assert_eq!(
            similarity_all(&reference, &candidates),
            Err(SimilarityError::DimensionMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_similarity_each_keeps_going_past_failures() {
        let reference = [1.0, 0.0];
        let candidates = vec![("zero", vec![0.0, 0.0]), ("same", vec![2.0, 0.0])];

        let scored = similarity_each(&reference, &candidates);

        assert_eq!(scored[0].1, Err(SimilarityError::DegenerateVector));
        assert_relative_eq!(*scored[1].1.as_ref().unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_similarity_all_large_batch_is_deterministic() {
        let reference: Vec<f32> = (0..768).map(|i| (i as f32 * 0.37).sin()).collect();
        let candidates: Vec<(usize, Vec<f32>)> = (0..2000)
            .map(|n| {
                let v = (0..768)
                    .map(|i| ((i * (n + 1)) as f32 * 0.11).cos())
                    .collect();
                (n, v)
            })
            .collect();

        let first = similarity_all(&reference, &candidates).unwrap();
        let second = similarity_all(&reference, &candidates).unwrap();

        assert_eq!(first, second);
        assert!(first.iter().enumerate().all(|(i, (k, _))| i == *k));
    }

    #[test]
    fn test_to_percent_score_rounds_two_decimals() {
        assert_eq!(to_percent_score(1.0), 100.0);
        assert_eq!(to_percent_score(0.123456), 12.35);
        assert_eq!(to_percent_score(0.80004), 80.0);
        assert_eq!(to_percent_score(-0.5), -50.0);
    }

    #[test]
    fn test_to_percent_score_no_negative_zero() {
        let score = to_percent_score(-1e-12);
        assert_eq!(score, 0.0);
        assert!(score.is_sign_positive());
    }
}
