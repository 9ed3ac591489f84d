//! Offline evaluation metrics for recommenders.
//!
//! Rating-prediction accuracy (MAE, RMSE) over paired prediction/truth
//! slices, and ranking quality (Hit@K, reciprocal rank, NDCG@K) over the
//! `(item, score)` lists produced by
//! [`recommend`](crate::item_based::ItemBasedRecommender::recommend) with
//! binary relevance judgments.

use crate::matrix::ItemId;

/// Computes the Mean Absolute Error (MAE).
///
/// MAE = (1/n) * `Σ|predicted - actual|`
///
/// # Examples
///
/// ```
/// use recomendar::metrics::mae;
///
/// let error = mae(&[4.0, 3.0], &[4.5, 2.0]);
/// assert!((error - 0.75).abs() < 1e-6);
/// ```
///
/// # Panics
///
/// Panics if the slices have different lengths or are empty.
#[must_use]
pub fn mae(predicted: &[f32], actual: &[f32]) -> f32 {
    assert_eq!(
        predicted.len(),
        actual.len(),
        "Slices must have same length"
    );
    assert!(!predicted.is_empty(), "Slices cannot be empty");

    let n = predicted.len() as f32;
    let sum_abs_error: f32 = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).abs())
        .sum();
    sum_abs_error / n
}

/// Computes the Root Mean Squared Error (RMSE).
///
/// RMSE = sqrt((1/n) * `Σ(predicted - actual)²`)
///
/// # Panics
///
/// Panics if the slices have different lengths or are empty.
#[must_use]
pub fn rmse(predicted: &[f32], actual: &[f32]) -> f32 {
    assert_eq!(
        predicted.len(),
        actual.len(),
        "Slices must have same length"
    );
    assert!(!predicted.is_empty(), "Slices cannot be empty");

    let n = predicted.len() as f32;
    let sum_sq_error: f32 = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum();
    (sum_sq_error / n).sqrt()
}

/// Hit@K: 1.0 if any of the top `k` recommended items is relevant.
///
/// # Examples
///
/// ```
/// use recomendar::metrics::hit_at_k;
///
/// let recommended = vec![(7, 4.8), (3, 4.2), (9, 3.9)];
/// assert_eq!(hit_at_k(&recommended, &[9], 3), 1.0);
/// assert_eq!(hit_at_k(&recommended, &[9], 2), 0.0);
/// ```
#[must_use]
pub fn hit_at_k(recommended: &[(ItemId, f32)], relevant: &[ItemId], k: usize) -> f32 {
    let hit = recommended
        .iter()
        .take(k)
        .any(|(item, _)| relevant.contains(item));
    if hit {
        1.0
    } else {
        0.0
    }
}

/// Reciprocal rank of the first relevant recommendation, 0.0 if none.
#[must_use]
pub fn reciprocal_rank(recommended: &[(ItemId, f32)], relevant: &[ItemId]) -> f32 {
    recommended
        .iter()
        .position(|(item, _)| relevant.contains(item))
        .map_or(0.0, |pos| 1.0 / (pos + 1) as f32)
}

/// NDCG@K with binary relevance.
///
/// DCG counts each relevant item at 0-based position `i` of the top `k` as
/// `1 / log2(i + 2)`; the ideal DCG places every relevant item first.
/// Returns 0.0 when `relevant` is empty.
#[must_use]
pub fn ndcg_at_k(recommended: &[(ItemId, f32)], relevant: &[ItemId], k: usize) -> f32 {
    if relevant.is_empty() || k == 0 {
        return 0.0;
    }

    let dcg: f32 = recommended
        .iter()
        .take(k)
        .enumerate()
        .filter(|(_, (item, _))| relevant.contains(item))
        .map(|(i, _)| 1.0 / ((i + 2) as f32).log2())
        .sum();

    let ideal_hits = relevant.len().min(k);
    let idcg: f32 = (0..ideal_hits).map(|i| 1.0 / ((i + 2) as f32).log2()).sum();

    if idcg == 0.0 {
        0.0
    } else {
        dcg / idcg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mae_known_value() {
        let error = mae(&[4.0, 3.0, 5.0], &[4.5, 2.0, 5.0]);
        assert!((error - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rmse_known_value() {
        let error = rmse(&[4.0], &[2.0]);
        assert!((error - 2.0).abs() < 1e-6);

        let error = rmse(&[3.0, 5.0], &[4.0, 3.0]);
        assert!((error - (2.5_f32).sqrt()).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_mae_length_mismatch_panics() {
        let _ = mae(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    fn test_hit_at_k() {
        let recommended = vec![(7, 4.8), (3, 4.2), (9, 3.9)];
        assert_eq!(hit_at_k(&recommended, &[9, 11], 3), 1.0);
        assert_eq!(hit_at_k(&recommended, &[9, 11], 2), 0.0);
        assert_eq!(hit_at_k(&recommended, &[], 3), 0.0);
        assert_eq!(hit_at_k(&[], &[9], 3), 0.0);
    }

    #[test]
    fn test_reciprocal_rank() {
        let recommended = vec![(7, 4.8), (3, 4.2), (9, 3.9)];
        assert!((reciprocal_rank(&recommended, &[3]) - 0.5).abs() < 1e-6);
        assert!((reciprocal_rank(&recommended, &[7, 9]) - 1.0).abs() < 1e-6);
        assert_eq!(reciprocal_rank(&recommended, &[42]), 0.0);
    }

    #[test]
    fn test_ndcg_perfect_ranking_is_one() {
        let recommended = vec![(1, 5.0), (2, 4.0), (3, 3.0)];
        let score = ndcg_at_k(&recommended, &[1, 2], 3);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ndcg_penalizes_late_hit() {
        let recommended = vec![(1, 5.0), (2, 4.0)];
        // Single relevant item in second place: 1/log2(3) vs ideal 1.0.
        let score = ndcg_at_k(&recommended, &[2], 2);
        assert!((score - 0.6309).abs() < 1e-3);
    }

    #[test]
    fn test_ndcg_degenerate_cases() {
        let recommended = vec![(1, 5.0)];
        assert_eq!(ndcg_at_k(&recommended, &[], 3), 0.0);
        assert_eq!(ndcg_at_k(&recommended, &[1], 0), 0.0);
        assert_eq!(ndcg_at_k(&[], &[1], 3), 0.0);
    }
}
