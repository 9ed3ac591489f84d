//! Item-item similarity shortlists.
//!
//! For every item column in a [`RatingsMatrix`], computes the Pearson
//! correlation against every other column over the users who rated both,
//! keeps only correlations in the open interval (0, [`SIMILARITY_UPPER_BOUND`])
//! and retains the strongest `n_similar_items` of them. The upper bound
//! drops self-correlation and near-duplicate items, whose inflated weights
//! would otherwise dominate every prediction.
//!
//! With the `parallel` feature enabled, columns are processed with rayon;
//! results are identical to the serial build.

use std::cmp::Ordering;
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::matrix::{ItemId, RatingsMatrix};

/// Exclusive upper bound on kept similarities.
///
/// Correlations at or above this are treated as the item correlating with
/// itself (or a duplicate listing of itself) and are discarded.
pub const SIMILARITY_UPPER_BOUND: f32 = 0.99;

/// Pearson correlation between two item columns over their co-raters.
///
/// Only cells observed in both columns enter the computation. Returns `None`
/// when there is no usable evidence: no co-raters at all, fewer than
/// `min_periods` of them, or either column constant over the co-raters (zero
/// variance makes the correlation undefined).
#[must_use]
pub fn co_rated_pearson(
    matrix: &RatingsMatrix,
    col_a: usize,
    col_b: usize,
    min_periods: usize,
) -> Option<f32> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for row in 0..matrix.n_users() {
        if let (Some(x), Some(y)) = (matrix.get(row, col_a), matrix.get(row, col_b)) {
            xs.push(x);
            ys.push(y);
        }
    }

    // The empty check guards min_periods == 0, where dividing by n would
    // otherwise turn the means into NaN.
    if xs.is_empty() || xs.len() < min_periods {
        return None;
    }

    let n = xs.len() as f32;
    let x_mean = xs.iter().sum::<f32>() / n;
    let y_mean = ys.iter().sum::<f32>() / n;

    let mut cov_sum = 0.0_f32;
    let mut x_var_sum = 0.0_f32;
    let mut y_var_sum = 0.0_f32;
    for i in 0..xs.len() {
        let dx = xs[i] - x_mean;
        let dy = ys[i] - y_mean;
        cov_sum += dx * dy;
        x_var_sum += dx * dx;
        y_var_sum += dy * dy;
    }

    let x_std = (x_var_sum / n).sqrt();
    let y_std = (y_var_sum / n).sqrt();

    if x_std < 1e-10 || y_std < 1e-10 {
        return None;
    }

    Some((cov_sum / n) / (x_std * y_std))
}

/// Builds the per-item neighbor shortlists.
///
/// Each item maps to at most `n_similar_items` neighbors, every kept weight
/// strictly inside (0, [`SIMILARITY_UPPER_BOUND`]). An item never appears in
/// its own shortlist. Items with no qualifying neighbor map to an empty
/// shortlist rather than being dropped.
#[must_use]
pub fn neighbor_shortlists(
    matrix: &RatingsMatrix,
    n_similar_items: usize,
    min_periods: usize,
) -> HashMap<ItemId, HashMap<ItemId, f32>> {
    let items = matrix.items();
    let n = items.len();

    let build_column = |col: usize| -> (ItemId, HashMap<ItemId, f32>) {
        let mut candidates: Vec<(ItemId, f32)> = Vec::new();
        for other in 0..n {
            if other == col {
                continue;
            }
            if let Some(sim) = co_rated_pearson(matrix, col, other, min_periods) {
                if sim > 0.0 && sim < SIMILARITY_UPPER_BOUND {
                    candidates.push((items[other], sim));
                }
            }
        }
        // Strongest first; ties broken by item id so reruns agree on which
        // neighbor survives the cut.
        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        candidates.truncate(n_similar_items);
        (items[col], candidates.into_iter().collect())
    };

    #[cfg(feature = "parallel")]
    let columns: Vec<(ItemId, HashMap<ItemId, f32>)> =
        (0..n).into_par_iter().map(build_column).collect();

    #[cfg(not(feature = "parallel"))]
    let columns: Vec<(ItemId, HashMap<ItemId, f32>)> = (0..n).map(build_column).collect();

    columns.into_iter().collect()
}
