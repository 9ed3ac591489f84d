//! Item-based collaborative filtering estimator.
//!
//! [`ItemBasedRecommender`] is fit offline from flat rating rows and then
//! serves two read-only online operations: [`score`](ItemBasedRecommender::score)
//! predicts one user's rating for one item, and
//! [`recommend`](ItemBasedRecommender::recommend) ranks every item the user
//! has not rated. Everything scoring needs lives in an immutable
//! [`FittedModel`] artifact that can be persisted and handed between threads.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RecomendarError, Result};
use crate::matrix::{ItemId, Rating, RatingsMatrix};
use crate::similarity;
use crate::store;

/// Lower bound of the rating scale; plain-profile scores clamp here.
pub const RATING_MIN: f32 = 1.0;

/// Upper bound of the rating scale; plain-profile scores clamp here.
pub const RATING_MAX: f32 = 5.0;

/// Boost applied to the mean-centered deviation when recency weighting is
/// on, keyed by how far from the end of the history the last shortlist hit
/// sits (1 = most recent entry).
fn recency_boost(rank_from_end: usize) -> f32 {
    match rank_from_end {
        1 => 3.0,
        2 => 2.5,
        3 => 2.0,
        _ => 1.0,
    }
}

/// Immutable artifact of a fit.
///
/// Holds the per-item neighbor shortlists, per-item rating means, and the
/// item universe observed at fit time. The artifact is plain data: cloning
/// or serializing it captures the full scoring state, and nothing mutates
/// it after the fit that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    similarities: HashMap<ItemId, HashMap<ItemId, f32>>,
    item_means: HashMap<ItemId, f32>,
    item_universe: Vec<ItemId>,
    n_similar_items: usize,
}

impl FittedModel {
    /// Neighbor shortlist of an item, or `None` if the item was never
    /// observed at fit time.
    #[must_use]
    pub fn neighbors(&self, item: ItemId) -> Option<&HashMap<ItemId, f32>> {
        self.similarities.get(&item)
    }

    /// Mean observed rating of an item, or `None` if unknown.
    #[must_use]
    pub fn item_mean(&self, item: ItemId) -> Option<f32> {
        self.item_means.get(&item).copied()
    }

    /// All item ids observed at fit time, sorted ascending.
    #[must_use]
    pub fn item_universe(&self) -> &[ItemId] {
        &self.item_universe
    }

    /// Number of items observed at fit time.
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.item_universe.len()
    }

    /// Shortlist size cap the model was fit with.
    #[must_use]
    pub fn n_similar_items(&self) -> usize {
        self.n_similar_items
    }
}

/// A user's rating history, ordered oldest to newest.
///
/// Re-rating an item updates the stored value in place and keeps the item's
/// original position; recency is a property of first appearance, not of the
/// latest edit.
///
/// # Examples
///
/// ```
/// use recomendar::item_based::RatingHistory;
///
/// let mut history = RatingHistory::new();
/// history.insert(10, 4.0);
/// history.insert(20, 3.5);
/// history.insert(10, 5.0);
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.iter().next(), Some((10, 5.0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingHistory {
    entries: Vec<(ItemId, f32)>,
}

impl RatingHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rating, or updates it in place if the item is present.
    pub fn insert(&mut self, item: ItemId, value: f32) {
        if let Some(entry) = self.entries.iter_mut().find(|(i, _)| *i == item) {
            entry.1 = value;
        } else {
            self.entries.push((item, value));
        }
    }

    /// Whether the user has rated this item.
    #[must_use]
    pub fn rated(&self, item: ItemId) -> bool {
        self.entries.iter().any(|(i, _)| *i == item)
    }

    /// Number of rated items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no ratings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates (item, value) pairs oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, f32)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<(ItemId, f32)> for RatingHistory {
    fn from_iter<T: IntoIterator<Item = (ItemId, f32)>>(iter: T) -> Self {
        let mut history = Self::new();
        for (item, value) in iter {
            history.insert(item, value);
        }
        history
    }
}

/// Item-based collaborative filtering recommender.
///
/// # Algorithm
///
/// Offline, [`fit`](Self::fit) pivots rating rows into a user x item matrix,
/// takes per-item means over observed cells, and builds one Pearson neighbor
/// shortlist per item from co-rated columns (see [`crate::similarity`]).
/// Online, a prediction for item `t` given a history is
///
/// ```text
/// score(t) = mean(t) + sum(sim(t, i) * (r_i - mean(i))) / sum(sim(t, i))
/// ```
///
/// summed over history items `i` that appear in `t`'s shortlist. Histories
/// that hit no shortlist entry produce no score rather than a fabricated one.
///
/// Two scoring profiles share this implementation. The default clamps
/// predictions into [`RATING_MIN`]`..=`[`RATING_MAX`]. With
/// [`with_recency_weighting`](Self::with_recency_weighting) the deviation
/// term is instead multiplied by a boost keyed to the position of the last
/// shortlist hit in the history (most recent x3.0, second x2.5, third x2.0)
/// and the result is left unclamped, so rankings can spread beyond the
/// rating scale.
///
/// # Examples
///
/// ```
/// use recomendar::item_based::{ItemBasedRecommender, RatingHistory};
/// use recomendar::matrix::Rating;
///
/// let rows = vec![
///     Rating::new(1, 10, 4.0),
///     Rating::new(1, 20, 3.5),
///     Rating::new(2, 10, 4.6),
///     Rating::new(2, 20, 3.9),
///     Rating::new(3, 10, 4.9),
///     Rating::new(3, 20, 4.6),
/// ];
/// let mut rec = ItemBasedRecommender::new().with_min_periods(3);
/// rec.fit(&rows).unwrap();
///
/// let history: RatingHistory = [(10, 5.0)].into_iter().collect();
/// let score = rec.score(&history, 20).unwrap();
/// assert!(score > 4.0 && score <= 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct ItemBasedRecommender {
    n_similar_items: usize,
    min_periods: usize,
    recency_weighting: bool,
    model: Option<FittedModel>,
}

impl ItemBasedRecommender {
    /// Creates a recommender with default hyperparameters: shortlists of up
    /// to 200 neighbors, at least 10 co-raters per correlation, recency
    /// weighting off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_similar_items: 200,
            min_periods: 10,
            recency_weighting: false,
            model: None,
        }
    }

    /// Wraps a previously fitted (e.g. loaded) model artifact.
    ///
    /// Fit-time hyperparameters are restored from the artifact where it
    /// records them; scoring profile defaults to plain.
    #[must_use]
    pub fn from_model(model: FittedModel) -> Self {
        Self {
            n_similar_items: model.n_similar_items,
            min_periods: 10,
            recency_weighting: false,
            model: Some(model),
        }
    }

    /// Sets the per-item shortlist size cap.
    #[must_use]
    pub fn with_n_similar_items(mut self, n_similar_items: usize) -> Self {
        self.n_similar_items = n_similar_items;
        self
    }

    /// Sets the minimum number of co-raters a correlation needs to count as
    /// evidence.
    #[must_use]
    pub fn with_min_periods(mut self, min_periods: usize) -> Self {
        self.min_periods = min_periods;
        self
    }

    /// Switches between the plain (clamped) and recency-boosted (unclamped)
    /// scoring profiles.
    #[must_use]
    pub fn with_recency_weighting(mut self, recency_weighting: bool) -> Self {
        self.recency_weighting = recency_weighting;
        self
    }

    /// Whether the recency-boosted profile is active.
    #[must_use]
    pub fn recency_weighting(&self) -> bool {
        self.recency_weighting
    }

    /// Clamp applied to scores under the active profile, or `None` when the
    /// recency profile leaves scores unclamped.
    #[must_use]
    pub fn clamp_bounds(&self) -> Option<(f32, f32)> {
        if self.recency_weighting {
            None
        } else {
            Some((RATING_MIN, RATING_MAX))
        }
    }

    /// Whether the recommender has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Fitted model artifact.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted.
    #[must_use]
    pub fn model(&self) -> &FittedModel {
        self.model
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Fits the recommender on flat rating rows.
    ///
    /// Duplicate (user, item) pairs resolve last-write-wins. The produced
    /// artifact depends only on the resolved set of ratings, never on row
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`RecomendarError::EmptyInput`] when `rows` is empty and
    /// [`RecomendarError::InvalidHyperparameter`] when a builder setting is
    /// out of range.
    pub fn fit(&mut self, rows: &[Rating]) -> Result<()> {
        if self.n_similar_items == 0 {
            return Err(RecomendarError::invalid_hyperparameter(
                "n_similar_items",
                0,
                ">= 1",
            ));
        }
        if self.min_periods == 0 {
            return Err(RecomendarError::invalid_hyperparameter(
                "min_periods",
                0,
                ">= 1",
            ));
        }

        let matrix = RatingsMatrix::from_rows(rows)?;
        let item_means = matrix.item_means();
        let similarities =
            similarity::neighbor_shortlists(&matrix, self.n_similar_items, self.min_periods);

        self.model = Some(FittedModel {
            similarities,
            item_means,
            item_universe: matrix.items().to_vec(),
            n_similar_items: self.n_similar_items,
        });
        Ok(())
    }

    /// Predicts the rating `history`'s owner would give `target`.
    ///
    /// Returns `None` when no prediction is possible: the target was never
    /// observed at fit time, or no history item appears in the target's
    /// neighbor shortlist. History items the model does not know are
    /// skipped, not errors.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted.
    #[must_use]
    pub fn score(&self, history: &RatingHistory, target: ItemId) -> Option<f32> {
        let model = self.model();
        let neighbors = model.neighbors(target)?;
        let target_mean = model.item_mean(target)?;

        let mut numerator = 0.0_f32;
        let mut denominator = 0.0_f32;
        let mut boost = 1.0_f32;
        let n = history.len();

        for (pos, (item, value)) in history.iter().enumerate() {
            let Some(&sim) = neighbors.get(&item) else {
                continue;
            };
            let Some(item_mean) = model.item_mean(item) else {
                continue;
            };
            numerator += sim * (value - item_mean);
            denominator += sim;
            // Last hit wins: each contributing item overwrites the boost
            // with the factor for its own distance from the history's end.
            boost = recency_boost(n - pos);
        }

        if denominator == 0.0 {
            return None;
        }

        let deviation = numerator / denominator;
        if self.recency_weighting {
            Some(target_mean + boost * deviation)
        } else {
            Some((target_mean + deviation).clamp(RATING_MIN, RATING_MAX))
        }
    }

    /// Ranks the `top_n` best-scoring items the user has not rated.
    ///
    /// Candidates are the fit-time item universe minus the history; items
    /// without a score are dropped. The result is sorted by score
    /// descending, ties broken by ascending item id, and `top_n == 0` or an
    /// uninformative history yields an empty vector rather than an error.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted.
    #[must_use]
    pub fn recommend(&self, history: &RatingHistory, top_n: usize) -> Vec<(ItemId, f32)> {
        let model = self.model();
        if top_n == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(ItemId, f32)> = model
            .item_universe
            .iter()
            .filter(|&&item| !history.rated(item))
            .filter_map(|&item| self.score(history, item).map(|score| (item, score)))
            .collect();

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(top_n);
        ranked
    }

    /// Saves the fitted model to a versioned binary blob at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is unfitted, or if encoding or writing
    /// the blob fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let Some(model) = self.model.as_ref() else {
            return Err("Cannot save unfitted model. Call fit() first.".into());
        };
        store::save(model, path)
    }

    /// Loads a recommender from a blob written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`RecomendarError::ModelNotFound`] when no file exists at
    /// `path`, [`RecomendarError::SchemaMismatch`] when the blob's schema
    /// version is not readable by this build, and
    /// [`RecomendarError::FormatError`] when the blob is corrupt.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let model = store::load(path)?;
        Ok(Self::from_model(model))
    }
}

impl Default for ItemBasedRecommender {
    fn default() -> Self {
        Self::new()
    }
}
