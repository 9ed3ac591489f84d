//! Hot-swappable serving slot for fitted recommenders.
//!
//! Request threads read the model through an [`Arc`] snapshot, so scoring
//! never blocks on a refit. Publishing a freshly fitted recommender is a
//! single pointer swap under a write lock; readers holding the previous
//! snapshot finish their requests against it undisturbed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::item_based::ItemBasedRecommender;

/// Shared slot holding the recommender currently being served.
///
/// # Examples
///
/// ```
/// use recomendar::item_based::ItemBasedRecommender;
/// use recomendar::serve::ModelHandle;
///
/// let handle = ModelHandle::new(ItemBasedRecommender::new());
/// assert_eq!(handle.generation(), 1);
///
/// let previous = handle.swap(ItemBasedRecommender::new());
/// assert_eq!(handle.generation(), 2);
/// assert!(!previous.is_fitted());
/// ```
#[derive(Debug)]
pub struct ModelHandle {
    slot: RwLock<Arc<ItemBasedRecommender>>,
    generation: AtomicU64,
}

impl ModelHandle {
    /// Creates a handle serving `recommender` as generation 1.
    #[must_use]
    pub fn new(recommender: ItemBasedRecommender) -> Self {
        Self {
            slot: RwLock::new(Arc::new(recommender)),
            generation: AtomicU64::new(1),
        }
    }

    /// Snapshot of the recommender being served right now.
    ///
    /// The snapshot stays valid for the caller's whole request even if a
    /// swap happens mid-flight.
    #[must_use]
    pub fn current(&self) -> Arc<ItemBasedRecommender> {
        Arc::clone(&self.slot.read().expect("model slot poisoned"))
    }

    /// Publishes a new recommender and returns the one it replaced.
    pub fn swap(&self, next: ItemBasedRecommender) -> Arc<ItemBasedRecommender> {
        let mut slot = self.slot.write().expect("model slot poisoned");
        let previous = std::mem::replace(&mut *slot, Arc::new(next));
        self.generation.fetch_add(1, Ordering::SeqCst);
        previous
    }

    /// Monotonic publish counter, starting at 1 for the initial model.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item_based::RatingHistory;
    use crate::matrix::Rating;

    fn fitted() -> ItemBasedRecommender {
        let rows = vec![
            Rating::new(1, 10, 4.0),
            Rating::new(2, 10, 4.6),
            Rating::new(3, 10, 4.9),
            Rating::new(1, 20, 3.5),
            Rating::new(2, 20, 3.9),
            Rating::new(3, 20, 4.6),
        ];
        let mut rec = ItemBasedRecommender::new().with_min_periods(3);
        rec.fit(&rows).unwrap();
        rec
    }

    #[test]
    fn test_current_serves_initial_model() {
        let handle = ModelHandle::new(fitted());
        assert_eq!(handle.generation(), 1);
        assert!(handle.current().is_fitted());
    }

    #[test]
    fn test_swap_publishes_and_returns_previous() {
        let handle = ModelHandle::new(ItemBasedRecommender::new());
        let previous = handle.swap(fitted());

        assert!(!previous.is_fitted());
        assert!(handle.current().is_fitted());
        assert_eq!(handle.generation(), 2);
    }

    #[test]
    fn test_reader_snapshot_survives_swap() {
        let handle = ModelHandle::new(fitted());
        let snapshot = handle.current();

        handle.swap(ItemBasedRecommender::new());

        // The in-flight reader still scores against the model it grabbed.
        let history: RatingHistory = [(10, 5.0)].into_iter().collect();
        assert!(snapshot.score(&history, 20).is_some());
        assert!(!handle.current().is_fitted());
    }

    #[test]
    fn test_concurrent_reads_during_swaps() {
        let handle = Arc::new(ModelHandle::new(fitted()));

        let mut workers = Vec::new();
        for _ in 0..4 {
            let handle = Arc::clone(&handle);
            workers.push(std::thread::spawn(move || {
                let history: RatingHistory = [(10, 5.0)].into_iter().collect();
                for _ in 0..50 {
                    let rec = handle.current();
                    let picks = rec.recommend(&history, 3);
                    assert!(picks.len() <= 3);
                }
            }));
        }

        for _ in 0..10 {
            handle.swap(fitted());
        }
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(handle.generation(), 11);
    }
}
