//! Recomendar: item-based collaborative filtering in pure Rust.
//!
//! Fits an item-item Pearson similarity model from flat rating rows, then
//! serves rating predictions and top-N recommendations from the immutable
//! fitted artifact. Models persist as small versioned binary blobs and can
//! be hot-swapped under live traffic.
//!
//! # Quick Start
//!
//! ```
//! use recomendar::prelude::*;
//!
//! // Train on seeded synthetic ratings with grouped taste structure.
//! let rows = SyntheticRatings::new().with_seed(7).generate();
//! let mut rec = ItemBasedRecommender::new().with_min_periods(3);
//! rec.fit(&rows).unwrap();
//!
//! // Rank unseen items for a user who loved item 1.
//! let mut history = RatingHistory::new();
//! history.insert(1, 5.0);
//! let picks = rec.recommend(&history, 5);
//! assert!(picks.len() <= 5);
//! assert!(picks.iter().all(|&(item, _)| item != 1));
//! ```
//!
//! # Modules
//!
//! - [`matrix`]: Dense user x item ratings matrix with NaN-aware statistics
//! - [`similarity`]: Co-rated Pearson correlation and neighbor shortlists
//! - [`item_based`]: The fit/score/recommend estimator and its model artifact
//! - [`store`]: Versioned binary model persistence
//! - [`serve`]: Hot-swappable serving handle for live traffic
//! - [`metrics`]: Offline evaluation (MAE, RMSE, Hit@K, MRR, NDCG)
//! - [`synthetic`]: Seeded synthetic ratings for tests and benchmarks
//! - [`error`]: Crate error type and result alias

pub mod error;
pub mod item_based;
pub mod matrix;
pub mod metrics;
pub mod prelude;
pub mod serve;
pub mod similarity;
pub mod store;
pub mod synthetic;

pub use error::{RecomendarError, Result};
pub use item_based::{FittedModel, ItemBasedRecommender, RatingHistory};
pub use matrix::{ItemId, Rating, RatingsMatrix, UserId};
