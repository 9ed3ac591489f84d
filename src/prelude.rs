//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use recomendar::prelude::*;
//! ```

pub use crate::error::{RecomendarError, Result};
pub use crate::matrix::{ItemId, Rating, RatingsMatrix, UserId};
pub use crate::item_based::{FittedModel, ItemBasedRecommender, RatingHistory};
pub use crate::serve::ModelHandle;
pub use crate::metrics::{hit_at_k, mae, ndcg_at_k, reciprocal_rank, rmse};
pub use crate::synthetic::SyntheticRatings;
