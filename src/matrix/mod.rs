//! User x item ratings matrix.
//!
//! [`RatingsMatrix`] pivots a flat list of [`Rating`] rows into a dense
//! row-major matrix with one row per user and one column per item. Cells
//! nobody rated hold `NaN` and are skipped by every statistic computed
//! downstream, so sparsity never biases a mean or a correlation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RecomendarError, Result};

/// Identifier for a user.
pub type UserId = u64;

/// Identifier for an item.
pub type ItemId = u64;

/// A single observed rating: one user's value for one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// User who rated.
    pub user_id: UserId,
    /// Item that was rated.
    pub item_id: ItemId,
    /// Rating value, typically on a 1.0 to 5.0 scale.
    pub value: f32,
}

impl Rating {
    /// Creates a rating row.
    #[must_use]
    pub fn new(user_id: UserId, item_id: ItemId, value: f32) -> Self {
        Self {
            user_id,
            item_id,
            value,
        }
    }
}

/// Dense user x item matrix of observed ratings.
///
/// Rows are users and columns are items, both sorted ascending by id so the
/// layout is a pure function of the observed (user, item, value) set and
/// never depends on input order. Unobserved cells hold `NaN`.
///
/// # Examples
///
/// ```
/// use recomendar::matrix::{Rating, RatingsMatrix};
///
/// let rows = vec![
///     Rating::new(1, 10, 5.0),
///     Rating::new(1, 20, 3.0),
///     Rating::new(2, 10, 4.0),
/// ];
/// let matrix = RatingsMatrix::from_rows(&rows).unwrap();
/// assert_eq!(matrix.n_users(), 2);
/// assert_eq!(matrix.n_items(), 2);
/// assert_eq!(matrix.rating(2, 10), Some(4.0));
/// assert_eq!(matrix.rating(2, 20), None);
/// ```
#[derive(Debug, Clone)]
pub struct RatingsMatrix {
    users: Vec<UserId>,
    items: Vec<ItemId>,
    user_index: HashMap<UserId, usize>,
    item_index: HashMap<ItemId, usize>,
    values: Vec<f32>,
}

impl RatingsMatrix {
    /// Pivots flat rating rows into a dense matrix.
    ///
    /// When the same (user, item) pair appears more than once, the last row
    /// wins, matching upsert semantics of the feeds that produce these rows.
    ///
    /// # Errors
    ///
    /// Returns [`RecomendarError::EmptyInput`] if `rows` is empty.
    pub fn from_rows(rows: &[Rating]) -> Result<Self> {
        if rows.is_empty() {
            return Err(RecomendarError::empty_input("ratings"));
        }

        let mut users: Vec<UserId> = rows.iter().map(|r| r.user_id).collect();
        users.sort_unstable();
        users.dedup();

        let mut items: Vec<ItemId> = rows.iter().map(|r| r.item_id).collect();
        items.sort_unstable();
        items.dedup();

        let user_index: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let item_index: HashMap<ItemId, usize> =
            items.iter().enumerate().map(|(i, &t)| (t, i)).collect();

        let n_items = items.len();
        let mut values = vec![f32::NAN; users.len() * n_items];
        for row in rows {
            let u = user_index[&row.user_id];
            let i = item_index[&row.item_id];
            values[u * n_items + i] = row.value;
        }

        Ok(Self {
            users,
            items,
            user_index,
            item_index,
            values,
        })
    }

    /// Number of distinct users (matrix rows).
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    /// Number of distinct items (matrix columns).
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// All user ids, sorted ascending.
    #[must_use]
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// All item ids, sorted ascending.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Rating at (row, col), or `None` if the cell is unobserved.
    ///
    /// # Panics
    ///
    /// Panics if `row >= n_users()` or `col >= n_items()`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        assert!(row < self.users.len(), "user row {row} out of bounds");
        assert!(col < self.items.len(), "item col {col} out of bounds");
        let v = self.values[row * self.items.len() + col];
        if v.is_nan() {
            None
        } else {
            Some(v)
        }
    }

    /// Rating by (user id, item id), or `None` if unknown or unobserved.
    #[must_use]
    pub fn rating(&self, user: UserId, item: ItemId) -> Option<f32> {
        let row = *self.user_index.get(&user)?;
        let col = *self.item_index.get(&item)?;
        self.get(row, col)
    }

    /// Column index of an item id, if the item was observed.
    #[must_use]
    pub fn item_col(&self, item: ItemId) -> Option<usize> {
        self.item_index.get(&item).copied()
    }

    /// Per-item mean over observed cells only.
    ///
    /// Unobserved cells are skipped, not counted as zero. Every item in
    /// [`items`](Self::items) has at least one observation by construction,
    /// so every item id gets an entry.
    #[must_use]
    pub fn item_means(&self) -> HashMap<ItemId, f32> {
        let mut means = HashMap::with_capacity(self.items.len());
        for (col, &item) in self.items.iter().enumerate() {
            let mut sum = 0.0_f32;
            let mut count = 0_usize;
            for row in 0..self.users.len() {
                if let Some(v) = self.get(row, col) {
                    sum += v;
                    count += 1;
                }
            }
            if count > 0 {
                means.insert(item, sum / count as f32);
            }
        }
        means
    }
}
