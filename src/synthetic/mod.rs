//! Seeded synthetic rating generation for tests and benchmarks.
//!
//! [`SyntheticRatings`] produces rating rows with real collaborative
//! structure: items are partitioned into taste groups, each user draws one
//! affinity per group, and every observed rating is the user's affinity for
//! the item's group plus bounded noise. Items in the same group therefore
//! correlate positively across users, which is exactly the signal an
//! item-based fit is supposed to find. Generation is a pure function of the
//! builder settings and the seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::matrix::Rating;

/// Builder for seeded synthetic rating datasets.
///
/// # Examples
///
/// ```
/// use recomendar::synthetic::SyntheticRatings;
///
/// let rows = SyntheticRatings::new()
///     .with_n_users(50)
///     .with_n_items(20)
///     .with_seed(7)
///     .generate();
///
/// assert!(!rows.is_empty());
/// assert!(rows.iter().all(|r| (1.0..=5.0).contains(&r.value)));
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticRatings {
    n_users: usize,
    n_items: usize,
    n_groups: usize,
    density: f32,
    noise: f32,
    seed: u64,
}

impl SyntheticRatings {
    /// Creates a generator with defaults: 120 users, 60 items in 6 taste
    /// groups, 30% observation density, noise amplitude 0.25, seed 42.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_users: 120,
            n_items: 60,
            n_groups: 6,
            density: 0.3,
            noise: 0.25,
            seed: 42,
        }
    }

    /// Sets the number of users.
    #[must_use]
    pub fn with_n_users(mut self, n_users: usize) -> Self {
        self.n_users = n_users;
        self
    }

    /// Sets the number of items.
    #[must_use]
    pub fn with_n_items(mut self, n_items: usize) -> Self {
        self.n_items = n_items;
        self
    }

    /// Sets the number of taste groups items are assigned to round-robin.
    #[must_use]
    pub fn with_n_groups(mut self, n_groups: usize) -> Self {
        self.n_groups = n_groups;
        self
    }

    /// Sets the probability that a given (user, item) cell is observed.
    #[must_use]
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Sets the noise amplitude added to each rating before clamping to the
    /// 1.0 to 5.0 scale.
    #[must_use]
    pub fn with_noise(mut self, noise: f32) -> Self {
        self.noise = noise;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates the rating rows.
    ///
    /// User and item ids start at 1. Each user draws a per-group affinity
    /// in 1.5 to 4.5; an observed rating is that affinity plus uniform
    /// noise, clamped to the rating scale. The same settings and seed
    /// always produce the same rows.
    #[must_use]
    pub fn generate(&self) -> Vec<Rating> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let n_groups = self.n_groups.max(1);
        let noise = self.noise.max(0.0);

        let mut rows = Vec::new();
        for user in 0..self.n_users {
            let affinities: Vec<f32> = (0..n_groups)
                .map(|_| rng.gen_range(1.5..=4.5))
                .collect();
            for item in 0..self.n_items {
                if rng.gen::<f32>() >= self.density {
                    continue;
                }
                let group = item % n_groups;
                let value = (affinities[group] + rng.gen_range(-noise..=noise)).clamp(1.0, 5.0);
                rows.push(Rating::new(user as u64 + 1, item as u64 + 1, value));
            }
        }
        rows
    }
}

impl Default for SyntheticRatings {
    fn default() -> Self {
        Self::new()
    }
}
