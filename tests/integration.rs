//! Integration tests for the recomendar recommendation engine.
//!
//! These tests verify end-to-end workflows combining multiple components:
//! synthetic data into fit, scoring and ranking, model persistence, hot
//! swapping under read traffic, and offline evaluation.

use recomendar::prelude::*;

#[test]
fn test_fit_score_recommend_workflow() {
    // Grouped synthetic data: items 1 and 7 land in the same taste group
    // (groups assigned round-robin by id), so users who like one tend to
    // like the other's whole group.
    let rows = SyntheticRatings::new().with_seed(7).generate();

    let mut rec = ItemBasedRecommender::new().with_min_periods(3);
    rec.fit(&rows).expect("Failed to fit recommender");
    assert!(rec.is_fitted());
    assert_eq!(rec.model().n_items(), 60);

    let mut history = RatingHistory::new();
    history.insert(1, 5.0);
    history.insert(7, 4.5);

    let picks = rec.recommend(&history, 10);
    assert!(
        !picks.is_empty(),
        "grouped data should yield scoreable candidates"
    );
    assert!(picks.len() <= 10);

    // Ranked by score descending, history never recommended back.
    for pair in picks.windows(2) {
        assert!(pair[0].1 >= pair[1].1, "ranking out of order: {picks:?}");
    }
    for &(item, score) in &picks {
        assert!(item != 1 && item != 7, "recommended a rated item");
        assert!(
            (1.0..=5.0).contains(&score),
            "plain profile score {score} escaped the rating scale"
        );
    }
}

#[test]
fn test_truncation_with_many_scorable_candidates() {
    // Full density with default hyperparameters: every item pair has 120
    // co-raters, so item 1's nine group siblings are all scorable and the
    // cut at top_n is exact.
    let rows = SyntheticRatings::new().with_density(1.0).with_seed(4).generate();
    let mut rec = ItemBasedRecommender::new();
    rec.fit(&rows).expect("Failed to fit at full density");

    let history: RatingHistory = [(1, 5.0)].into_iter().collect();
    let picks = rec.recommend(&history, 5);
    assert_eq!(picks.len(), 5, "expected a full top-5: {picks:?}");
}

#[test]
fn test_save_load_round_trip() {
    let rows = SyntheticRatings::new().with_seed(5).generate();
    let mut rec = ItemBasedRecommender::new().with_min_periods(3);
    rec.fit(&rows).expect("Failed to fit recommender");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("item_based.rcmd");
    rec.save(&path).expect("Failed to save model");

    let restored = ItemBasedRecommender::load(&path).expect("Failed to load model");
    assert_eq!(restored.model(), rec.model());

    let history: RatingHistory = [(1, 5.0), (7, 4.0)].into_iter().collect();
    assert_eq!(restored.recommend(&history, 10), rec.recommend(&history, 10));
}

#[test]
fn test_load_rejects_missing_and_corrupt_files() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let err = ItemBasedRecommender::load(dir.path().join("nope.rcmd")).unwrap_err();
    assert!(matches!(err, RecomendarError::ModelNotFound { .. }));

    let corrupt = dir.path().join("corrupt.rcmd");
    std::fs::write(&corrupt, b"definitely not a model").expect("write corrupt file");
    let err = ItemBasedRecommender::load(&corrupt).unwrap_err();
    assert!(matches!(err, RecomendarError::FormatError { .. }));
}

#[test]
fn test_hot_swap_under_read_traffic() {
    let rows_v1 = SyntheticRatings::new().with_seed(1).generate();
    let mut v1 = ItemBasedRecommender::new().with_min_periods(3);
    v1.fit(&rows_v1).expect("Failed to fit v1");

    let handle = ModelHandle::new(v1);
    let snapshot = handle.current();
    assert_eq!(handle.generation(), 1);

    // Refit offline on fresh data, then publish.
    let rows_v2 = SyntheticRatings::new().with_seed(2).with_n_users(150).generate();
    let mut v2 = ItemBasedRecommender::new().with_min_periods(3);
    v2.fit(&rows_v2).expect("Failed to fit v2");
    let replaced = handle.swap(v2);
    assert_eq!(handle.generation(), 2);

    // The in-flight snapshot still serves the artifact it grabbed; new
    // readers see the replacement.
    assert_eq!(snapshot.model(), replaced.model());
    assert_ne!(handle.current().model(), snapshot.model());

    let history: RatingHistory = [(1, 5.0), (7, 4.5)].into_iter().collect();
    assert!(!snapshot.recommend(&history, 5).is_empty());
    assert!(!handle.current().recommend(&history, 5).is_empty());
}

#[test]
fn test_offline_evaluation_workflow() {
    // Hold out user 1: fit on everyone else, probe with half the held-out
    // ratings, evaluate predictions on the other half.
    let all_rows = SyntheticRatings::new().with_seed(11).generate();
    let train: Vec<Rating> = all_rows.iter().filter(|r| r.user_id != 1).copied().collect();
    let held_out: Vec<Rating> = all_rows.iter().filter(|r| r.user_id == 1).copied().collect();
    assert!(held_out.len() >= 4, "held-out user should have ratings");

    let (probe, eval) = held_out.split_at(held_out.len() / 2);
    let history: RatingHistory = probe.iter().map(|r| (r.item_id, r.value)).collect();

    let mut rec = ItemBasedRecommender::new().with_min_periods(3);
    rec.fit(&train).expect("Failed to fit on training split");

    let mut predicted = Vec::new();
    let mut actual = Vec::new();
    for r in eval {
        if let Some(s) = rec.score(&history, r.item_id) {
            predicted.push(s);
            actual.push(r.value);
        }
    }
    assert!(
        !predicted.is_empty(),
        "expected scoreable held-out items from grouped data"
    );

    let mae_err = mae(&predicted, &actual);
    let rmse_err = rmse(&predicted, &actual);
    assert!(mae_err <= rmse_err + 1e-6, "MAE cannot exceed RMSE");
    assert!(
        mae_err < 1.5,
        "MAE {mae_err} too high for structured synthetic data"
    );

    // Ranking metrics over the same split.
    let relevant: Vec<ItemId> = eval
        .iter()
        .filter(|r| r.value >= 4.0)
        .map(|r| r.item_id)
        .collect();
    let picks = rec.recommend(&history, 10);
    if !relevant.is_empty() {
        assert!((0.0..=1.0).contains(&hit_at_k(&picks, &relevant, 10)));
        assert!((0.0..=1.0).contains(&ndcg_at_k(&picks, &relevant, 10)));
        assert!((0.0..=1.0).contains(&reciprocal_rank(&picks, &relevant)));
    }
}

#[test]
fn test_recency_profile_shares_artifact() {
    let rows = SyntheticRatings::new().with_seed(3).generate();
    let mut plain = ItemBasedRecommender::new().with_min_periods(3);
    plain.fit(&rows).expect("Failed to fit recommender");

    // Same fitted artifact, different scoring profile.
    let recency = ItemBasedRecommender::from_model(plain.model().clone())
        .with_recency_weighting(true);
    assert_eq!(recency.clamp_bounds(), None);

    let history: RatingHistory = [(1, 5.0), (7, 4.5)].into_iter().collect();
    for &item in plain.model().item_universe() {
        if history.rated(item) {
            continue;
        }
        // Both profiles agree on which targets are scoreable.
        assert_eq!(
            plain.score(&history, item).is_some(),
            recency.score(&history, item).is_some()
        );
    }
}
