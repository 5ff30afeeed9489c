//! Integration tests for the scoring and ranking engine
//!
//! Exercises the public recommendation surface end to end: strategy
//! exclusions, diversity caps, determinism, and the intensity policy.

use chrono::{Duration, Utc};
use std::sync::Arc;

use emotion_recommender::config::EngineConfig;
use emotion_recommender::prelude::*;

fn record(id: &str, title: &str, categories: &[&str], popularity: f64) -> ContentRecord {
    // Fixed upload time keeps recency identical across candidates
    let upload = Utc::now() - Duration::days(10);
    ContentRecord::new(
        id,
        title,
        categories.iter().map(|c| c.to_string()).collect(),
        180,
        popularity,
        0.8,
        VaPoint::new(0.5, 0.3),
        upload,
    )
    .unwrap()
}

fn build_engine(records: Vec<ContentRecord>) -> (RecommendationEngine, Arc<ContentIndex>, Arc<ProfileStore>) {
    let index = Arc::new(ContentIndex::new());
    for r in records {
        index.upsert(r).unwrap();
    }
    let profiles = Arc::new(ProfileStore::default());
    let engine = RecommendationEngine::new(
        Arc::new(StrategyTable::new().unwrap()),
        index.clone(),
        profiles.clone(),
        EngineConfig::default(),
    );
    (engine, index, profiles)
}

fn happy_state(intensity: f64) -> EmotionalState {
    EmotionalState::new(EmotionLabel::Happy, intensity, 0.6, 0.4, Utc::now())
}

fn comedy_nature_catalog() -> Vec<ContentRecord> {
    vec![
        record("c1", "Comedy one", &["comedy"], 0.9),
        record("c2", "Comedy two", &["comedy"], 0.85),
        record("c3", "Comedy three", &["comedy"], 0.8),
        record("n1", "Nature one", &["nature"], 0.7),
        record("n2", "Nature two", &["nature"], 0.65),
    ]
}

#[tokio::test]
async fn avoided_categories_never_returned() {
    let (engine, _, _) = build_engine(vec![
        record("v1", "Headlines", &["news"], 0.95),
        record("v2", "Boss fight", &["gaming"], 0.95),
        record("v3", "Rain sounds", &["relaxing"], 0.3),
        record("v4", "Piano", &["music"], 0.4),
    ]);
    let angry = EmotionalState::new(EmotionLabel::Angry, 85.0, -0.7, 0.6, Utc::now());

    let result = engine.recommend(&angry, "u1", 10, None).await.unwrap();

    let table = StrategyTable::new().unwrap();
    let avoided = &table.lookup(EmotionLabel::Angry).avoided;
    for item in &result.items {
        for category in &item.categories {
            assert!(
                !avoided.contains(category),
                "avoided category {} leaked into results",
                category
            );
        }
    }
    assert_eq!(result.items.len(), 2);
}

#[tokio::test]
async fn diversity_cap_limits_comedy_to_half_the_batch() {
    // 3 Comedy + 2 Nature, Happy at 80, diversity 0.5, count 4:
    // cap = ceil(4 x 0.5) = 2, so at most 2 comedy items
    let (engine, _, _) = build_engine(comedy_nature_catalog());
    let result = engine.recommend(&happy_state(80.0), "u1", 4, None).await.unwrap();

    assert_eq!(result.items.len(), 4);
    let comedy = result
        .items
        .iter()
        .filter(|i| i.categories.contains(&"comedy".to_string()))
        .count();
    assert!(comedy <= 2, "expected at most 2 comedy items, got {}", comedy);
    assert_eq!(result.relaxation_rounds, 0);
}

#[tokio::test]
async fn relaxation_fills_batch_on_single_category_catalog() {
    let (engine, _, _) = build_engine(vec![
        record("c1", "One", &["comedy"], 0.9),
        record("c2", "Two", &["comedy"], 0.8),
        record("c3", "Three", &["comedy"], 0.7),
        record("c4", "Four", &["comedy"], 0.6),
    ]);

    let result = engine.recommend(&happy_state(50.0), "u1", 4, None).await.unwrap();
    assert_eq!(result.items.len(), 4);
    assert!(result.relaxation_rounds > 0);
}

#[tokio::test]
async fn identical_inputs_yield_identical_ordering() {
    let state = happy_state(60.0);

    let (engine_a, _, _) = build_engine(comedy_nature_catalog());
    let (engine_b, _, _) = build_engine(comedy_nature_catalog());

    let a = engine_a.recommend(&state, "u1", 4, None).await.unwrap();
    let b = engine_b.recommend(&state, "u1", 4, None).await.unwrap();

    let ids_a: Vec<&str> = a.items.iter().map(|i| i.content_id.as_str()).collect();
    let ids_b: Vec<&str> = b.items.iter().map(|i| i.content_id.as_str()).collect();
    assert_eq!(ids_a, ids_b);
}

#[tokio::test]
async fn ties_break_by_content_id() {
    // Identical records except id: ordering must be lexicographic by id
    let (engine, _, _) = build_engine(vec![
        record("vB", "Same", &["comedy"], 0.8),
        record("vA", "Same", &["comedy"], 0.8),
    ]);

    let result = engine.recommend(&happy_state(50.0), "u1", 2, None).await.unwrap();
    assert_eq!(result.items[0].content_id, "vA");
    assert_eq!(result.items[1].content_id, "vB");
}

#[tokio::test]
async fn empty_catalog_is_a_typed_error() {
    let (engine, _, _) = build_engine(vec![]);
    let err = engine
        .recommend(&happy_state(80.0), "u1", 5, None)
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::EmptyCatalog));
}

#[tokio::test]
async fn exhausted_non_avoided_catalog_returns_empty_success() {
    // Catalog only holds content Angry avoids: short list, not an error
    let (engine, _, _) = build_engine(vec![record("v1", "Headlines", &["news"], 0.9)]);
    let angry = EmotionalState::new(EmotionLabel::Angry, 85.0, -0.7, 0.6, Utc::now());

    let result = engine.recommend(&angry, "u1", 5, None).await.unwrap();
    assert!(result.items.is_empty());
}

#[tokio::test]
async fn low_intensity_reduces_strategy_match_versus_high() {
    let state_low = happy_state(10.0);
    let state_high = happy_state(80.0);

    let (engine_low, _, _) = build_engine(vec![record("v1", "Skit", &["comedy"], 0.8)]);
    let (engine_high, _, _) = build_engine(vec![record("v1", "Skit", &["comedy"], 0.8)]);

    let low = engine_low.recommend(&state_low, "u1", 1, None).await.unwrap();
    let high = engine_high.recommend(&state_high, "u1", 1, None).await.unwrap();

    let strategy_of = |r: &RecommendationResult| {
        r.items[0]
            .explanation
            .iter()
            .find(|c| c.factor == "strategy_match")
            .unwrap()
            .value
    };
    assert!(strategy_of(&low) < strategy_of(&high));
}

#[tokio::test]
async fn explanation_carries_all_six_factors_in_order() {
    let (engine, _, _) = build_engine(vec![record("v1", "Skit", &["comedy"], 0.8)]);
    let result = engine.recommend(&happy_state(50.0), "u1", 1, None).await.unwrap();

    let names: Vec<&str> = result.items[0]
        .explanation
        .iter()
        .map(|c| c.factor.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "base",
            "strategy_match",
            "va_match",
            "user_preference",
            "novelty",
            "recency"
        ]
    );

    let total: f64 = result.items[0].explanation.iter().map(|c| c.value).sum();
    assert!((total - result.items[0].score).abs() < 1e-9);
}

#[tokio::test]
async fn recommended_items_accrue_views() {
    let (engine, index, _) = build_engine(comedy_nature_catalog());
    engine.recommend(&happy_state(60.0), "u1", 4, None).await.unwrap();

    let viewed = index
        .all_candidates()
        .into_iter()
        .filter(|r| r.view_count > 0)
        .count();
    assert_eq!(viewed, 4);
}

#[tokio::test]
async fn repeat_exposure_demotes_through_novelty() {
    // Two identical candidates; recommend count=1 repeatedly and the freshly
    // viewed one should eventually rotate out in favour of the unseen one
    let (engine, _, _) = build_engine(vec![
        record("vA", "Same", &["comedy"], 0.8),
        record("vB", "Same", &["comedy"], 0.8),
    ]);
    let state = happy_state(50.0);

    let first = engine.recommend(&state, "u1", 1, None).await.unwrap();
    assert_eq!(first.items[0].content_id, "vA");

    let second = engine.recommend(&state, "u1", 1, None).await.unwrap();
    assert_eq!(second.items[0].content_id, "vB");
}

#[tokio::test]
async fn wider_diversity_preference_admits_more_of_one_category() {
    let (engine, _, profiles) = build_engine(comedy_nature_catalog());
    let learner = AdaptationLearner::new(Arc::new(ContentIndex::new()), profiles.clone());
    learner.set_diversity_preference("u1", 1.0).await.unwrap();

    let result = engine.recommend(&happy_state(60.0), "u1", 4, None).await.unwrap();
    // cap = ceil(4 x 1.0) = 4: pure score order, all three comedy items admit
    let comedy = result
        .items
        .iter()
        .filter(|i| i.categories.contains(&"comedy".to_string()))
        .count();
    assert_eq!(comedy, 3);
}
