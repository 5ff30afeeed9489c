//! Integration tests for the adaptation learner
//!
//! Covers the feedback-driven weight updates, success-statistics round
//! trips through the profile view, and the learning loop's effect on
//! subsequent ranking.

use chrono::{Duration, Utc};
use std::sync::Arc;

use emotion_recommender::config::EngineConfig;
use emotion_recommender::prelude::*;

fn record(id: &str, categories: &[&str]) -> ContentRecord {
    ContentRecord::new(
        id,
        format!("title {}", id),
        categories.iter().map(|c| c.to_string()).collect(),
        240,
        0.6,
        0.7,
        VaPoint::new(0.4, -0.2),
        Utc::now() - Duration::days(5),
    )
    .unwrap()
}

struct Fixture {
    index: Arc<ContentIndex>,
    profiles: Arc<ProfileStore>,
    learner: AdaptationLearner,
}

fn fixture(records: Vec<ContentRecord>) -> Fixture {
    let index = Arc::new(ContentIndex::new());
    for r in records {
        index.upsert(r).unwrap();
    }
    let profiles = Arc::new(ProfileStore::default());
    let learner = AdaptationLearner::new(index.clone(), profiles.clone());
    Fixture {
        index,
        profiles,
        learner,
    }
}

#[tokio::test]
async fn fast_rate_like_moves_weight_from_zero_to_0_3() {
    let f = fixture(vec![record("42", &["nature"])]);
    f.learner
        .set_adaptation_rate("user1", AdaptationRate::Fast)
        .await
        .unwrap();

    f.learner
        .on_feedback("user1", "42", FeedbackType::Like)
        .await
        .unwrap();

    let view = f.profiles.view("user1").await;
    let weight = view.category_weights["nature"];
    assert!((weight - 0.3).abs() < 1e-9, "expected ~0.3, got {}", weight);
}

#[tokio::test]
async fn like_feedback_is_monotonically_increasing_up_to_clamp() {
    let f = fixture(vec![record("v1", &["comedy"])]);

    let mut previous = 0.0;
    for _ in 0..30 {
        f.learner
            .on_feedback("user1", "v1", FeedbackType::Like)
            .await
            .unwrap();
        let weight = f.profiles.view("user1").await.category_weights["comedy"];
        assert!(weight >= previous, "weight decreased: {} -> {}", previous, weight);
        previous = weight;
    }
    assert_eq!(previous, 2.0); // upper clamp
}

#[tokio::test]
async fn feedback_round_trips_through_profile_view() {
    let f = fixture(vec![record("v1", &["music", "art"])]);

    let sad = EmotionalState::new(EmotionLabel::Sad, 60.0, -0.5, -0.2, Utc::now());
    f.learner.on_emotion_observed("user1", &sad).await;

    f.learner
        .on_feedback("user1", "v1", FeedbackType::Share)
        .await
        .unwrap();
    f.learner
        .on_feedback("user1", "v1", FeedbackType::Skip)
        .await
        .unwrap();

    let view = f.profiles.view("user1").await;
    let music = &view.emotion_success[&EmotionLabel::Sad]["music"];
    assert_eq!(music.attempts, 2);
    assert_eq!(music.successes, 1); // share positive, skip not

    let art = &view.emotion_success[&EmotionLabel::Sad]["art"];
    assert_eq!(art.attempts, 2);
    assert_eq!(art.successes, 1);
}

#[tokio::test]
async fn skip_feedback_lowers_weight() {
    let f = fixture(vec![record("v1", &["gaming"])]);

    f.learner
        .on_feedback("user1", "v1", FeedbackType::Skip)
        .await
        .unwrap();

    let view = f.profiles.view("user1").await;
    assert!(view.category_weights["gaming"] < 0.0);
}

#[tokio::test]
async fn history_is_bounded_and_evicts_oldest() {
    let records: Vec<ContentRecord> =
        (0..110).map(|i| record(&format!("h{:03}", i), &["music"])).collect();
    let f = fixture(records);

    for i in 0..110 {
        f.learner
            .on_feedback("user1", &format!("h{:03}", i), FeedbackType::Like)
            .await
            .unwrap();
    }

    let view = f.profiles.view("user1").await;
    assert_eq!(view.history_len, 100);
    assert_eq!(view.total_interactions, 110);

    let handle = f.profiles.get("user1").unwrap();
    let profile = handle.read().await;
    assert_eq!(profile.history.front().unwrap().content_id, "h010");
}

#[tokio::test]
async fn observation_shapes_activity_pattern_not_weights() {
    let f = fixture(vec![record("v1", &["comedy"])]);
    let state = EmotionalState::new(EmotionLabel::Relaxed, 45.0, 0.4, -0.3, Utc::now());

    f.learner.on_emotion_observed("user1", &state).await;
    f.learner.on_emotion_observed("user1", &state).await;

    let view = f.profiles.view("user1").await;
    assert!(view.category_weights.is_empty());
    assert_eq!(view.last_emotion, Some(EmotionLabel::Relaxed));
    assert_eq!(view.activity_pattern.iter().sum::<u64>(), 2);
}

#[tokio::test]
async fn settings_are_idempotent() {
    let f = fixture(vec![]);

    f.learner
        .set_adaptation_rate("user1", AdaptationRate::Slow)
        .await
        .unwrap();
    f.learner
        .set_adaptation_rate("user1", AdaptationRate::Slow)
        .await
        .unwrap();
    f.learner.set_diversity_preference("user1", 0.8).await.unwrap();
    f.learner.set_diversity_preference("user1", 0.8).await.unwrap();

    let view = f.profiles.view("user1").await;
    assert_eq!(view.adaptation_rate, AdaptationRate::Slow);
    assert_eq!(view.diversity_preference, 0.8);
}

#[tokio::test]
async fn liked_category_rises_in_subsequent_rankings() {
    // Equal-affinity candidates under Happy (music and pets are both 0.7);
    // without learning the id tie-break puts "aa" first, and repeated likes
    // on the music item must flip the order
    let f = fixture(vec![record("zz", &["music"]), record("aa", &["pets"])]);
    let engine = RecommendationEngine::new(
        Arc::new(StrategyTable::new().unwrap()),
        f.index.clone(),
        f.profiles.clone(),
        EngineConfig::default(),
    );

    // Valence/arousal in the neutral zone so no quadrant boost interferes
    let happy = EmotionalState::new(EmotionLabel::Happy, 60.0, 0.2, 0.2, Utc::now());
    f.learner.on_emotion_observed("user1", &happy).await;
    for _ in 0..5 {
        f.learner
            .on_feedback("user1", "zz", FeedbackType::Like)
            .await
            .unwrap();
    }

    let result = engine.recommend(&happy, "user1", 2, None).await.unwrap();
    assert_eq!(result.items[0].content_id, "zz");

    let preference = result.items[0]
        .explanation
        .iter()
        .find(|c| c.factor == "user_preference")
        .unwrap()
        .value;
    assert!(preference > 0.0);
}
