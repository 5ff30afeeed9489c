//! Recommendation orchestration
//!
//! Ties the strategy table, content index, and user profile together:
//! candidate filtering, scoring, deterministic ordering, diversity-capped
//! selection, and view bookkeeping.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use super::models::{RecommendationItem, RecommendationResult};
use super::ranking::{diversity_select, Selection};
use super::scoring::{score_candidate, ScoringContext};
use crate::catalog::ContentIndex;
use crate::config::EngineConfig;
use crate::emotion::{EmotionalState, IntensityTier, StrategyTable};
use crate::error::{RecommendError, Result};
use crate::metrics::METRICS;
use crate::profile::ProfileStore;

/// Scoring and ranking engine
///
/// Stateless per call apart from the two shared resources: content view
/// counters and user profiles. Calls for different users run fully in
/// parallel.
pub struct RecommendationEngine {
    strategy: Arc<StrategyTable>,
    index: Arc<ContentIndex>,
    profiles: Arc<ProfileStore>,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(
        strategy: Arc<StrategyTable>,
        index: Arc<ContentIndex>,
        profiles: Arc<ProfileStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            strategy,
            index,
            profiles,
            config,
        }
    }

    /// Produce an ordered, explained recommendation batch
    ///
    /// Never rejects on low intensity: readings under the threshold apply
    /// the low-tier policy and defer to diversity instead. Short batches
    /// are a successful outcome; only a fully empty catalog is an error.
    pub async fn recommend(
        &self,
        state: &EmotionalState,
        user_id: &str,
        count: usize,
        min_intensity_override: Option<f64>,
    ) -> Result<RecommendationResult> {
        if count == 0 {
            return Err(RecommendError::Configuration(
                "recommendation count must be at least 1".to_string(),
            ));
        }
        if self.index.is_empty() {
            METRICS.record_empty_catalog();
            return Err(RecommendError::EmptyCatalog);
        }

        let entry = self.strategy.lookup(state.label);

        let threshold = min_intensity_override.unwrap_or(entry.min_intensity_threshold);
        let tier = if state.intensity < threshold {
            IntensityTier::Low
        } else {
            entry.tiers.tier_of(state.intensity)
        };
        let policy = entry.tiers.policy(tier);
        let quadrant_boost = self.strategy.quadrant_boost(state.quadrant());

        debug!(
            "Recommending for user={}: label={}, intensity={:.1}, tier={:?}, quadrant={:?}",
            user_id,
            state.label,
            state.intensity,
            tier,
            state.quadrant()
        );

        // Snapshot the profile so scoring runs without holding the lock
        let profile = {
            let handle = self.profiles.get_or_create(user_id);
            let guard = handle.read().await;
            guard.clone()
        };

        let now = Utc::now();
        let recency_decay_secs = self.config.recency_decay_days * 86_400.0;
        let ctx = ScoringContext {
            entry,
            policy,
            quadrant_boost: &quadrant_boost,
            profile: &profile,
            label: state.label,
            now,
            recency_decay_secs,
        };

        // Hard exclusion of avoided categories, then score the rest
        let mut scored: Vec<_> = self
            .index
            .all_candidates()
            .into_iter()
            .filter(|record| !entry.avoids_any(&record.categories))
            .map(|record| score_candidate(record, &ctx))
            .collect();

        // Deterministic ordering: score descending, ties by id
        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.record.id.cmp(&b.record.id))
        });

        let effective_diversity =
            (profile.diversity_preference + policy.diversity_boost).clamp(0.0, 1.0);
        let Selection {
            selected,
            relaxation_rounds,
        } = diversity_select(scored, count, effective_diversity);

        if relaxation_rounds > 0 {
            METRICS.record_diversity_relaxation(relaxation_rounds);
        }

        for candidate in &selected {
            self.index.record_view(&candidate.record.id)?;
        }

        info!(
            "Recommended {}/{} items for user={} (label={}, relaxations={})",
            selected.len(),
            count,
            user_id,
            state.label,
            relaxation_rounds
        );

        Ok(RecommendationResult {
            items: selected.into_iter().map(RecommendationItem::from).collect(),
            relaxation_rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentRecord;
    use crate::emotion::{EmotionLabel, VaPoint};

    fn engine_with(records: Vec<ContentRecord>) -> RecommendationEngine {
        let index = Arc::new(ContentIndex::new());
        for record in records {
            index.upsert(record).unwrap();
        }
        RecommendationEngine::new(
            Arc::new(StrategyTable::new().unwrap()),
            index,
            Arc::new(ProfileStore::default()),
            EngineConfig::default(),
        )
    }

    fn record(id: &str, categories: &[&str], popularity: f64) -> ContentRecord {
        ContentRecord::new(
            id,
            format!("title {}", id),
            categories.iter().map(|c| c.to_string()).collect(),
            180,
            popularity,
            0.8,
            VaPoint::new(0.5, 0.2),
            Utc::now(),
        )
        .unwrap()
    }

    fn happy(intensity: f64) -> EmotionalState {
        EmotionalState::new(EmotionLabel::Happy, intensity, 0.6, 0.4, Utc::now())
    }

    #[tokio::test]
    async fn test_empty_catalog_fails() {
        let engine = engine_with(vec![]);
        let err = engine
            .recommend(&happy(80.0), "user1", 5, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RecommendError::EmptyCatalog));
    }

    #[tokio::test]
    async fn test_zero_count_rejected() {
        let engine = engine_with(vec![record("v1", &["comedy"], 0.8)]);
        let err = engine
            .recommend(&happy(80.0), "user1", 0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RecommendError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_avoided_categories_hard_excluded() {
        let engine = engine_with(vec![
            record("v1", &["news"], 0.99),
            record("v2", &["gaming"], 0.99),
            record("v3", &["relaxing"], 0.1),
        ]);
        let angry = EmotionalState::new(EmotionLabel::Angry, 85.0, -0.7, 0.6, Utc::now());

        let result = engine.recommend(&angry, "user1", 5, None).await.unwrap();
        let ids: Vec<&str> = result.items.iter().map(|i| i.content_id.as_str()).collect();
        assert_eq!(ids, vec!["v3"]);
    }

    #[tokio::test]
    async fn test_partial_batch_is_success_not_error() {
        let engine = engine_with(vec![record("v1", &["comedy"], 0.8)]);
        let result = engine.recommend(&happy(80.0), "user1", 5, None).await.unwrap();
        assert_eq!(result.items.len(), 1);
    }

    #[tokio::test]
    async fn test_recommend_is_deterministic() {
        // Identical popularity forces the id tie-break
        let engine = engine_with(vec![
            record("v3", &["comedy"], 0.8),
            record("v1", &["comedy"], 0.8),
            record("v2", &["music"], 0.8),
        ]);

        let state = happy(50.0);
        let first = engine.recommend(&state, "user1", 3, None).await.unwrap();

        // Repeat against an identical fresh engine: view counts moved on the
        // first one, so rebuild for an unchanged-catalog comparison
        let engine2 = engine_with(vec![
            record("v3", &["comedy"], 0.8),
            record("v1", &["comedy"], 0.8),
            record("v2", &["music"], 0.8),
        ]);
        let second = engine2.recommend(&state, "user1", 3, None).await.unwrap();

        let ids1: Vec<&str> = first.items.iter().map(|i| i.content_id.as_str()).collect();
        let ids2: Vec<&str> = second.items.iter().map(|i| i.content_id.as_str()).collect();
        assert_eq!(ids1, ids2);
    }

    #[tokio::test]
    async fn test_recommend_increments_view_counts() {
        let engine = engine_with(vec![record("v1", &["comedy"], 0.8)]);
        engine.recommend(&happy(80.0), "user1", 1, None).await.unwrap();
        assert_eq!(engine.index.get("v1").unwrap().view_count, 1);
    }

    #[tokio::test]
    async fn test_low_intensity_reduces_strategy_contribution() {
        let engine = engine_with(vec![record("v1", &["comedy"], 0.8)]);

        let low = engine
            .recommend(&happy(10.0), "user1", 1, None)
            .await
            .unwrap();
        let high = engine
            .recommend(&happy(80.0), "user1", 1, None)
            .await
            .unwrap();

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
}
