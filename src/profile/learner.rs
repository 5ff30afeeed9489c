//! Online user-profile learner
//!
//! Consumes feedback events and passive emotion observations, mutating the
//! relevant profile incrementally. Category weights change only from
//! feedback, never from observation alone.

use chrono::{Timelike, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use super::models::{
    AdaptationRate, FeedbackType, InteractionRecord, WEIGHT_MAX, WEIGHT_MIN,
};
use super::store::ProfileStore;
use crate::catalog::ContentIndex;
use crate::emotion::EmotionalState;
use crate::error::{RecommendError, Result};

/// Sole mutator of user profiles
pub struct AdaptationLearner {
    index: Arc<ContentIndex>,
    profiles: Arc<ProfileStore>,
}

impl AdaptationLearner {
    pub fn new(index: Arc<ContentIndex>, profiles: Arc<ProfileStore>) -> Self {
        Self { index, profiles }
    }

    /// Apply one feedback event to the user's profile
    ///
    /// For each category of the content: weight moves by `rate x polarity`,
    /// clamped to [-1, 2]; the (last known emotion, category) attempt
    /// counters are bumped, successes only on positive polarity. The event
    /// is appended to the bounded history.
    pub async fn on_feedback(
        &self,
        user_id: &str,
        content_id: &str,
        feedback: FeedbackType,
    ) -> Result<()> {
        let record = self
            .index
            .get(content_id)
            .ok_or_else(|| RecommendError::UnknownContent(content_id.to_string()))?;

        let polarity = feedback.polarity();
        let handle = self.profiles.get_or_create(user_id);
        let mut profile = handle.write().await;

        let rate = profile.adaptation_rate.value();
        let label = profile.last_known_emotion();

        for category in &record.categories {
            let weight = profile.category_weights.entry(category.clone()).or_insert(0.0);
            *weight = (*weight + rate * polarity).clamp(WEIGHT_MIN, WEIGHT_MAX);

            let stats = profile
                .emotion_success
                .entry(label)
                .or_default()
                .entry(category.clone())
                .or_default();
            stats.attempts += 1;
            if polarity > 0.0 {
                stats.successes += 1;
            }
        }

        profile.history.push_back(InteractionRecord {
            content_id: content_id.to_string(),
            label,
            feedback,
            polarity,
            timestamp: Utc::now(),
        });
        while profile.history.len() > profile.history_limit {
            profile.history.pop_front();
        }

        profile.total_interactions += 1;
        profile.last_updated = Utc::now();

        debug!(
            "Feedback applied: user={}, content={}, feedback={:?}, polarity={}",
            user_id, content_id, feedback, polarity
        );
        Ok(())
    }

    /// Record a passively-observed emotional state
    ///
    /// Updates the hourly activity pattern and the last-known emotion used
    /// for feedback attribution. Does not touch category weights.
    pub async fn on_emotion_observed(&self, user_id: &str, state: &EmotionalState) {
        let handle = self.profiles.get_or_create(user_id);
        let mut profile = handle.write().await;

        let hour = state.timestamp.hour() as usize;
        profile.activity_pattern[hour] += 1;
        profile.last_emotion = Some(state.label);
        profile.last_updated = Utc::now();

        debug!(
            "Emotion observed: user={}, label={}, intensity={:.1}",
            user_id, state.label, state.intensity
        );
    }

    /// Select the user's adaptation tier; idempotent
    pub async fn set_adaptation_rate(&self, user_id: &str, tier: AdaptationRate) -> Result<()> {
        let handle = self.profiles.get_or_create(user_id);
        let mut profile = handle.write().await;
        profile.adaptation_rate = tier;
        profile.last_updated = Utc::now();
        info!("Adaptation rate for user {} set to {:?}", user_id, tier);
        Ok(())
    }

    /// Set the user's diversity preference; idempotent
    pub async fn set_diversity_preference(&self, user_id: &str, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) || value.is_nan() {
            return Err(RecommendError::InvalidProfileConfig(format!(
                "diversity preference {} outside [0, 1]",
                value
            )));
        }

        let handle = self.profiles.get_or_create(user_id);
        let mut profile = handle.write().await;
        profile.diversity_preference = value;
        profile.last_updated = Utc::now();
        info!("Diversity preference for user {} set to {}", user_id, value);
        Ok(())
    }
}
