//! User profile models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::str::FromStr;

use crate::emotion::EmotionLabel;
use crate::error::RecommendError;

/// Default bound on per-user interaction history
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Lower and upper clamp for learned category weights
pub const WEIGHT_MIN: f64 = -1.0;
pub const WEIGHT_MAX: f64 = 2.0;

/// How fast feedback reshapes category weights
///
/// Fast suits short histories where convergence beats stability; slow
/// protects long-established signal from outlier feedback. Tier is
/// caller-selected, never learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptationRate {
    Fast,
    Medium,
    Slow,
}

impl AdaptationRate {
    pub fn value(&self) -> f64 {
        match self {
            AdaptationRate::Fast => 0.3,
            AdaptationRate::Medium => 0.15,
            AdaptationRate::Slow => 0.05,
        }
    }
}

impl FromStr for AdaptationRate {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(AdaptationRate::Fast),
            "medium" => Ok(AdaptationRate::Medium),
            "slow" => Ok(AdaptationRate::Slow),
            other => Err(RecommendError::InvalidProfileConfig(format!(
                "unknown adaptation rate tier '{}'",
                other
            ))),
        }
    }
}

/// End-user reaction to a recommended item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Like,
    Skip,
    Share,
}

impl FeedbackType {
    /// Signed learning polarity of the feedback
    pub fn polarity(&self) -> f64 {
        match self {
            FeedbackType::Like => 1.0,
            FeedbackType::Share => 0.7,
            FeedbackType::Skip => -0.5,
        }
    }
}

/// Attempt/success counters for one (emotion, category) pair
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SuccessStats {
    pub attempts: u64,
    pub successes: u64,
}

impl SuccessStats {
    /// Success ratio with the zero-attempt guard
    pub fn ratio(&self) -> f64 {
        self.successes as f64 / (self.attempts.max(1)) as f64
    }
}

/// One past (recommendation, feedback) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub content_id: String,
    pub label: EmotionLabel,
    pub feedback: FeedbackType,
    pub polarity: f64,
    pub timestamp: DateTime<Utc>,
}

/// Learned preference state for one user
///
/// Created lazily on first interaction; mutated only by the adaptation
/// learner; never deleted, only pruned by history eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    /// Learned category -> weight, default 0, clamped to [-1, 2]
    pub category_weights: HashMap<String, f64>,
    /// Per-emotion per-category success statistics
    pub emotion_success: HashMap<EmotionLabel, HashMap<String, SuccessStats>>,
    /// Appetite for varied batches, in [0, 1]
    pub diversity_preference: f64,
    /// Interactions observed per hour of day
    pub activity_pattern: [u64; 24],
    /// Bounded history, oldest evicted on overflow
    pub history: VecDeque<InteractionRecord>,
    pub history_limit: usize,
    pub adaptation_rate: AdaptationRate,
    /// Most recent passively-observed emotion
    pub last_emotion: Option<EmotionLabel>,
    pub total_interactions: u64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile with neutral defaults
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            category_weights: HashMap::new(),
            emotion_success: HashMap::new(),
            diversity_preference: 0.5,
            activity_pattern: [0; 24],
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            adaptation_rate: AdaptationRate::Medium,
            last_emotion: None,
            total_interactions: 0,
            created_at: now,
            last_updated: now,
        }
    }

    /// Weight for a category, 0 when unseen
    pub fn weight(&self, category: &str) -> f64 {
        self.category_weights.get(category).copied().unwrap_or(0.0)
    }

    /// Success stats for an (emotion, category) pair, zeroed when unseen
    pub fn success_stats(&self, label: EmotionLabel, category: &str) -> SuccessStats {
        self.emotion_success
            .get(&label)
            .and_then(|per_cat| per_cat.get(category))
            .copied()
            .unwrap_or_default()
    }

    /// Emotion used for feedback attribution
    pub fn last_known_emotion(&self) -> EmotionLabel {
        self.last_emotion.unwrap_or(EmotionLabel::Neutral)
    }
}

/// Read-only projection of a profile for callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub user_id: String,
    pub category_weights: HashMap<String, f64>,
    pub emotion_success: HashMap<EmotionLabel, HashMap<String, SuccessStats>>,
    pub diversity_preference: f64,
    pub adaptation_rate: AdaptationRate,
    pub activity_pattern: Vec<u64>,
    pub last_emotion: Option<EmotionLabel>,
    pub history_len: usize,
    pub total_interactions: u64,
    pub last_updated: DateTime<Utc>,
}

impl From<&UserProfile> for ProfileView {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.user_id.clone(),
            category_weights: profile.category_weights.clone(),
            emotion_success: profile.emotion_success.clone(),
            diversity_preference: profile.diversity_preference,
            adaptation_rate: profile.adaptation_rate,
            activity_pattern: profile.activity_pattern.to_vec(),
            last_emotion: profile.last_emotion,
            history_len: profile.history.len(),
            total_interactions: profile.total_interactions,
            last_updated: profile.last_updated,
        }
    }
}
