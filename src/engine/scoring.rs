//! Multi-factor candidate scoring
//!
//! Six weighted terms summed per candidate. The weights deliberately do not
//! sum to 1: the total is a ranking score, not a probability, and only the
//! ordering it induces over candidates matters.

use chrono::{DateTime, Utc};

use super::models::{ScoreContribution, ScoredCandidate};
use crate::catalog::ContentRecord;
use crate::emotion::strategy::SHORT_CONTENT_SECS;
use crate::emotion::{EmotionLabel, QuadrantBoost, StrategyEntry, TierPolicy};
use crate::profile::UserProfile;

pub const BASE_WEIGHT: f64 = 0.3;
pub const STRATEGY_WEIGHT: f64 = 0.4;
pub const VA_WEIGHT: f64 = 0.4;
pub const PREFERENCE_WEIGHT: f64 = 0.3;
pub const NOVELTY_WEIGHT: f64 = 0.2;
pub const RECENCY_WEIGHT: f64 = 0.1;

/// Penalty on the strategy term for long content when the tier prefers short
const LONG_CONTENT_PENALTY: f64 = 0.8;

/// Factor names, in explanation order
pub const FACTOR_NAMES: [&str; 6] = [
    "base",
    "strategy_match",
    "va_match",
    "user_preference",
    "novelty",
    "recency",
];

/// Everything fixed across one scoring pass
pub struct ScoringContext<'a> {
    pub entry: &'a StrategyEntry,
    pub policy: &'a TierPolicy,
    pub quadrant_boost: &'a QuadrantBoost,
    pub profile: &'a UserProfile,
    /// Emotion the success statistics are keyed under
    pub label: EmotionLabel,
    pub now: DateTime<Utc>,
    pub recency_decay_secs: f64,
}

/// Score one candidate, producing the six named contributions
pub fn score_candidate(record: ContentRecord, ctx: &ScoringContext<'_>) -> ScoredCandidate {
    let base = BASE_WEIGHT * (record.popularity + record.quality) / 2.0;

    let mut strategy = STRATEGY_WEIGHT
        * ctx.entry.max_affinity(&record.categories)
        * ctx.policy.strategy_factor;
    if ctx.policy.prefer_short && record.duration_secs > SHORT_CONTENT_SECS {
        strategy *= LONG_CONTENT_PENALTY;
    }

    let distance = record.emotional_fit.normalized_distance(&ctx.entry.target);
    let va_match =
        VA_WEIGHT * (1.0 - distance) * ctx.quadrant_boost.factor_for(&record.categories);

    let preference = preference_term(&record, ctx);

    let novelty = NOVELTY_WEIGHT / (1.0 + record.view_count as f64);

    let age_secs = (ctx.now - record.upload_time).num_seconds().max(0) as f64;
    let recency = RECENCY_WEIGHT * (-age_secs / ctx.recency_decay_secs).exp();

    let contributions = [base, strategy, va_match, preference, novelty, recency];
    let explanation = FACTOR_NAMES
        .iter()
        .zip(contributions)
        .map(|(name, value)| ScoreContribution::new(name, value))
        .collect();

    ScoredCandidate {
        record,
        score: contributions.iter().sum(),
        explanation,
    }
}

/// Learned-preference term: weight of the best-matching category, scaled by
/// the emotion-specific success ratio
fn preference_term(record: &ContentRecord, ctx: &ScoringContext<'_>) -> f64 {
    let best = record
        .categories
        .iter()
        .max_by(|a, b| ctx.profile.weight(a).total_cmp(&ctx.profile.weight(b)));

    match best {
        Some(category) => {
            let weight = ctx.profile.weight(category);
            let ratio = ctx.profile.success_stats(ctx.label, category).ratio();
            PREFERENCE_WEIGHT * weight * ratio
        }
        None => 0.0,
    }
}
