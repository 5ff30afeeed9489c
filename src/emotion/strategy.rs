//! Static emotion-to-content strategy knowledge base
//!
//! Maps each emotion label to preferred/avoided content categories, an
//! intensity-tier policy, and a target point in valence/arousal space.
//! Loaded once at startup and validated exhaustively; never mutated at
//! runtime.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use super::models::{EmotionLabel, IntensityTier, VaPoint, VaQuadrant};
use crate::error::{RecommendError, Result};

/// Duration (seconds) at or under which content counts as "short"
pub const SHORT_CONTENT_SECS: u32 = 300;

/// Per-tier scoring modifiers
///
/// High intensity raises the strategy-match weight and biases toward short
/// content; low intensity lowers the match weight and widens diversity caps
/// so weak signals do not dominate ranking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierPolicy {
    /// Multiplier on the strategy-match score term
    pub strategy_factor: f64,
    /// Penalize content longer than `SHORT_CONTENT_SECS`
    pub prefer_short: bool,
    /// Added to the user's diversity preference before cap computation
    pub diversity_boost: f64,
}

/// Intensity-tier thresholds and policies for one strategy entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityTiers {
    /// Below this intensity the reading is Low tier
    pub low_max: f64,
    /// Above this intensity the reading is High tier
    pub high_min: f64,
    pub low: TierPolicy,
    pub mid: TierPolicy,
    pub high: TierPolicy,
}

impl Default for IntensityTiers {
    fn default() -> Self {
        Self {
            low_max: 30.0,
            high_min: 70.0,
            low: TierPolicy {
                strategy_factor: 0.8,
                prefer_short: false,
                diversity_boost: 0.2,
            },
            mid: TierPolicy {
                strategy_factor: 1.0,
                prefer_short: false,
                diversity_boost: 0.0,
            },
            high: TierPolicy {
                strategy_factor: 1.2,
                prefer_short: true,
                diversity_boost: 0.0,
            },
        }
    }
}

impl IntensityTiers {
    /// Classify an intensity reading
    pub fn tier_of(&self, intensity: f64) -> IntensityTier {
        if intensity > self.high_min {
            IntensityTier::High
        } else if intensity < self.low_max {
            IntensityTier::Low
        } else {
            IntensityTier::Mid
        }
    }

    /// Policy for a tier
    pub fn policy(&self, tier: IntensityTier) -> &TierPolicy {
        match tier {
            IntensityTier::Low => &self.low,
            IntensityTier::Mid => &self.mid,
            IntensityTier::High => &self.high,
        }
    }
}

/// Strategy for one emotion label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyEntry {
    /// Ordered category -> affinity weight
    pub preferred: IndexMap<String, f64>,
    /// Categories hard-excluded from candidates
    pub avoided: HashSet<String>,
    /// Desired content affect for this strategy
    pub target: VaPoint,
    /// Below this intensity the low-tier policy applies regardless of tier
    pub min_intensity_threshold: f64,
    /// Tier thresholds and policies
    pub tiers: IntensityTiers,
}

impl StrategyEntry {
    fn new(
        preferred: &[(&str, f64)],
        avoided: &[&str],
        target: VaPoint,
    ) -> Self {
        let mut map = IndexMap::new();
        for (cat, weight) in preferred {
            map.insert(cat.to_string(), *weight);
        }
        Self {
            preferred: map,
            avoided: avoided.iter().map(|c| c.to_string()).collect(),
            target,
            min_intensity_threshold: 40.0,
            tiers: IntensityTiers::default(),
        }
    }

    /// Highest affinity among the given categories, 0 when none is preferred
    pub fn max_affinity(&self, categories: &[String]) -> f64 {
        categories
            .iter()
            .filter_map(|c| self.preferred.get(c))
            .fold(0.0, |acc, w| acc.max(*w))
    }

    /// Whether any of the given categories is avoided
    pub fn avoids_any(&self, categories: &[String]) -> bool {
        categories.iter().any(|c| self.avoided.contains(c))
    }
}

/// Valence/arousal quadrant boost: categories amplified for a quadrant and
/// the factor applied to the V-A match term
#[derive(Debug, Clone)]
pub struct QuadrantBoost {
    pub categories: HashSet<String>,
    pub factor: f64,
}

impl QuadrantBoost {
    fn new(categories: &[&str], factor: f64) -> Self {
        Self {
            categories: categories.iter().map(|c| c.to_string()).collect(),
            factor,
        }
    }

    /// Boost factor for content carrying the given categories
    pub fn factor_for(&self, categories: &[String]) -> f64 {
        if categories.iter().any(|c| self.categories.contains(c)) {
            self.factor
        } else {
            1.0
        }
    }
}

/// Static lookup table over the closed emotion-label enumeration
pub struct StrategyTable {
    entries: IndexMap<EmotionLabel, StrategyEntry>,
}

impl StrategyTable {
    /// Build the built-in table and validate it
    pub fn new() -> Result<Self> {
        let mut entries = IndexMap::new();

        entries.insert(
            EmotionLabel::Happy,
            StrategyEntry::new(
                &[
                    ("comedy", 0.7),
                    ("music", 0.7),
                    ("pets", 0.7),
                    ("lifestyle", 0.7),
                    ("gaming", 0.7),
                    ("sports", 0.3),
                    ("travel", 0.3),
                    ("art", 0.3),
                ],
                &[],
                VaPoint::new(0.7, 0.5),
            ),
        );

        entries.insert(
            EmotionLabel::Sad,
            StrategyEntry::new(
                &[
                    ("healing", 0.6),
                    ("pets", 0.6),
                    ("music", 0.6),
                    ("art", 0.6),
                    ("food", 0.4),
                    ("travel", 0.4),
                    ("lifestyle", 0.4),
                ],
                &["news"],
                VaPoint::new(0.5, -0.3),
            ),
        );

        entries.insert(
            EmotionLabel::Angry,
            StrategyEntry::new(
                &[
                    ("relaxing", 0.8),
                    ("healing", 0.8),
                    ("travel", 0.8),
                    ("music", 0.8),
                    ("sports", 0.2),
                ],
                &["news", "gaming"],
                VaPoint::new(0.3, -0.6),
            ),
        );

        entries.insert(
            EmotionLabel::Tired,
            StrategyEntry::new(
                &[
                    ("relaxing", 0.6),
                    ("music", 0.6),
                    ("healing", 0.6),
                    ("comedy", 0.4),
                    ("pets", 0.4),
                    ("food", 0.4),
                ],
                &["educational", "news"],
                VaPoint::new(0.4, -0.5),
            ),
        );

        entries.insert(
            EmotionLabel::Relaxed,
            StrategyEntry::new(
                &[
                    ("relaxing", 0.6),
                    ("travel", 0.6),
                    ("art", 0.6),
                    ("music", 0.6),
                    ("lifestyle", 0.4),
                    ("food", 0.4),
                    ("pets", 0.4),
                ],
                &[],
                VaPoint::new(0.5, -0.4),
            ),
        );

        entries.insert(
            EmotionLabel::Surprised,
            StrategyEntry::new(
                &[
                    ("technology", 0.5),
                    ("art", 0.5),
                    ("educational", 0.5),
                    ("comedy", 0.5),
                    ("gaming", 0.5),
                    ("music", 0.5),
                ],
                &[],
                VaPoint::new(0.6, 0.6),
            ),
        );

        entries.insert(
            EmotionLabel::Disgust,
            StrategyEntry::new(
                &[
                    ("healing", 0.6),
                    ("pets", 0.6),
                    ("art", 0.6),
                    ("music", 0.6),
                    ("travel", 0.4),
                    ("fashion", 0.4),
                    ("food", 0.4),
                ],
                &["news"],
                VaPoint::new(0.6, -0.1),
            ),
        );

        entries.insert(
            EmotionLabel::Pleased,
            StrategyEntry::new(
                &[
                    ("art", 0.5),
                    ("travel", 0.5),
                    ("music", 0.5),
                    ("lifestyle", 0.5),
                    ("food", 0.5),
                    ("pets", 0.5),
                ],
                &[],
                VaPoint::new(0.6, -0.2),
            ),
        );

        entries.insert(
            EmotionLabel::Neutral,
            StrategyEntry::new(
                &[
                    ("comedy", 0.6),
                    ("educational", 0.6),
                    ("lifestyle", 0.6),
                    ("music", 0.6),
                    ("technology", 0.4),
                    ("art", 0.4),
                    ("travel", 0.4),
                ],
                &[],
                VaPoint::new(0.3, 0.1),
            ),
        );

        let table = Self { entries };
        table.validate()?;
        debug!("Strategy table loaded: {} entries", table.entries.len());
        Ok(table)
    }

    /// Validate the table at load time so lookup can never fail
    fn validate(&self) -> Result<()> {
        for label in EmotionLabel::ALL {
            let entry = self.entries.get(&label).ok_or_else(|| {
                RecommendError::Configuration(format!(
                    "Strategy table missing entry for {}",
                    label
                ))
            })?;

            if entry.preferred.is_empty() {
                return Err(RecommendError::Configuration(format!(
                    "Strategy entry for {} has no preferred categories",
                    label
                )));
            }

            for category in entry.preferred.keys() {
                if entry.avoided.contains(category) {
                    return Err(RecommendError::Configuration(format!(
                        "Strategy entry for {} both prefers and avoids '{}'",
                        label, category
                    )));
                }
            }

            if entry.min_intensity_threshold < 0.0 || entry.min_intensity_threshold > 100.0 {
                return Err(RecommendError::Configuration(format!(
                    "Strategy entry for {} has min intensity threshold out of range",
                    label
                )));
            }
        }
        Ok(())
    }

    /// Look up the strategy for a label
    ///
    /// Total over the closed enumeration; unknown labels are rejected at the
    /// parse boundary before ever reaching here.
    pub fn lookup(&self, label: EmotionLabel) -> &StrategyEntry {
        &self.entries[&label]
    }

    /// Boost applied to the V-A match term for a quadrant
    pub fn quadrant_boost(&self, quadrant: VaQuadrant) -> QuadrantBoost {
        match quadrant {
            VaQuadrant::HighValenceHighArousal => {
                QuadrantBoost::new(&["music", "sports", "comedy"], 1.3)
            }
            VaQuadrant::HighValenceLowArousal => {
                QuadrantBoost::new(&["relaxing", "art", "travel"], 1.2)
            }
            VaQuadrant::LowValenceHighArousal => {
                QuadrantBoost::new(&["relaxing", "healing"], 1.5)
            }
            VaQuadrant::LowValenceLowArousal => {
                QuadrantBoost::new(&["healing", "pets", "music"], 1.4)
            }
            VaQuadrant::NeutralZone => QuadrantBoost::new(&[], 1.0),
        }
    }
}
