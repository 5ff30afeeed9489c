//! Emotion models and the emotion-to-content strategy knowledge base
//!
//! Emotional states arrive already classified (label + intensity + a
//! valence/arousal estimate). This module owns their representation and the
//! static strategy table that maps each label to a content policy.

pub mod models;
pub mod strategy;

pub use models::{EmotionLabel, EmotionalState, IntensityTier, VaPoint, VaQuadrant};
pub use strategy::{IntensityTiers, QuadrantBoost, StrategyEntry, StrategyTable, TierPolicy};
