//! Emotion-adaptive short-video recommendation engine
//!
//! Ranks a content catalog for a single user from a detected emotional
//! state (label, intensity, valence/arousal) and the user's accumulated
//! preference history:
//!
//! - a static strategy table maps each emotion label to preferred/avoided
//!   content categories, an intensity-tier policy, and a valence/arousal
//!   target;
//! - the scoring engine ranks every eligible candidate across six weighted
//!   factors and applies diversity-constrained selection;
//! - the adaptation learner consumes feedback events and emotion
//!   observations, reshaping per-user category weights online.
//!
//! Emotional states arrive pre-classified from an external acquisition
//! collaborator; the engine itself is pure in-memory computation.

pub mod api;
pub mod catalog;
pub mod config;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod profile;

/// Commonly used types
pub mod prelude {
    pub use crate::catalog::{ContentIndex, ContentRecord};
    pub use crate::config::Config;
    pub use crate::emotion::{EmotionLabel, EmotionalState, StrategyTable, VaPoint};
    pub use crate::engine::{RecommendationEngine, RecommendationResult};
    pub use crate::error::{RecommendError, Result};
    pub use crate::profile::{
        AdaptationLearner, AdaptationRate, FeedbackType, ProfileStore, ProfileView,
    };
}
