//! Scoring and ranking engine
//!
//! Given an emotional state and a user profile, scores every eligible
//! catalog candidate across six weighted factors, applies diversity
//! constraints, and returns an ordered, explained recommendation batch.

pub mod models;
pub mod ranking;
pub mod recommender;
pub mod scoring;

pub use models::{RecommendationItem, RecommendationResult, ScoreContribution, ScoredCandidate};
pub use recommender::RecommendationEngine;
