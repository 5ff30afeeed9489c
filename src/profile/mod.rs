//! User profiles and the adaptation learner
//!
//! One profile per user: learned category weights, per-emotion success
//! statistics, diversity preference, hourly activity pattern, and a bounded
//! interaction history. The learner is the sole mutator; the scoring engine
//! only ever reads.

pub mod learner;
pub mod models;
pub mod store;

pub use learner::AdaptationLearner;
pub use models::{
    AdaptationRate, FeedbackType, InteractionRecord, ProfileView, SuccessStats, UserProfile,
};
pub use store::ProfileStore;
