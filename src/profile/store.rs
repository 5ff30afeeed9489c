//! Profile store keyed by user id
//!
//! Each profile sits behind its own `RwLock`: recommendation reads may run
//! concurrently with each other but serialize against learner mutations,
//! giving the per-user single-writer/multiple-reader discipline.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{ProfileView, UserProfile};

/// Store of user profiles, created lazily per user
pub struct ProfileStore {
    profiles: DashMap<String, Arc<RwLock<UserProfile>>>,
    history_limit: usize,
}

impl ProfileStore {
    pub fn new(history_limit: usize) -> Self {
        Self {
            profiles: DashMap::new(),
            history_limit,
        }
    }

    /// Fetch a user's profile handle, creating a neutral one on first touch
    pub fn get_or_create(&self, user_id: &str) -> Arc<RwLock<UserProfile>> {
        self.profiles
            .entry(user_id.to_string())
            .or_insert_with(|| {
                debug!("Creating profile for user {}", user_id);
                let mut profile = UserProfile::new(user_id);
                profile.history_limit = self.history_limit;
                Arc::new(RwLock::new(profile))
            })
            .clone()
    }

    /// Fetch an existing profile handle
    pub fn get(&self, user_id: &str) -> Option<Arc<RwLock<UserProfile>>> {
        self.profiles.get(user_id).map(|p| p.value().clone())
    }

    /// Read-only projection of a user's profile
    ///
    /// Creates the profile if absent so first-time callers see the neutral
    /// defaults rather than a miss.
    pub async fn view(&self, user_id: &str) -> ProfileView {
        let handle = self.get_or_create(user_id);
        let profile = handle.read().await;
        ProfileView::from(&*profile)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(super::models::DEFAULT_HISTORY_LIMIT)
    }
}
