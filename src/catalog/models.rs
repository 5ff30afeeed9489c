//! Data models for the content catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::VaPoint;
use crate::error::{RecommendError, Result};

/// A single catalog entry
///
/// Immutable except `view_count`, which grows as a side effect of being
/// recommended (novelty bookkeeping).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub title: String,
    /// Category tags; never empty for an indexed record
    pub categories: Vec<String>,
    pub duration_secs: u32,
    pub popularity: f64,
    pub quality: f64,
    /// Affect this content tends to evoke
    pub emotional_fit: VaPoint,
    pub upload_time: DateTime<Utc>,
    #[serde(default)]
    pub view_count: u64,
}

impl ContentRecord {
    /// Create a record, clamping the continuous scores into range
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        categories: Vec<String>,
        duration_secs: u32,
        popularity: f64,
        quality: f64,
        emotional_fit: VaPoint,
        upload_time: DateTime<Utc>,
    ) -> Result<Self> {
        let record = Self {
            id: id.into(),
            title: title.into(),
            categories,
            duration_secs,
            popularity: popularity.clamp(0.0, 1.0),
            quality: quality.clamp(0.0, 1.0),
            emotional_fit,
            upload_time,
            view_count: 0,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the indexing invariants
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(RecommendError::InvalidContent(
                "content id cannot be empty".to_string(),
            ));
        }
        if self.categories.is_empty() {
            return Err(RecommendError::InvalidContent(format!(
                "content '{}' has no category tags",
                self.id
            )));
        }
        Ok(())
    }
}
