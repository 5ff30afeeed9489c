//! Request/response models for the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ContentRecord;
use crate::emotion::{EmotionalState, VaPoint};
use crate::engine::RecommendationItem;
use crate::error::Result;
use crate::profile::FeedbackType;

/// API error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Emotional reading as received on the wire
///
/// The label stays a string here so unknown labels surface as the typed
/// `UNKNOWN_EMOTION_LABEL` error instead of a generic decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionDto {
    pub label: String,
    pub intensity: f64,
    pub valence: f64,
    pub arousal: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl EmotionDto {
    /// Parse into a validated state, clamping continuous scores
    pub fn into_state(self) -> Result<EmotionalState> {
        let label = self.label.parse()?;
        Ok(EmotionalState::new(
            label,
            self.intensity,
            self.valence,
            self.arousal,
            self.timestamp.unwrap_or_else(Utc::now),
        ))
    }
}

/// Recommendation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub user_id: String,
    pub emotion: EmotionDto,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub min_intensity_threshold: Option<f64>,
}

/// Recommendation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub request_id: Uuid,
    pub user_id: String,
    pub items: Vec<RecommendationItem>,
    pub relaxation_rounds: usize,
    pub generated_at: DateTime<Utc>,
}

/// Feedback event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub user_id: String,
    pub content_id: String,
    pub feedback: FeedbackType,
}

/// Passive emotion observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionObserveRequest {
    pub user_id: String,
    pub emotion: EmotionDto,
}

/// Profile settings update; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSettingsRequest {
    #[serde(default)]
    pub adaptation_rate: Option<String>,
    #[serde(default)]
    pub diversity_preference: Option<f64>,
}

/// Administrative content upsert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUpsertRequest {
    pub id: String,
    pub title: String,
    pub categories: Vec<String>,
    pub duration_secs: u32,
    pub popularity: f64,
    pub quality: f64,
    pub valence: f64,
    pub arousal: f64,
    #[serde(default)]
    pub upload_time: Option<DateTime<Utc>>,
}

impl ContentUpsertRequest {
    pub fn into_record(self) -> Result<ContentRecord> {
        ContentRecord::new(
            self.id,
            self.title,
            self.categories,
            self.duration_secs,
            self.popularity,
            self.quality,
            VaPoint::new(self.valence, self.arousal),
            self.upload_time.unwrap_or_else(Utc::now),
        )
    }
}

/// Generic acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub status: String,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Health probe response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub catalog_size: usize,
    pub profile_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_dto_parses_known_label() {
        let dto = EmotionDto {
            label: "Happy".to_string(),
            intensity: 80.0,
            valence: 0.6,
            arousal: 0.4,
            timestamp: None,
        };
        let state = dto.into_state().unwrap();
        assert_eq!(state.intensity, 80.0);
    }

    #[test]
    fn test_emotion_dto_rejects_unknown_label() {
        let dto = EmotionDto {
            label: "Melancholy".to_string(),
            intensity: 50.0,
            valence: 0.0,
            arousal: 0.0,
            timestamp: None,
        };
        assert!(dto.into_state().is_err());
    }

    #[test]
    fn test_content_upsert_validation() {
        let request = ContentUpsertRequest {
            id: "v100".to_string(),
            title: "New upload".to_string(),
            categories: vec![],
            duration_secs: 120,
            popularity: 0.5,
            quality: 0.5,
            valence: 0.2,
            arousal: 0.1,
            upload_time: None,
        };
        assert!(request.into_record().is_err());
    }

    #[test]
    fn test_feedback_request_deserializes_lowercase() {
        let request: FeedbackRequest = serde_json::from_str(
            r#"{"user_id": "u1", "content_id": "v1", "feedback": "like"}"#,
        )
        .unwrap();
        assert_eq!(request.feedback, FeedbackType::Like);
    }
}
