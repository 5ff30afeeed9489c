//! API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::models::*;
use crate::catalog::ContentIndex;
use crate::config::Config;
use crate::engine::RecommendationEngine;
use crate::error::RecommendError;
use crate::metrics::METRICS;
use crate::profile::{AdaptationLearner, ProfileStore, ProfileView};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub learner: Arc<AdaptationLearner>,
    pub profiles: Arc<ProfileStore>,
    pub index: Arc<ContentIndex>,
    pub config: Arc<Config>,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn error_response(err: RecommendError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        RecommendError::UnknownEmotionLabel(_)
        | RecommendError::InvalidProfileConfig(_)
        | RecommendError::InvalidContent(_)
        | RecommendError::Configuration(_) => StatusCode::BAD_REQUEST,
        RecommendError::UnknownContent(_) => StatusCode::NOT_FOUND,
        RecommendError::EmptyCatalog => StatusCode::SERVICE_UNAVAILABLE,
        RecommendError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiError::new(err.code(), err.to_string())))
}

/// Generate recommendations for a user's current emotional state
///
/// POST /api/v1/recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> ApiResult<RecommendResponse> {
    let timer = METRICS
        .recommendation_duration
        .with_label_values(&["recommend"])
        .start_timer();

    if request.user_id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("VALIDATION_ERROR", "user_id cannot be empty")),
        ));
    }

    let count = request.count.unwrap_or(state.config.engine.default_count);
    if count == 0 || count > state.config.engine.max_count {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                "VALIDATION_ERROR",
                format!(
                    "count must be between 1 and {}",
                    state.config.engine.max_count
                ),
            )),
        ));
    }

    let user_id = request.user_id.clone();
    let emotion_state = request.emotion.into_state().map_err(|e| {
        METRICS.record_recommendation(false, 0);
        error_response(e)
    })?;

    info!(
        "Recommendation request: user={}, label={}, intensity={:.1}, count={}",
        user_id, emotion_state.label, emotion_state.intensity, count
    );

    match state
        .engine
        .recommend(
            &emotion_state,
            &user_id,
            count,
            request.min_intensity_threshold,
        )
        .await
    {
        Ok(result) => {
            METRICS.record_recommendation(true, result.items.len());
            timer.observe_duration();
            Ok(Json(RecommendResponse {
                request_id: Uuid::new_v4(),
                user_id,
                items: result.items,
                relaxation_rounds: result.relaxation_rounds,
                generated_at: Utc::now(),
            }))
        }
        Err(e) => {
            error!("Recommendation failed for user {}: {}", user_id, e);
            METRICS.record_recommendation(false, 0);
            timer.observe_duration();
            Err(error_response(e))
        }
    }
}

/// Record end-user feedback on a recommended item
///
/// POST /api/v1/feedback
pub async fn feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> ApiResult<AckResponse> {
    if request.user_id.is_empty() || request.content_id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                "VALIDATION_ERROR",
                "user_id and content_id cannot be empty",
            )),
        ));
    }

    match state
        .learner
        .on_feedback(&request.user_id, &request.content_id, request.feedback)
        .await
    {
        Ok(()) => {
            METRICS.record_feedback(match request.feedback {
                crate::profile::FeedbackType::Like => "like",
                crate::profile::FeedbackType::Skip => "skip",
                crate::profile::FeedbackType::Share => "share",
            });
            Ok(Json(AckResponse::ok()))
        }
        Err(e) => {
            error!("Feedback rejected: {}", e);
            Err(error_response(e))
        }
    }
}

/// Record a passively-observed emotional state
///
/// POST /api/v1/emotion
pub async fn observe_emotion(
    State(state): State<AppState>,
    Json(request): Json<EmotionObserveRequest>,
) -> ApiResult<AckResponse> {
    if request.user_id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("VALIDATION_ERROR", "user_id cannot be empty")),
        ));
    }

    let emotion_state = request.emotion.into_state().map_err(error_response)?;
    state
        .learner
        .on_emotion_observed(&request.user_id, &emotion_state)
        .await;
    METRICS.record_emotion_observation();

    Ok(Json(AckResponse::ok()))
}

/// Read-only profile projection
///
/// GET /api/v1/profile/:user_id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<ProfileView> {
    Ok(Json(state.profiles.view(&user_id).await))
}

/// Update profile settings
///
/// PUT /api/v1/profile/:user_id/settings
pub async fn update_profile_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ProfileSettingsRequest>,
) -> ApiResult<AckResponse> {
    if let Some(tier) = &request.adaptation_rate {
        let tier = tier.parse().map_err(error_response)?;
        state
            .learner
            .set_adaptation_rate(&user_id, tier)
            .await
            .map_err(error_response)?;
    }

    if let Some(value) = request.diversity_preference {
        state
            .learner
            .set_diversity_preference(&user_id, value)
            .await
            .map_err(error_response)?;
    }

    METRICS.record_profile_update();
    Ok(Json(AckResponse::ok()))
}

/// Administrative content upsert
///
/// POST /api/v1/content
pub async fn upsert_content(
    State(state): State<AppState>,
    Json(request): Json<ContentUpsertRequest>,
) -> ApiResult<AckResponse> {
    let record = request.into_record().map_err(|e| {
        METRICS.record_content_upsert(false);
        error_response(e)
    })?;

    match state.index.upsert(record) {
        Ok(()) => {
            METRICS.record_content_upsert(true);
            Ok(Json(AckResponse::ok()))
        }
        Err(e) => {
            METRICS.record_content_upsert(false);
            Err(error_response(e))
        }
    }
}

/// Liveness probe
///
/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running".to_string(),
        catalog_size: state.index.len(),
        profile_count: state.profiles.len(),
    })
}

/// Prometheus metrics export
///
/// GET /metrics
pub async fn metrics() -> String {
    METRICS.export_prometheus()
}
