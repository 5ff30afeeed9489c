//! Error types for the recommendation engine

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, RecommendError>;

/// Recommendation engine errors
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Unknown emotion label: {0}")]
    UnknownEmotionLabel(String),

    #[error("Content catalog is empty")]
    EmptyCatalog,

    #[error("Unknown content id: {0}")]
    UnknownContent(String),

    #[error("Invalid profile configuration: {0}")]
    InvalidProfileConfig(String),

    #[error("Invalid content record: {0}")]
    InvalidContent(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecommendError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownEmotionLabel(_) => "UNKNOWN_EMOTION_LABEL",
            Self::EmptyCatalog => "EMPTY_CATALOG",
            Self::UnknownContent(_) => "UNKNOWN_CONTENT",
            Self::InvalidProfileConfig(_) => "INVALID_PROFILE_CONFIG",
            Self::InvalidContent(_) => "INVALID_CONTENT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
