//! Emotional state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecommendError;

/// Closed set of emotion labels the engine understands
///
/// Labels arrive pre-classified from the acquisition collaborator. Anything
/// outside this enumeration fails with `UnknownEmotionLabel` at the parse
/// boundary; there is no default or inferred label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionLabel {
    Happy,
    Sad,
    Angry,
    Tired,
    Relaxed,
    Surprised,
    Disgust,
    Pleased,
    Neutral,
}

impl EmotionLabel {
    /// All nine labels, used for exhaustive strategy-table validation
    pub const ALL: [EmotionLabel; 9] = [
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Angry,
        EmotionLabel::Tired,
        EmotionLabel::Relaxed,
        EmotionLabel::Surprised,
        EmotionLabel::Disgust,
        EmotionLabel::Pleased,
        EmotionLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Happy => "Happy",
            EmotionLabel::Sad => "Sad",
            EmotionLabel::Angry => "Angry",
            EmotionLabel::Tired => "Tired",
            EmotionLabel::Relaxed => "Relaxed",
            EmotionLabel::Surprised => "Surprised",
            EmotionLabel::Disgust => "Disgust",
            EmotionLabel::Pleased => "Pleased",
            EmotionLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Happy" => Ok(EmotionLabel::Happy),
            "Sad" => Ok(EmotionLabel::Sad),
            "Angry" => Ok(EmotionLabel::Angry),
            "Tired" => Ok(EmotionLabel::Tired),
            "Relaxed" => Ok(EmotionLabel::Relaxed),
            "Surprised" => Ok(EmotionLabel::Surprised),
            "Disgust" => Ok(EmotionLabel::Disgust),
            "Pleased" => Ok(EmotionLabel::Pleased),
            "Neutral" => Ok(EmotionLabel::Neutral),
            other => Err(RecommendError::UnknownEmotionLabel(other.to_string())),
        }
    }
}

/// Point in valence/arousal space, both axes in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaPoint {
    pub valence: f64,
    pub arousal: f64,
}

/// Maximum Euclidean distance between two points of the [-1,1]² square
pub const MAX_VA_DISTANCE: f64 = 2.0 * std::f64::consts::SQRT_2;

impl VaPoint {
    /// Create a point, clamping both axes into [-1, 1]
    pub fn new(valence: f64, arousal: f64) -> Self {
        Self {
            valence: valence.clamp(-1.0, 1.0),
            arousal: arousal.clamp(-1.0, 1.0),
        }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &VaPoint) -> f64 {
        let dv = self.valence - other.valence;
        let da = self.arousal - other.arousal;
        (dv * dv + da * da).sqrt()
    }

    /// Distance normalized against the unit-square maximum, in [0, 1]
    pub fn normalized_distance(&self, other: &VaPoint) -> f64 {
        self.distance(other) / MAX_VA_DISTANCE
    }
}

/// A single externally-classified emotional reading
///
/// Continuous scores are clamped into range on construction rather than
/// rejected, keeping the pipeline live on noisy input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalState {
    pub label: EmotionLabel,
    pub intensity: f64,
    pub valence: f64,
    pub arousal: f64,
    pub timestamp: DateTime<Utc>,
}

impl EmotionalState {
    pub fn new(
        label: EmotionLabel,
        intensity: f64,
        valence: f64,
        arousal: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            label,
            intensity: intensity.clamp(0.0, 100.0),
            valence: valence.clamp(-1.0, 1.0),
            arousal: arousal.clamp(-1.0, 1.0),
            timestamp,
        }
    }

    /// Valence/arousal as a point
    pub fn va(&self) -> VaPoint {
        VaPoint::new(self.valence, self.arousal)
    }

    /// Quadrant of valence/arousal space this reading falls into
    pub fn quadrant(&self) -> VaQuadrant {
        VaQuadrant::of(self.valence, self.arousal)
    }
}

/// Intensity tier of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntensityTier {
    Low,
    Mid,
    High,
}

/// Valence/arousal quadrant, with a dead zone of ±0.3 on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaQuadrant {
    HighValenceHighArousal,
    HighValenceLowArousal,
    LowValenceHighArousal,
    LowValenceLowArousal,
    NeutralZone,
}

impl VaQuadrant {
    pub fn of(valence: f64, arousal: f64) -> Self {
        if valence > 0.3 && arousal > 0.3 {
            VaQuadrant::HighValenceHighArousal
        } else if valence > 0.3 && arousal < -0.3 {
            VaQuadrant::HighValenceLowArousal
        } else if valence < -0.3 && arousal > 0.3 {
            VaQuadrant::LowValenceHighArousal
        } else if valence < -0.3 && arousal < -0.3 {
            VaQuadrant::LowValenceLowArousal
        } else {
            VaQuadrant::NeutralZone
        }
    }
}
