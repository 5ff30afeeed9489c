//! Data models for recommendation results

use serde::{Deserialize, Serialize};

use crate::catalog::ContentRecord;

/// One named scoring contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub factor: String,
    pub value: f64,
}

impl ScoreContribution {
    pub fn new(factor: &str, value: f64) -> Self {
        Self {
            factor: factor.to_string(),
            value,
        }
    }
}

/// A candidate with its computed score and explanation, used during ranking
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub record: ContentRecord,
    pub score: f64,
    pub explanation: Vec<ScoreContribution>,
}

/// One recommended item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub content_id: String,
    pub title: String,
    pub categories: Vec<String>,
    pub score: f64,
    /// The six named contributions, in scoring order
    pub explanation: Vec<ScoreContribution>,
}

impl From<ScoredCandidate> for RecommendationItem {
    fn from(candidate: ScoredCandidate) -> Self {
        Self {
            content_id: candidate.record.id,
            title: candidate.record.title,
            categories: candidate.record.categories,
            score: candidate.score,
            explanation: candidate.explanation,
        }
    }
}

/// Ordered recommendation batch, produced fresh per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub items: Vec<RecommendationItem>,
    /// Cap-relaxation rounds the diversity walk needed (0 on a healthy
    /// catalog)
    pub relaxation_rounds: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::VaPoint;
    use chrono::Utc;

    #[test]
    fn test_item_from_candidate() {
        let record = ContentRecord::new(
            "v001",
            "A title",
            vec!["comedy".to_string()],
            120,
            0.5,
            0.5,
            VaPoint::new(0.1, 0.1),
            Utc::now(),
        )
        .unwrap();

        let candidate = ScoredCandidate {
            record,
            score: 0.42,
            explanation: vec![ScoreContribution::new("base", 0.15)],
        };

        let item = RecommendationItem::from(candidate);
        assert_eq!(item.content_id, "v001");
        assert_eq!(item.score, 0.42);
        assert_eq!(item.explanation[0].factor, "base");
    }
}
