//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_counter_with_registry,
    register_histogram_vec_with_registry, register_histogram_with_registry, Counter, CounterVec,
    Histogram, HistogramVec, Opts, Registry,
};
use std::sync::Arc;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> =
    Lazy::new(|| Arc::new(Metrics::new().expect("Failed to initialize metrics")));

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Recommendation metrics
    pub recommendation_requests: CounterVec,
    pub recommendation_batch_size: Histogram,
    pub recommendation_duration: HistogramVec,
    pub empty_catalog_failures: Counter,
    pub diversity_relaxations: Counter,

    // Learning metrics
    pub feedback_events: CounterVec,
    pub emotion_observations: Counter,
    pub profile_updates: Counter,

    // Catalog metrics
    pub content_upserts: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let recommendation_requests = register_counter_vec_with_registry!(
            Opts::new(
                "recommendation_requests_total",
                "Total recommendation requests"
            ),
            &["status"],
            registry
        )?;

        let recommendation_batch_size = register_histogram_with_registry!(
            "recommendation_batch_size",
            "Items returned per recommendation request",
            registry
        )?;

        let recommendation_duration = register_histogram_vec_with_registry!(
            "request_duration_seconds",
            "Request duration in seconds",
            &["endpoint"],
            registry
        )?;

        let empty_catalog_failures = register_counter_with_registry!(
            Opts::new(
                "empty_catalog_failures_total",
                "Recommendation requests rejected on an empty catalog"
            ),
            registry
        )?;

        let diversity_relaxations = register_counter_with_registry!(
            Opts::new(
                "diversity_relaxations_total",
                "Cap-relaxation rounds triggered by catalog scarcity"
            ),
            registry
        )?;

        let feedback_events = register_counter_vec_with_registry!(
            Opts::new("feedback_events_total", "Total feedback events"),
            &["type"],
            registry
        )?;

        let emotion_observations = register_counter_with_registry!(
            Opts::new(
                "emotion_observations_total",
                "Passive emotional-state observations"
            ),
            registry
        )?;

        let profile_updates = register_counter_with_registry!(
            Opts::new("profile_updates_total", "Profile configuration updates"),
            registry
        )?;

        let content_upserts = register_counter_vec_with_registry!(
            Opts::new("content_upserts_total", "Administrative content upserts"),
            &["status"],
            registry
        )?;

        Ok(Self {
            registry,
            recommendation_requests,
            recommendation_batch_size,
            recommendation_duration,
            empty_catalog_failures,
            diversity_relaxations,
            feedback_events,
            emotion_observations,
            profile_updates,
            content_upserts,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a recommendation request outcome
    pub fn record_recommendation(&self, success: bool, batch_size: usize) {
        let status = if success { "success" } else { "error" };
        self.recommendation_requests
            .with_label_values(&[status])
            .inc();
        if success {
            self.recommendation_batch_size.observe(batch_size as f64);
        }
    }

    /// Record an empty-catalog failure
    pub fn record_empty_catalog(&self) {
        self.empty_catalog_failures.inc();
    }

    /// Record diversity cap relaxation rounds
    pub fn record_diversity_relaxation(&self, rounds: usize) {
        self.diversity_relaxations.inc_by(rounds as f64);
    }

    /// Record a feedback event
    pub fn record_feedback(&self, feedback_type: &str) {
        self.feedback_events
            .with_label_values(&[feedback_type])
            .inc();
    }

    /// Record a passive emotion observation
    pub fn record_emotion_observation(&self) {
        self.emotion_observations.inc();
    }

    /// Record a profile configuration update
    pub fn record_profile_update(&self) {
        self.profile_updates.inc();
    }

    /// Record a content upsert
    pub fn record_content_upsert(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.content_upserts.with_label_values(&[status]).inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        let metrics = Metrics::new();
        assert!(metrics.is_ok());
    }

    #[test]
    fn test_record_recommendation() {
        let metrics = Metrics::new().unwrap();
        metrics.record_recommendation(true, 5);
        metrics.record_recommendation(false, 0);
        // Metrics should be recorded without panicking
    }

    #[test]
    fn test_record_feedback_by_type() {
        let metrics = Metrics::new().unwrap();
        metrics.record_feedback("like");
        metrics.record_feedback("skip");
        metrics.record_feedback("share");
    }

    #[test]
    fn test_export_contains_registered_series() {
        let metrics = Metrics::new().unwrap();
        metrics.record_recommendation(true, 3);
        let exported = metrics.export_prometheus();
        assert!(exported.contains("recommendation_requests_total"));
    }
}
