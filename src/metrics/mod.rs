//! Metrics collection for observability

use prometheus::{
    Counter, CounterVec, Histogram, Opts, Registry,
    register_counter_vec_with_registry, register_counter_with_registry,
    register_histogram_with_registry,
};
use std::sync::Arc;
use once_cell::sync::Lazy;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Intent capture metrics
    pub intents_completed: Counter,

    // Ranking metrics
    pub rankings_total: CounterVec,
    pub products_scored: Counter,
    pub products_excluded_budget: Counter,
    pub products_excluded_category: Counter,
    pub ranking_duration: Histogram,

    // Cache metrics
    pub cache_requests: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let intents_completed = register_counter_with_registry!(
            Opts::new("intents_completed_total", "Total intents captured to completion"),
            registry
        )?;

        let rankings_total = register_counter_vec_with_registry!(
            Opts::new("rankings_total", "Total ranking requests"),
            &["sort_key"],
            registry
        )?;

        let products_scored = register_counter_with_registry!(
            Opts::new("products_scored_total", "Total products scored"),
            registry
        )?;

        let products_excluded_budget = register_counter_with_registry!(
            Opts::new(
                "products_excluded_budget_total",
                "Total products dropped for falling outside the budget band"
            ),
            registry
        )?;

        let products_excluded_category = register_counter_with_registry!(
            Opts::new(
                "products_excluded_category_total",
                "Total products dropped for belonging to another category"
            ),
            registry
        )?;

        let ranking_duration = register_histogram_with_registry!(
            "ranking_duration_seconds",
            "Time spent filtering, scoring and sorting a catalog",
            registry
        )?;

        let cache_requests = register_counter_vec_with_registry!(
            Opts::new("ranking_cache_requests_total", "Ranking cache lookups"),
            &["result"],
            registry
        )?;

        Ok(Self {
            registry,
            intents_completed,
            rankings_total,
            products_scored,
            products_excluded_budget,
            products_excluded_category,
            ranking_duration,
            cache_requests,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Export metrics in Prometheus text format
    pub fn gather_text(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }

        String::from_utf8(buffer).unwrap_or_default()
    }
}
