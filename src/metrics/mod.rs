//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_int_gauge_with_registry, CounterVec, HistogramVec, IntGauge, Opts, Registry,
};
use std::sync::Arc;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Matching
    pub category_matches: CounterVec,

    // Checklist generation
    pub checklists_generated: CounterVec,
    pub checklist_input_errors: CounterVec,

    // Sessions
    pub active_sessions: IntGauge,
    pub step_toggles: CounterVec,

    // HTTP
    pub request_duration: HistogramVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let category_matches = register_counter_vec_with_registry!(
            Opts::new("category_matches_total", "Category match attempts by outcome"),
            &["outcome"],
            registry
        )?;

        let checklists_generated = register_counter_vec_with_registry!(
            Opts::new("checklists_generated_total", "Checklists generated by input source"),
            &["source"],
            registry
        )?;

        let checklist_input_errors = register_counter_vec_with_registry!(
            Opts::new("checklist_input_errors_total", "Rejected checklist requests by kind"),
            &["kind"],
            registry
        )?;

        let active_sessions = register_int_gauge_with_registry!(
            Opts::new("checklist_sessions_active", "Live checklist sessions"),
            registry
        )?;

        let step_toggles = register_counter_vec_with_registry!(
            Opts::new("checklist_step_toggles_total", "Step toggles by flag"),
            &["flag"],
            registry
        )?;

        let request_duration = register_histogram_vec_with_registry!(
            "dismantle_request_duration_seconds",
            "API request duration in seconds",
            &["endpoint"],
            registry
        )?;

        Ok(Self {
            registry,
            category_matches,
            checklists_generated,
            checklist_input_errors,
            active_sessions,
            step_toggles,
            request_duration,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a category match attempt
    pub fn record_match(&self, matched: bool) {
        let outcome = if matched { "matched" } else { "unavailable" };
        self.category_matches.with_label_values(&[outcome]).inc();
    }

    /// Record a generated checklist
    pub fn record_checklist(&self, source: &str) {
        self.checklists_generated.with_label_values(&[source]).inc();
    }

    /// Record a rejected checklist request (`parse` or `validation`)
    pub fn record_input_error(&self, kind: &str) {
        self.checklist_input_errors.with_label_values(&[kind]).inc();
    }

    pub fn record_toggle(&self, flag: &str) {
        self.step_toggles.with_label_values(&[flag]).inc();
    }

    pub fn set_active_sessions(&self, count: usize) {
        self.active_sessions.set(count as i64);
    }

    pub fn observe_request(&self, endpoint: &str, seconds: f64) {
        self.request_duration.with_label_values(&[endpoint]).observe(seconds);
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

/// Helper macro to time operations
#[macro_export]
macro_rules! time_operation {
    ($endpoint:expr, $operation:expr) => {{
        let timer = $crate::metrics::METRICS
            .request_duration
            .with_label_values(&[$endpoint])
            .start_timer();
        let result = $operation;
        timer.observe_duration();
        result
    }};
}
