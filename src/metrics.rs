//! Prometheus Metrics
//!
//! Two kinds of registries live in the exporter:
//!
//! - [`ProbeRegistry`]: created fresh for every `/probe` request. Collectors
//!   register their gauges into it, and it is rendered as the response body.
//!   It always carries `probe_success` and `probe_duration_seconds`.
//! - [`ExporterMetrics`]: process-wide metrics about the exporter itself,
//!   served on `/metrics`.
//!
//! # Metric Types
//!
//! Every array metric is a **GaugeVec**. Categorical status fields are expanded
//! with [`set_one_hot`] into one 0/1 series per known category so that they can
//! be summed and counted by status downstream.

use crate::error::Result;
use prometheus::{Encoder, Gauge, GaugeVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Duration;

/// Metric sink for a single probe invocation
///
/// Registering the same metric name twice fails with
/// [`ExporterError::Metrics`](crate::error::ExporterError::Metrics).
#[derive(Clone)]
pub struct ProbeRegistry {
    registry: Registry,
    probe_success: Gauge,
    probe_duration_seconds: Gauge,
}

impl ProbeRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let probe_success = Gauge::new("probe_success", "Whether or not the probe succeeded")?;
        let probe_duration_seconds = Gauge::new(
            "probe_duration_seconds",
            "How many seconds the probe took to complete",
        )?;

        registry.register(Box::new(probe_success.clone()))?;
        registry.register(Box::new(probe_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            probe_success,
            probe_duration_seconds,
        })
    }

    /// Create and register a labeled gauge
    pub fn gauge_vec(&self, name: &str, help: &str, labels: &[&str]) -> Result<GaugeVec> {
        let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
        self.registry.register(Box::new(gauge.clone()))?;
        Ok(gauge)
    }

    /// Record the overall probe result
    pub fn record_outcome(&self, success: bool, duration: Duration) {
        self.probe_success.set(if success { 1.0 } else { 0.0 });
        self.probe_duration_seconds.set(duration.as_secs_f64());
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        render_registry(&self.registry)
    }
}

/// Set a one-hot status indicator for one entity
///
/// Emits one series per entry of `categories`, keyed by `labels` plus the
/// category as the last label value: 1 for the category equal to `value`, 0 for
/// the rest. An unknown `value` emits nothing and returns `false`.
pub fn set_one_hot(gauge: &GaugeVec, labels: &[&str], value: &str, categories: &[&str]) -> bool {
    if !categories.contains(&value) {
        return false;
    }

    let mut label_values = Vec::with_capacity(labels.len() + 1);
    label_values.extend_from_slice(labels);
    label_values.push("");
    let last = label_values.len() - 1;

    for category in categories {
        label_values[last] = *category;
        gauge
            .with_label_values(label_values.as_slice())
            .set(if *category == value { 1.0 } else { 0.0 });
    }
    true
}

/// Set a 0/1 gauge from a boolean
pub fn set_bool(gauge: &GaugeVec, labels: &[&str], value: bool) {
    gauge
        .with_label_values(labels)
        .set(if value { 1.0 } else { 0.0 });
}

fn render_registry(registry: &Registry) -> anyhow::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Metrics about the exporter process itself
#[derive(Clone)]
pub struct ExporterMetrics {
    registry: Arc<Registry>,
    pub probes_total: Arc<IntCounterVec>,
    pub credentials: Arc<IntGauge>,
}

impl ExporterMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let probes_total = IntCounterVec::new(
            Opts::new("probes_total", "Number of probes run, by result")
                .namespace("spectrum_exporter"),
            &["result"],
        )?;

        let credentials = IntGauge::new(
            "spectrum_exporter_credentials",
            "Number of targets in the credential map",
        )?;

        registry.register(Box::new(probes_total.clone()))?;
        registry.register(Box::new(credentials.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            probes_total: Arc::new(probes_total),
            credentials: Arc::new(credentials),
        })
    }

    pub fn record_probe(&self, success: bool) {
        let result = if success { "success" } else { "failure" };
        self.probes_total.with_label_values(&[result]).inc();
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        render_registry(&self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: &[&str] = &["online", "offline", "degraded"];

    #[test]
    fn test_one_hot_marks_exactly_one() {
        let registry = ProbeRegistry::new().unwrap();
        let gauge = registry
            .gauge_vec("test_status", "Status", &["id", "status"])
            .unwrap();

        for &state in STATES {
            assert!(set_one_hot(&gauge, &["1"], state, STATES));
            let active: f64 = STATES
                .iter()
                .map(|&s| gauge.with_label_values(&["1", s]).get())
                .sum();
            assert_eq!(active, 1.0);
            assert_eq!(gauge.with_label_values(&["1", state]).get(), 1.0);
        }
    }

    #[test]
    fn test_one_hot_ignores_unknown_value() {
        let registry = ProbeRegistry::new().unwrap();
        let gauge = registry
            .gauge_vec("test_status", "Status", &["id", "status"])
            .unwrap();

        assert!(!set_one_hot(&gauge, &["1"], "service", STATES));
        let rendered = registry.render().unwrap();
        assert!(!rendered.contains("test_status{"));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = ProbeRegistry::new().unwrap();
        registry.gauge_vec("test_dup", "First", &["id"]).unwrap();
        assert!(registry.gauge_vec("test_dup", "Second", &["id"]).is_err());
    }

    #[test]
    fn test_outcome_always_rendered() {
        let registry = ProbeRegistry::new().unwrap();
        registry.record_outcome(false, Duration::from_millis(1500));

        let rendered = registry.render().unwrap();
        assert!(rendered.contains("probe_success 0"));
        assert!(rendered.contains("probe_duration_seconds 1.5"));
    }

    #[test]
    fn test_exporter_metrics() {
        let metrics = ExporterMetrics::new().unwrap();
        metrics.credentials.set(2);
        metrics.record_probe(true);
        metrics.record_probe(false);
        metrics.record_probe(false);

        let rendered = metrics.render().unwrap();
        assert!(rendered.contains("spectrum_exporter_credentials 2"));
        assert!(rendered.contains("spectrum_exporter_probes_total{result=\"success\"} 1"));
        assert!(rendered.contains("spectrum_exporter_probes_total{result=\"failure\"} 2"));
    }
}
