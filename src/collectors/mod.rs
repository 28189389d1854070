//! Metrics Collectors
//!
//! This module contains one collector per Spectrum Virtualize resource type.
//! Each collector registers its gauges into the probe's [`ProbeRegistry`],
//! fetches one REST collection and translates the records into metric points.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Accept a `CollectionContext` holding the session and the metric sink
//! - Register their metrics up front
//! - Query a single REST command
//! - Normalize units and expand status fields into one-hot indicators
//! - Return `CollectionResult` (`Ok(Success)` or `Ok(Failed)`)
//!
//! # Error Handling
//!
//! A failed fetch is non-fatal: it is logged and reported as
//! `CollectionStatus::Failed`. A field that cannot be parsed only drops that one
//! metric point. `Err(_)` is reserved for programming errors such as registering
//! the same metric twice.

use crate::error::ExporterError;
use crate::metrics::ProbeRegistry;
use crate::spectrum::SpectrumApi;
use crate::units::{self, UnitError};
use prometheus::GaugeVec;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Shared context passed to all collectors
pub struct CollectionContext<'a, C> {
    /// Authenticated Spectrum Virtualize session
    pub client: &'a C,
    /// Metric sink of the running probe
    pub metrics: &'a ProbeRegistry,
}

/// Status of a metrics collection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Metrics were successfully collected and updated
    Success,
    /// Collection failed but is non-fatal (already logged as warning)
    Failed,
}

impl CollectionStatus {
    pub fn is_success(self) -> bool {
        self == CollectionStatus::Success
    }
}

/// Result type for collector functions
///
/// - `Ok(CollectionStatus::Success)` = Collection succeeded
/// - `Ok(CollectionStatus::Failed)` = Fetch failed, logged as warning
/// - `Err(_)` = Fatal error (should propagate)
pub type CollectionResult = Result<CollectionStatus, ExporterError>;

/// Helper to reduce boilerplate in collectors
///
/// Wraps an API query with consistent error handling:
/// - On success: processes data, returns `CollectionStatus::Success`
/// - On error: logs warning, returns `CollectionStatus::Failed` (non-fatal)
///
/// # Arguments
///
/// * `name` - Name of the resource being collected (for logging)
/// * `query_future` - Async API call that returns data
/// * `process` - Function to process the data and update metrics
pub async fn collect_with_handler<T, F, P, E>(
    name: &str,
    query_future: F,
    process: P,
) -> CollectionResult
where
    F: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: FnOnce(T),
{
    match query_future.await {
        Ok(data) => {
            process(data);
            debug!("Updated {} metrics", name);
            Ok(CollectionStatus::Success)
        }
        Err(e) => {
            warn!("Failed to query {}: {}", name, e);
            Ok(CollectionStatus::Failed)
        }
    }
}

/// Maps one upstream `stat_name` to the gauge it feeds
pub struct StatMetric {
    pub stat: &'static str,
    pub name: &'static str,
    pub help: &'static str,
    pub transform: fn(f64) -> f64,
}

/// Gauges for a table of [`StatMetric`]s, looked up by `stat_name`
pub struct StatGauges {
    gauges: HashMap<&'static str, (GaugeVec, fn(f64) -> f64)>,
}

impl StatGauges {
    /// Register one gauge per table entry
    pub fn register(
        metrics: &ProbeRegistry,
        table: &[StatMetric],
        labels: &[&str],
    ) -> Result<Self, ExporterError> {
        let mut gauges = HashMap::with_capacity(table.len());
        for entry in table {
            let gauge = metrics.gauge_vec(entry.name, entry.help, labels)?;
            gauges.insert(entry.stat, (gauge, entry.transform));
        }
        Ok(Self { gauges })
    }

    /// Record a string-encoded sample. Unknown stat names are ignored.
    pub fn observe(&self, stat: &str, labels: &[&str], raw: &str) {
        let Some((gauge, transform)) = self.gauges.get(stat) else {
            return;
        };
        if let Some(value) = parse_or_warn(stat, raw, units::parse_int) {
            gauge.with_label_values(labels).set(transform(value as f64));
        }
    }
}

/// Parse a field, logging and discarding values that do not parse
pub(crate) fn parse_or_warn<T>(
    field: &str,
    raw: &str,
    parse: fn(&str) -> Result<T, UnitError>,
) -> Option<T> {
    match parse(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to parse {} {:?}: {}", field, raw, e);
            None
        }
    }
}

pub(crate) fn identity(value: f64) -> f64 {
    value
}

// Collector modules
pub mod drive;
pub mod enclosure_psu;
pub mod enclosure_stats;
pub mod fc_port;
pub mod ip_port;
pub mod node_stats;
pub mod pool;

// Re-export collector functions for convenient access
pub use drive::collect_drive_metrics;
pub use enclosure_psu::collect_enclosure_psu_metrics;
pub use enclosure_stats::collect_enclosure_stats_metrics;
pub use fc_port::collect_fc_port_metrics;
pub use ip_port::collect_ip_port_metrics;
pub use node_stats::collect_node_stats_metrics;
pub use pool::collect_pool_metrics;

/// Every resource type the exporter collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collector {
    EnclosureStats,
    EnclosurePsu,
    Pool,
    Drive,
    NodeStats,
    FcPort,
    IpPort,
}

impl Collector {
    /// All collectors, in the order a fail-fast probe runs them
    pub const ALL: [Collector; 7] = [
        Collector::EnclosureStats,
        Collector::EnclosurePsu,
        Collector::Pool,
        Collector::Drive,
        Collector::NodeStats,
        Collector::FcPort,
        Collector::IpPort,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collector::EnclosureStats => "enclosure_stats",
            Collector::EnclosurePsu => "enclosure_psu",
            Collector::Pool => "pool",
            Collector::Drive => "drive",
            Collector::NodeStats => "node_stats",
            Collector::FcPort => "fc_port",
            Collector::IpPort => "ip_port",
        }
    }

    pub async fn collect<C: SpectrumApi>(self, ctx: &CollectionContext<'_, C>) -> CollectionResult {
        match self {
            Collector::EnclosureStats => collect_enclosure_stats_metrics(ctx).await,
            Collector::EnclosurePsu => collect_enclosure_psu_metrics(ctx).await,
            Collector::Pool => collect_pool_metrics(ctx).await,
            Collector::Drive => collect_drive_metrics(ctx).await,
            Collector::NodeStats => collect_node_stats_metrics(ctx).await,
            Collector::FcPort => collect_fc_port_metrics(ctx).await,
            Collector::IpPort => collect_ip_port_metrics(ctx).await,
        }
    }
}
