//! Node Performance Collector
//!
//! Collects CPU, cache and per-protocol throughput counters of every node
//! canister from `lsnodecanisterstats`.
//!
//! The upstream `stat_name` selects the metric through [`NODE_STATS`]:
//! percentages are scaled to a 0-1 ratio, `*_mb` throughputs (MiB/s) to bytes
//! per second, and `*_io` rates are passed through. Other stat names are ignored.
//!
//! # Metrics Produced
//! - `spectrum_node_{compression,system,write_cache,total_cache}_usage_ratio`
//! - `spectrum_node_{fc,iscsi,sas}_bps`
//! - `spectrum_node_{fc,iscsi,sas}_iops`
//!   - Labels: id

use super::{collect_with_handler, identity, CollectionContext, CollectionResult, StatGauges, StatMetric};
use crate::spectrum::types::NodeStat;
use crate::spectrum::SpectrumApi;

pub const PATH: &str = "/rest/lsnodecanisterstats";

fn percent_to_ratio(value: f64) -> f64 {
    value / 100.0
}

fn mebibytes_to_bytes(value: f64) -> f64 {
    value * 1024.0 * 1024.0
}

pub const NODE_STATS: &[StatMetric] = &[
    StatMetric {
        stat: "cpu_pc",
        name: "spectrum_node_system_usage_ratio",
        help: "Current ratio of allocated CPU for system",
        transform: percent_to_ratio,
    },
    StatMetric {
        stat: "compression_cpu_pc",
        name: "spectrum_node_compression_usage_ratio",
        help: "Current ratio of allocated CPU for compresion",
        transform: percent_to_ratio,
    },
    StatMetric {
        stat: "write_cache_pc",
        name: "spectrum_node_write_cache_usage_ratio",
        help: "Ratio of the write cache usage for the node",
        transform: percent_to_ratio,
    },
    StatMetric {
        stat: "total_cache_pc",
        name: "spectrum_node_total_cache_usage_ratio",
        help: "Total percentage for both the write and read cache usage for the node",
        transform: percent_to_ratio,
    },
    StatMetric {
        stat: "fc_mb",
        name: "spectrum_node_fc_bps",
        help: "Current bytes-per-second being transferred over Fibre Channel",
        transform: mebibytes_to_bytes,
    },
    StatMetric {
        stat: "fc_io",
        name: "spectrum_node_fc_iops",
        help: "Current I/O-per-second being transferred over Fibre Channel",
        transform: identity,
    },
    StatMetric {
        stat: "iscsi_mb",
        name: "spectrum_node_iscsi_bps",
        help: "Current bytes-per-second being transferred over iSCSI",
        transform: mebibytes_to_bytes,
    },
    StatMetric {
        stat: "iscsi_io",
        name: "spectrum_node_iscsi_iops",
        help: "Current I/O-per-second being transferred over iSCSI",
        transform: identity,
    },
    StatMetric {
        stat: "sas_mb",
        name: "spectrum_node_sas_bps",
        help: "Current bytes-per-second being transferred over backend SAS",
        transform: mebibytes_to_bytes,
    },
    StatMetric {
        stat: "sas_io",
        name: "spectrum_node_sas_iops",
        help: "Current I/O-per-second being transferred over backend SAS",
        transform: identity,
    },
];

/// Collects node canister statistics from `lsnodecanisterstats`
pub async fn collect_node_stats_metrics<C: SpectrumApi>(
    ctx: &CollectionContext<'_, C>,
) -> CollectionResult {
    let gauges = StatGauges::register(ctx.metrics, NODE_STATS, &["id"])?;

    collect_with_handler(
        "node stats",
        ctx.client.get::<Vec<NodeStat>>(PATH, None),
        |stats| {
            for stat in stats {
                gauges.observe(&stat.stat_name, &[&stat.node_id], &stat.stat_current);
            }
        },
    )
    .await
}
