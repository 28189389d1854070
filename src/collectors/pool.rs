//! Storage Pool Collector
//!
//! Collects status, volume count and capacity of every pool (managed disk group).
//!
//! # Metrics Produced
//! - `spectrum_pool_status` - Status of pool (one-hot over online/offline)
//!   - Labels: id, name, status
//! - `spectrum_pool_volume_count` - Number of volumes associated with pool
//!   - Labels: id, name
//! - `spectrum_pool_capacity_bytes` - Capacity of pool in bytes
//!   - Labels: id, name
//! - `spectrum_pool_free_bytes` - Free bytes in pool
//!   - Labels: id, name
//! - `spectrum_pool_used_bytes` - Used bytes in pool
//!   - Labels: id, name

use super::{collect_with_handler, parse_or_warn, CollectionContext, CollectionResult};
use crate::metrics::set_one_hot;
use crate::spectrum::types::MdiskGroup;
use crate::spectrum::SpectrumApi;
use crate::units;

pub const PATH: &str = "/rest/lsmdiskgrp";

pub const POOL_STATES: &[&str] = &["online", "offline"];

/// Collects pool metrics from `lsmdiskgrp`
///
/// Capacities arrive as binary byte sizes (`"10.00TB"`) and are converted to
/// bytes. A size that does not parse is logged and only that gauge is skipped
/// for the pool; status and volume count are still emitted.
pub async fn collect_pool_metrics<C: SpectrumApi>(
    ctx: &CollectionContext<'_, C>,
) -> CollectionResult {
    let labels = ["id", "name"];
    let status = ctx.metrics.gauge_vec(
        "spectrum_pool_status",
        "Status of pool",
        &["id", "name", "status"],
    )?;
    let volume_count = ctx.metrics.gauge_vec(
        "spectrum_pool_volume_count",
        "Number of volumes associated with pool",
        &labels,
    )?;
    let capacity = ctx.metrics.gauge_vec(
        "spectrum_pool_capacity_bytes",
        "Capacity of pool in bytes",
        &labels,
    )?;
    let free = ctx
        .metrics
        .gauge_vec("spectrum_pool_free_bytes", "Free bytes in pool", &labels)?;
    let used = ctx
        .metrics
        .gauge_vec("spectrum_pool_used_bytes", "Used bytes in pool", &labels)?;

    collect_with_handler(
        "pools",
        ctx.client.get::<Vec<MdiskGroup>>(PATH, None),
        |pools| {
            for pool in pools {
                let pool_labels = [pool.id.as_str(), pool.name.as_str()];

                set_one_hot(&status, &pool_labels, &pool.status, POOL_STATES);

                if let Some(count) = parse_or_warn("vdisk_count", &pool.vdisk_count, units::parse_int)
                {
                    volume_count
                        .with_label_values(&pool_labels)
                        .set(count as f64);
                }

                let sizes = [
                    (&free, "free_capacity", &pool.free_capacity),
                    (&capacity, "capacity", &pool.capacity),
                    (&used, "used_capacity", &pool.used_capacity),
                ];
                for (gauge, field, raw) in sizes {
                    if let Some(bytes) = parse_or_warn(field, raw, units::parse_base2_bytes) {
                        gauge.with_label_values(&pool_labels).set(bytes as f64);
                    }
                }
            }
        },
    )
    .await
}
