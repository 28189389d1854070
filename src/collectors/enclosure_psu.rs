//! Enclosure Power Supply Collector
//!
//! # Metrics Produced
//! - `spectrum_psu_status` - Status of PSU (one-hot over online/offline/degraded)
//!   - Labels: enclosure, id, status

use super::{collect_with_handler, CollectionContext, CollectionResult};
use crate::metrics::set_one_hot;
use crate::spectrum::types::EnclosurePsu;
use crate::spectrum::SpectrumApi;

pub const PATH: &str = "/rest/lsenclosurepsu";

pub const PSU_STATES: &[&str] = &["online", "offline", "degraded"];

/// Collects power supply status from `lsenclosurepsu`
pub async fn collect_enclosure_psu_metrics<C: SpectrumApi>(
    ctx: &CollectionContext<'_, C>,
) -> CollectionResult {
    let status = ctx.metrics.gauge_vec(
        "spectrum_psu_status",
        "Status of PSU",
        &["enclosure", "id", "status"],
    )?;

    collect_with_handler(
        "enclosure PSUs",
        ctx.client.get::<Vec<EnclosurePsu>>(PATH, None),
        |psus| {
            for psu in psus {
                set_one_hot(
                    &status,
                    &[&psu.enclosure_id, &psu.psu_id],
                    &psu.status,
                    PSU_STATES,
                );
            }
        },
    )
    .await
}
