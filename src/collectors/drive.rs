//! Drive Collector
//!
//! # Metrics Produced
//! - `spectrum_drive_status` - Status of drive (one-hot over online/offline/degraded)
//!   - Labels: enclosure, slot_id, id, status

use super::{collect_with_handler, CollectionContext, CollectionResult};
use crate::metrics::set_one_hot;
use crate::spectrum::types::Drive;
use crate::spectrum::SpectrumApi;

pub const PATH: &str = "/rest/lsdrive";

pub const DRIVE_STATES: &[&str] = &["online", "offline", "degraded"];

/// Collects drive status from `lsdrive`
pub async fn collect_drive_metrics<C: SpectrumApi>(
    ctx: &CollectionContext<'_, C>,
) -> CollectionResult {
    let status = ctx.metrics.gauge_vec(
        "spectrum_drive_status",
        "Status of drive",
        &["enclosure", "slot_id", "id", "status"],
    )?;

    collect_with_handler(
        "drives",
        ctx.client.get::<Vec<Drive>>(PATH, None),
        |drives| {
            for drive in drives {
                set_one_hot(
                    &status,
                    &[&drive.enclosure_id, &drive.slot_id, &drive.id],
                    &drive.status,
                    DRIVE_STATES,
                );
            }
        },
    )
    .await
}
