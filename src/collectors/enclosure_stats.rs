//! Enclosure Environment Collector
//!
//! Collects power draw and temperature of every enclosure.
//!
//! # Metrics Produced
//! - `spectrum_power_watts` - Current power draw of enclosure in watts
//!   - Labels: enclosure
//! - `spectrum_temperature` - Current enclosure temperature in celsius
//!   - Labels: enclosure

use super::{collect_with_handler, identity, CollectionContext, CollectionResult, StatGauges, StatMetric};
use crate::spectrum::types::EnclosureStat;
use crate::spectrum::SpectrumApi;

pub const PATH: &str = "/rest/lsenclosurestats";

const ENCLOSURE_STATS: &[StatMetric] = &[
    StatMetric {
        stat: "power_w",
        name: "spectrum_power_watts",
        help: "Current power draw of enclosure in watts",
        transform: identity,
    },
    StatMetric {
        stat: "temp_c",
        name: "spectrum_temperature",
        help: "Current enclosure temperature in celsius",
        transform: identity,
    },
];

/// Collects enclosure power and temperature from `lsenclosurestats`
///
/// Each record is one `(enclosure, stat_name)` sample; only `power_w` and
/// `temp_c` are exported.
pub async fn collect_enclosure_stats_metrics<C: SpectrumApi>(
    ctx: &CollectionContext<'_, C>,
) -> CollectionResult {
    let gauges = StatGauges::register(ctx.metrics, ENCLOSURE_STATS, &["enclosure"])?;

    collect_with_handler(
        "enclosure stats",
        ctx.client.get::<Vec<EnclosureStat>>(PATH, None),
        |stats| {
            for stat in stats {
                gauges.observe(&stat.stat_name, &[&stat.enclosure_id], &stat.stat_current);
            }
        },
    )
    .await
}
