//! Fibre Channel Port Collector
//!
//! # Metrics Produced
//! - `spectrum_fc_port_status` - Status of Fibre Channel port
//!   (one-hot over active/inactive_unconfigured/inactive_configured)
//!   - Labels: node_id, adapter_location, adapter_port_id, wwpn, status
//! - `spectrum_fc_port_speed_bps` - Operational speed of port in bits per second
//!   - Labels: node_id, adapter_location, adapter_port_id

use super::{collect_with_handler, CollectionContext, CollectionResult};
use crate::metrics::set_one_hot;
use crate::spectrum::types::FcPort;
use crate::spectrum::SpectrumApi;
use crate::units::{parse_port_speed, FC_SPEED_UNITS};

pub const PATH: &str = "/rest/lsportfc";

pub const FC_PORT_STATES: &[&str] = &["active", "inactive_unconfigured", "inactive_configured"];

/// Collects Fibre Channel port status and speed from `lsportfc`
///
/// Speeds such as `"16Gb"` become bits per second; a port without a `Gb`
/// speed (for example `"N/A"` on a down link) reports 0.
pub async fn collect_fc_port_metrics<C: SpectrumApi>(
    ctx: &CollectionContext<'_, C>,
) -> CollectionResult {
    let status = ctx.metrics.gauge_vec(
        "spectrum_fc_port_status",
        "Status of Fibre Channel port",
        &["node_id", "adapter_location", "adapter_port_id", "wwpn", "status"],
    )?;
    let speed = ctx.metrics.gauge_vec(
        "spectrum_fc_port_speed_bps",
        "Operational speed of port in bits per second",
        &["node_id", "adapter_location", "adapter_port_id"],
    )?;

    collect_with_handler(
        "Fibre Channel ports",
        ctx.client.get::<Vec<FcPort>>(PATH, None),
        |ports| {
            for port in ports {
                set_one_hot(
                    &status,
                    &[
                        &port.node_id,
                        &port.adapter_location,
                        &port.adapter_port_id,
                        &port.wwpn,
                    ],
                    &port.status,
                    FC_PORT_STATES,
                );

                speed
                    .with_label_values(&[
                        port.node_id.as_str(),
                        port.adapter_location.as_str(),
                        port.adapter_port_id.as_str(),
                    ])
                    .set(parse_port_speed(&port.port_speed, FC_SPEED_UNITS) as f64);
            }
        },
    )
    .await
}
