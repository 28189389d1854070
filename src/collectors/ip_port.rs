//! Ethernet (IP) Port Collector
//!
//! # Metrics Produced
//! - `spectrum_ip_port_state` - Configuration state of Ethernet/IP port
//!   (one-hot over configured/unconfigured/management_only)
//!   - Labels: node_id, adapter_location, adapter_port_id, mac, state
//! - `spectrum_ip_port_link_active` - Whether link is active
//!   - Labels: node_id, adapter_location, adapter_port_id, mac
//! - `spectrum_ip_port_speed_bps` - Operational speed of port in bits per second
//!   - Labels: node_id, adapter_location, adapter_port_id

use super::{collect_with_handler, CollectionContext, CollectionResult};
use crate::metrics::{set_bool, set_one_hot};
use crate::spectrum::types::IpPort;
use crate::spectrum::SpectrumApi;
use crate::units::{parse_port_speed, IP_SPEED_UNITS};

pub const PATH: &str = "/rest/lsportip";

pub const IP_PORT_STATES: &[&str] = &["configured", "unconfigured", "management_only"];

/// Collects Ethernet port state, link and speed from `lsportip`
pub async fn collect_ip_port_metrics<C: SpectrumApi>(
    ctx: &CollectionContext<'_, C>,
) -> CollectionResult {
    let state = ctx.metrics.gauge_vec(
        "spectrum_ip_port_state",
        "Configuration state of Ethernet/IP port",
        &["node_id", "adapter_location", "adapter_port_id", "mac", "state"],
    )?;
    let link_active = ctx.metrics.gauge_vec(
        "spectrum_ip_port_link_active",
        "Whether link is active",
        &["node_id", "adapter_location", "adapter_port_id", "mac"],
    )?;
    let speed = ctx.metrics.gauge_vec(
        "spectrum_ip_port_speed_bps",
        "Operational speed of port in bits per second",
        &["node_id", "adapter_location", "adapter_port_id"],
    )?;

    collect_with_handler(
        "IP ports",
        ctx.client.get::<Vec<IpPort>>(PATH, None),
        |ports| {
            for port in ports {
                let port_labels = [
                    port.node_id.as_str(),
                    port.adapter_location.as_str(),
                    port.adapter_port_id.as_str(),
                ];
                let mac_labels = [
                    port.node_id.as_str(),
                    port.adapter_location.as_str(),
                    port.adapter_port_id.as_str(),
                    port.mac.as_str(),
                ];

                set_one_hot(&state, &mac_labels, &port.state, IP_PORT_STATES);
                set_bool(&link_active, &mac_labels, port.link_state == "active");
                speed
                    .with_label_values(&port_labels)
                    .set(parse_port_speed(&port.speed, IP_SPEED_UNITS) as f64);
            }
        },
    )
    .await
}
