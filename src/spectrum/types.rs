//! Spectrum Virtualize REST API Record Definitions
//!
//! Every `ls*` command exposed under `/rest` returns a JSON array of flat
//! objects. The API encodes numbers as quoted strings (`"427"`, `"9.94TB"`), so
//! all fields are kept as text here and parsed at normalization time by the
//! collectors. A malformed number then only costs that one metric point instead
//! of failing the whole fetch.
//!
//! # API Endpoints Covered
//!
//! - `/rest/auth` → [`LoginResponse`]
//! - `/rest/lsenclosurestats` → [`EnclosureStat`]
//! - `/rest/lsenclosurepsu` → [`EnclosurePsu`]
//! - `/rest/lsdrive` → [`Drive`]
//! - `/rest/lsmdiskgrp` → [`MdiskGroup`]
//! - `/rest/lsnodecanisterstats` → [`NodeStat`]
//! - `/rest/lsportfc` → [`FcPort`]
//! - `/rest/lsportip` → [`IpPort`]

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

/// Accepts a string, a number or null and yields its text form (`""` for null).
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        None => String::new(),
        Some(TextOrNumber::Text(s)) => s,
        Some(TextOrNumber::Integer(n)) => n.to_string(),
        Some(TextOrNumber::Unsigned(n)) => n.to_string(),
        Some(TextOrNumber::Float(n)) => n.to_string(),
    })
}

/// Response of `POST /rest/auth`
#[derive(Debug, Deserialize, Clone)]
pub struct LoginResponse {
    #[serde(rename = "Token", alias = "token", default, deserialize_with = "text")]
    pub token: String,
}

/// One `(enclosure, stat)` sample from `lsenclosurestats`
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EnclosureStat {
    #[serde(deserialize_with = "text")]
    pub enclosure_id: String,
    #[serde(deserialize_with = "text")]
    pub stat_name: String,
    /// String-encoded integer
    #[serde(deserialize_with = "text")]
    pub stat_current: String,
    #[serde(deserialize_with = "text")]
    pub stat_peak: String,
    #[serde(deserialize_with = "text")]
    pub stat_peak_time: String,
}

/// One power supply from `lsenclosurepsu`
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EnclosurePsu {
    #[serde(deserialize_with = "text")]
    pub enclosure_id: String,
    #[serde(deserialize_with = "text")]
    pub psu_id: String,
    #[serde(deserialize_with = "text")]
    pub status: String,
    #[serde(deserialize_with = "text")]
    pub input_power: String,
}

/// One drive from `lsdrive`
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Drive {
    #[serde(deserialize_with = "text")]
    pub id: String,
    #[serde(deserialize_with = "text")]
    pub status: String,
    #[serde(rename = "use", deserialize_with = "text")]
    pub usage: String,
    #[serde(deserialize_with = "text")]
    pub capacity: String,
    #[serde(deserialize_with = "text")]
    pub slot_id: String,
    #[serde(deserialize_with = "text")]
    pub mdisk_id: String,
    #[serde(deserialize_with = "text")]
    pub mdisk_name: String,
    #[serde(deserialize_with = "text")]
    pub enclosure_id: String,
}

/// One storage pool (managed disk group) from `lsmdiskgrp`
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MdiskGroup {
    #[serde(deserialize_with = "text")]
    pub id: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub status: String,
    /// String-encoded integer
    #[serde(deserialize_with = "text")]
    pub vdisk_count: String,
    /// Binary byte sizes such as `"10.00TB"`
    #[serde(deserialize_with = "text")]
    pub capacity: String,
    #[serde(deserialize_with = "text")]
    pub free_capacity: String,
    #[serde(deserialize_with = "text")]
    pub virtual_capacity: String,
    #[serde(deserialize_with = "text")]
    pub used_capacity: String,
    #[serde(deserialize_with = "text")]
    pub real_capacity: String,
    #[serde(deserialize_with = "text")]
    pub reclaimable_capacity: String,
}

/// One `(node, stat)` sample from `lsnodecanisterstats`
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NodeStat {
    #[serde(deserialize_with = "text")]
    pub node_id: String,
    #[serde(deserialize_with = "text")]
    pub node_name: String,
    #[serde(deserialize_with = "text")]
    pub stat_name: String,
    /// String-encoded integer
    #[serde(deserialize_with = "text")]
    pub stat_current: String,
    #[serde(deserialize_with = "text")]
    pub stat_peak: String,
    #[serde(deserialize_with = "text")]
    pub stat_peak_time: String,
}

/// One Fibre Channel port from `lsportfc`
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FcPort {
    #[serde(deserialize_with = "text")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "text")]
    pub port_type: String,
    /// e.g. `"16Gb"`, or `"N/A"` when the link is down
    #[serde(deserialize_with = "text")]
    pub port_speed: String,
    #[serde(deserialize_with = "text")]
    pub status: String,
    #[serde(rename = "WWPN", alias = "wwpn", deserialize_with = "text")]
    pub wwpn: String,
    #[serde(deserialize_with = "text")]
    pub node_id: String,
    #[serde(deserialize_with = "text")]
    pub node_name: String,
    #[serde(deserialize_with = "text")]
    pub adapter_location: String,
    #[serde(deserialize_with = "text")]
    pub adapter_port_id: String,
}

/// One Ethernet port from `lsportip`
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct IpPort {
    #[serde(deserialize_with = "text")]
    pub id: String,
    /// e.g. `"10Gb/s"` or `"100Mb/s"`
    #[serde(deserialize_with = "text")]
    pub speed: String,
    #[serde(deserialize_with = "text")]
    pub state: String,
    #[serde(deserialize_with = "text")]
    pub link_state: String,
    #[serde(rename = "MAC", alias = "mac", deserialize_with = "text")]
    pub mac: String,
    #[serde(deserialize_with = "text")]
    pub node_id: String,
    #[serde(deserialize_with = "text")]
    pub node_name: String,
    #[serde(deserialize_with = "text")]
    pub adapter_location: String,
    #[serde(deserialize_with = "text")]
    pub adapter_port_id: String,
}
