//! Wire types for the dashboard API.
//!
//! These mirror the JSON shapes returned by the appliance endpoints and are
//! deliberately separate from the core domain model -- `merops-core`
//! converts at the boundary. All fields are camelCase on the wire.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Organization networks ────────────────────────────────────────────

/// One network in an organization (`GET /organizations/{org}/networks`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub product_types: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ── Uplink usage ─────────────────────────────────────────────────────

/// Per-network uplink usage over one window
/// (`GET /organizations/{org}/appliance/uplinks/usage/byNetwork`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgNetworkUsageDto {
    pub network_id: String,
    pub name: String,
    #[serde(default)]
    pub by_uplink: Vec<UplinkUsageDto>,
}

/// Byte counters for a single uplink within a usage window.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkUsageDto {
    #[serde(default)]
    pub serial: Option<String>,
    pub interface: String,
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub received: u64,
}

/// One history interval for a network's uplinks
/// (`GET /networks/{net}/appliance/uplinks/usageHistory`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkHistoryDto {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub by_interface: Vec<InterfaceUsageDto>,
}

/// Byte counters for one interface within a history interval.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceUsageDto {
    pub interface: String,
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub received: u64,
}

// ── Traffic shaping ──────────────────────────────────────────────────

/// Configured uplink bandwidth limits
/// (`GET /networks/{net}/appliance/trafficShaping/uplinkBandwidth`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkBandwidthDto {
    #[serde(default)]
    pub bandwidth_limits: HashMap<String, BandwidthSettingDto>,
}

/// Up/down limits for one interface, in Kbps. `None` means unlimited.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthSettingDto {
    pub limit_up: Option<u64>,
    pub limit_down: Option<u64>,
}

// ── Site-to-site VPN ─────────────────────────────────────────────────

/// Site-to-site VPN configuration for a network. Serialized back verbatim
/// on update, so every field the GET returns must round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteToSiteVpnDto {
    pub mode: String,
    #[serde(default)]
    pub hubs: Vec<HubDto>,
    #[serde(default)]
    pub subnets: Vec<SubnetDto>,
}

/// One hub entry, in priority order (index 0 = primary).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HubDto {
    pub hub_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_default_route: Option<bool>,
}

/// A local subnet exported (or not) into the VPN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetDto {
    pub local_subnet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_vpn: Option<bool>,
}
