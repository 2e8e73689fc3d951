// ── Wire-to-domain conversions ──
//
// merops-api DTOs stay at the boundary; tasks and domain logic only see
// the model types. Conversions are lossless where a write-back needs to
// round-trip (VPN configs keep their subnets and default-route flags).

use merops_api::types::{
    HubDto, NetworkDto, OrgNetworkUsageDto, SiteToSiteVpnDto, SubnetDto, UplinkBandwidthDto,
    UplinkHistoryDto,
};

use crate::model::{BandwidthLimits, NetworkRecord, UplinkSample, VpnConfig, VpnHub, VpnMode, VpnSubnet};

impl From<NetworkDto> for NetworkRecord {
    fn from(dto: NetworkDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            product_types: dto.product_types,
            tags: dto.tags,
        }
    }
}

/// Flatten one network's org-wide usage entry into WAN-agnostic samples
/// covering the given window.
pub fn samples_from_org_usage(usage: &OrgNetworkUsageDto, window_secs: u64) -> Vec<UplinkSample> {
    usage
        .by_uplink
        .iter()
        .map(|u| UplinkSample {
            network_id: usage.network_id.clone(),
            interface: u.interface.clone(),
            bytes_sent: u.sent,
            window_secs,
            start_time: None,
        })
        .collect()
}

/// Flatten a usage-history response into samples, one per interface per
/// interval. Window length comes from each interval's own bounds.
pub fn samples_from_history(network_id: &str, history: &[UplinkHistoryDto]) -> Vec<UplinkSample> {
    history
        .iter()
        .flat_map(|interval| {
            let window_secs = (interval.end_time - interval.start_time)
                .num_seconds()
                .max(0) as u64;
            interval.by_interface.iter().map(move |u| UplinkSample {
                network_id: network_id.to_owned(),
                interface: u.interface.clone(),
                bytes_sent: u.sent,
                window_secs,
                start_time: Some(interval.start_time),
            })
        })
        .collect()
}

/// Fold one network's configured limits into the run-wide table,
/// normalizing the wire unit (Kbps) to bits/sec. Interfaces with no
/// configured upload limit are left absent -- that absence is what the
/// threshold evaluator reports as a configuration gap.
pub fn record_bandwidth_limits(
    table: &mut BandwidthLimits,
    network_id: &str,
    dto: &UplinkBandwidthDto,
) {
    for (interface, setting) in &dto.bandwidth_limits {
        if let Some(limit_up_kbps) = setting.limit_up {
            table.insert(network_id, interface, limit_up_kbps.saturating_mul(1000));
        }
    }
}

/// Domain view of a site-to-site VPN config. Unrecognized modes read as
/// `None`, which no transition applies to.
pub fn vpn_from_dto(network_id: &str, dto: &SiteToSiteVpnDto) -> VpnConfig {
    VpnConfig {
        network_id: network_id.to_owned(),
        mode: dto.mode.parse().unwrap_or(VpnMode::None),
        hubs: dto
            .hubs
            .iter()
            .map(|h| VpnHub {
                hub_id: h.hub_id.clone(),
                use_default_route: h.use_default_route,
            })
            .collect(),
        subnets: dto
            .subnets
            .iter()
            .map(|s| VpnSubnet {
                local_subnet: s.local_subnet.clone(),
                use_vpn: s.use_vpn,
            })
            .collect(),
    }
}

/// Wire view of a domain VPN config, for write-backs.
pub fn vpn_to_dto(config: &VpnConfig) -> SiteToSiteVpnDto {
    SiteToSiteVpnDto {
        mode: config.mode.to_string(),
        hubs: config
            .hubs
            .iter()
            .map(|h| HubDto {
                hub_id: h.hub_id.clone(),
                use_default_route: h.use_default_route,
            })
            .collect(),
        subnets: config
            .subnets
            .iter()
            .map(|s| SubnetDto {
                local_subnet: s.local_subnet.clone(),
                use_vpn: s.use_vpn,
            })
            .collect(),
    }
}
