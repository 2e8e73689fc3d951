// Network-scoped appliance endpoints

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::{SiteToSiteVpnDto, UplinkBandwidthDto, UplinkHistoryDto};

impl DashboardClient {
    /// Historical uplink usage for one network over `timespan` seconds
    /// starting at `t1`, split into intervals by the dashboard.
    ///
    /// `GET /networks/{net}/appliance/uplinks/usageHistory`
    pub async fn network_uplink_history(
        &self,
        network_id: &str,
        t1: i64,
        timespan: u64,
    ) -> Result<Vec<UplinkHistoryDto>, Error> {
        let path = format!("networks/{network_id}/appliance/uplinks/usageHistory");
        debug!(network_id, t1, timespan, "fetching uplink usage history");
        self.get_with_params(
            &path,
            &[("t1", t1.to_string()), ("timespan", timespan.to_string())],
        )
        .await
    }

    /// Configured per-interface uplink bandwidth limits for one network.
    ///
    /// `GET /networks/{net}/appliance/trafficShaping/uplinkBandwidth`
    pub async fn uplink_bandwidth(&self, network_id: &str) -> Result<UplinkBandwidthDto, Error> {
        let path = format!("networks/{network_id}/appliance/trafficShaping/uplinkBandwidth");
        debug!(network_id, "fetching uplink bandwidth limits");
        self.get(&path).await
    }

    /// Site-to-site VPN configuration for one network.
    ///
    /// `GET /networks/{net}/appliance/vpn/siteToSiteVpn`
    pub async fn site_to_site_vpn(&self, network_id: &str) -> Result<SiteToSiteVpnDto, Error> {
        let path = format!("networks/{network_id}/appliance/vpn/siteToSiteVpn");
        debug!(network_id, "fetching site-to-site VPN config");
        self.get(&path).await
    }

    /// Replace the site-to-site VPN configuration for one network.
    ///
    /// `PUT /networks/{net}/appliance/vpn/siteToSiteVpn`
    pub async fn update_site_to_site_vpn(
        &self,
        network_id: &str,
        config: &SiteToSiteVpnDto,
    ) -> Result<SiteToSiteVpnDto, Error> {
        let path = format!("networks/{network_id}/appliance/vpn/siteToSiteVpn");
        debug!(network_id, mode = %config.mode, "updating site-to-site VPN config");
        self.put(&path, config).await
    }
}
