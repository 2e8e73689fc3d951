// Organization-scoped endpoints

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::{NetworkDto, OrgNetworkUsageDto};

impl DashboardClient {
    /// List the networks in an organization, optionally filtered to those
    /// carrying a tag.
    ///
    /// `GET /organizations/{org}/networks[?tags[]=...]`
    pub async fn list_networks(
        &self,
        org_id: &str,
        tag: Option<&str>,
    ) -> Result<Vec<NetworkDto>, Error> {
        let path = format!("organizations/{org_id}/networks");
        debug!(org_id, ?tag, "listing networks");
        match tag {
            Some(tag) => {
                self.get_with_params(&path, &[("tags[]", tag.to_owned())])
                    .await
            }
            None => self.get(&path).await,
        }
    }

    /// Uplink usage for every appliance network in the organization over
    /// one window of `timespan` seconds starting at `t1` (epoch seconds).
    ///
    /// `GET /organizations/{org}/appliance/uplinks/usage/byNetwork`
    pub async fn org_uplink_usage(
        &self,
        org_id: &str,
        t1: i64,
        timespan: u64,
    ) -> Result<Vec<OrgNetworkUsageDto>, Error> {
        let path = format!("organizations/{org_id}/appliance/uplinks/usage/byNetwork");
        debug!(org_id, t1, timespan, "fetching org uplink usage");
        self.get_with_params(
            &path,
            &[("t1", t1.to_string()), ("timespan", timespan.to_string())],
        )
        .await
    }
}
