// Network-scoped endpoints

use serde_json::json;
use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::NetworkDto;

impl DashboardClient {
    /// Replace a network's tag list wholesale.
    ///
    /// `PUT /networks/{net}` with `{"tags": [...]}` -- the dashboard
    /// treats the body as a partial update, so only the tags change.
    pub async fn update_network_tags(
        &self,
        network_id: &str,
        tags: &[String],
    ) -> Result<NetworkDto, Error> {
        let path = format!("networks/{network_id}");
        debug!(network_id, ?tags, "updating network tags");
        self.put(&path, &json!({ "tags": tags })).await
    }
}
