// ── Hub tag synchronization ──
//
// Tags every spoke appliance network with its primary VPN hub. Phase 1
// lists the org's networks (names double as the hub-id lookup), phase 2
// fans out the per-network VPN config fetches, a reducer computes the
// reconciled tag sequences, and phase 3 fans out the write-backs.
// Networks whose VPN fetch failed are skipped, never written blind.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info};

use crate::convert;
use crate::correlate::CorrelationStore;
use crate::error::CoreError;
use crate::fanout;
use crate::model::{NetworkRecord, TagUpdate, VpnConfig};
use crate::report::{Skip, TagSyncReport};
use crate::tags;

use super::TaskContext;

/// Settings for one tag-sync run.
#[derive(Debug, Clone)]
pub struct TagSyncConfig {
    /// Prefix identifying the hub tags this tool owns.
    pub prefix: String,
    /// Compute and report updates without writing them.
    pub dry_run: bool,
}

impl Default for TagSyncConfig {
    fn default() -> Self {
        Self {
            prefix: tags::DEFAULT_HUB_TAG_PREFIX.to_owned(),
            dry_run: false,
        }
    }
}

/// Run the tag-sync task for one organization.
pub async fn run(
    ctx: &TaskContext,
    org_id: &str,
    config: &TagSyncConfig,
) -> Result<TagSyncReport, CoreError> {
    let started = Instant::now();

    // Phase 1: full network list. Every network's name is recorded so a
    // spoke's hub id can be resolved to a display name later.
    let networks: Vec<NetworkRecord> = ctx
        .gateway
        .call("list_networks", || ctx.client.list_networks(org_id, None))
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    info!(networks = networks.len(), "org networks listed");

    let names: CorrelationStore<String> = networks
        .iter()
        .map(|n| (n.id.clone(), n.name.clone()))
        .collect();

    let appliances: Vec<&NetworkRecord> = networks.iter().filter(|n| n.is_appliance()).collect();

    // Phase 2: VPN config per appliance network.
    let vpn_requests: Vec<(String, _)> = appliances
        .iter()
        .map(|n| {
            let id = n.id.clone();
            let fut = async move {
                ctx.gateway
                    .call("site_to_site_vpn", || ctx.client.site_to_site_vpn(&id))
                    .await
            };
            (n.id.clone(), fut)
        })
        .collect();

    let mut skipped = Vec::new();
    let mut vpn_by_net: HashMap<String, VpnConfig> = HashMap::new();
    for (id, result) in fanout::collect_all(vpn_requests, ctx.concurrency).await {
        match result {
            Ok(dto) => {
                vpn_by_net.insert(id.clone(), convert::vpn_from_dto(&id, &dto));
            }
            Err(err) if err.is_auth() => return Err(err.into()),
            Err(err) => skipped.push(Skip::call(&id, "site_to_site_vpn", &err)),
        }
    }

    // Reducer: reconcile each appliance's tags. Spokes gain a tag naming
    // their primary hub; everything else just has stale hub tags
    // stripped.
    let mut pending: HashMap<String, TagUpdate> = HashMap::new();
    let mut unchanged = 0usize;
    for net in &appliances {
        let Some(vpn) = vpn_by_net.get(&net.id) else {
            continue; // fetch failed, already recorded
        };
        let new_tag = if vpn.is_spoke() {
            match vpn.primary_hub() {
                Some(hub_id) => Some(tags::hub_tag(&config.prefix, names.attach(hub_id)?)),
                None => None,
            }
        } else {
            None
        };
        let next = tags::reconcile(&net.tags, &config.prefix, new_tag.as_deref());
        if next == net.tags {
            unchanged += 1;
            debug!(network_id = %net.id, "tags already reconciled");
            continue;
        }
        pending.insert(
            net.id.clone(),
            TagUpdate {
                network_id: net.id.clone(),
                name: net.name.clone(),
                tags: next,
            },
        );
    }

    if config.dry_run {
        let mut updated: Vec<TagUpdate> = pending.into_values().collect();
        updated.sort_by(|a, b| a.network_id.cmp(&b.network_id));
        return Ok(TagSyncReport {
            elapsed_ms: started.elapsed().as_millis() as u64,
            updated,
            unchanged,
            skipped,
            dry_run: true,
        });
    }

    // Phase 3: write-backs.
    let write_requests: Vec<(String, _)> = pending
        .values()
        .map(|update| {
            let id = update.network_id.clone();
            let new_tags = update.tags.clone();
            let fut = async move {
                ctx.gateway
                    .call("update_network_tags", || {
                        ctx.client.update_network_tags(&id, &new_tags)
                    })
                    .await
            };
            (update.network_id.clone(), fut)
        })
        .collect();

    let mut updated = Vec::new();
    for (id, result) in fanout::collect_all(write_requests, ctx.concurrency).await {
        match result {
            Ok(_) => {
                if let Some(update) = pending.remove(&id) {
                    updated.push(update);
                }
            }
            Err(err) if err.is_auth() => return Err(err.into()),
            Err(err) => skipped.push(Skip::call(&id, "update_network_tags", &err)),
        }
    }
    updated.sort_by(|a, b| a.network_id.cmp(&b.network_id));
    info!(updated = updated.len(), unchanged, "tag sync complete");

    Ok(TagSyncReport {
        elapsed_ms: started.elapsed().as_millis() as u64,
        updated,
        unchanged,
        skipped,
        dry_run: false,
    })
}
