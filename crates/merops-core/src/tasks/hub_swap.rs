// ── Hub priority swap ──
//
// For every network carrying the filter tag: fetch its VPN config,
// decide whether the primary/secondary swap applies, and write back the
// reordered hub list. Non-spokes and single-hub spokes are counted but
// never written.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info};

use crate::convert;
use crate::correlate::CorrelationStore;
use crate::error::CoreError;
use crate::fanout;
use crate::hubs;
use crate::model::{NetworkRecord, VpnConfig};
use crate::report::{HubSwapReport, Skip, SwappedHub};

use super::TaskContext;

/// Settings for one hub-swap run.
#[derive(Debug, Clone)]
pub struct HubSwapConfig {
    /// Only networks carrying this tag are considered.
    pub tag: String,
    /// Compute and report swaps without writing them.
    pub dry_run: bool,
}

/// Run the hub-swap task for one organization.
pub async fn run(
    ctx: &TaskContext,
    org_id: &str,
    config: &HubSwapConfig,
) -> Result<HubSwapReport, CoreError> {
    let started = Instant::now();

    // Phase 1: the tagged network set.
    let networks: Vec<NetworkRecord> = ctx
        .gateway
        .call("list_networks", || {
            ctx.client.list_networks(org_id, Some(&config.tag))
        })
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    info!(tag = %config.tag, networks = networks.len(), "tagged networks listed");

    let names: CorrelationStore<String> = networks
        .iter()
        .map(|n| (n.id.clone(), n.name.clone()))
        .collect();

    // Phase 2: VPN config per tagged network.
    let vpn_requests: Vec<(String, _)> = networks
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
    let mut not_applicable = 0usize;
    let mut pending: HashMap<String, VpnConfig> = HashMap::new();
    for (id, result) in fanout::collect_all(vpn_requests, ctx.concurrency).await {
        match result {
            Ok(dto) => {
                let current = convert::vpn_from_dto(&id, &dto);
                match hubs::compute_swap(&current) {
                    Some(swapped) => {
                        pending.insert(id, swapped);
                    }
                    None => {
                        debug!(network_id = %id, mode = %current.mode, hubs = current.hubs.len(), "swap not applicable");
                        not_applicable += 1;
                    }
                }
            }
            Err(err) if err.is_auth() => return Err(err.into()),
            Err(err) => skipped.push(Skip::call(&id, "site_to_site_vpn", &err)),
        }
    }

    let describe = |id: &str, vpn: &VpnConfig| -> Result<SwappedHub, CoreError> {
        Ok(SwappedHub {
            network_id: id.to_owned(),
            name: names.attach(id)?.clone(),
            new_primary: vpn.hubs.first().map(|h| h.hub_id.clone()).unwrap_or_default(),
            new_secondary: vpn.hubs.get(1).map(|h| h.hub_id.clone()).unwrap_or_default(),
        })
    };

    if config.dry_run {
        let mut swapped = Vec::new();
        for (id, vpn) in &pending {
            swapped.push(describe(id, vpn)?);
        }
        swapped.sort_by(|a, b| a.network_id.cmp(&b.network_id));
        return Ok(HubSwapReport {
            elapsed_ms: started.elapsed().as_millis() as u64,
            swapped,
            not_applicable,
            skipped,
            dry_run: true,
        });
    }

    // Phase 3: write back the reordered configs.
    let write_requests: Vec<(String, _)> = pending
        .iter()
        .map(|(id, vpn)| {
            let net_id = id.clone();
            let dto = convert::vpn_to_dto(vpn);
            let fut = async move {
                ctx.gateway
                    .call("update_site_to_site_vpn", || {
                        ctx.client.update_site_to_site_vpn(&net_id, &dto)
                    })
                    .await
            };
            (id.clone(), fut)
        })
        .collect();

    let mut swapped = Vec::new();
    for (id, result) in fanout::collect_all(write_requests, ctx.concurrency).await {
        match result {
            Ok(_) => {
                if let Some(vpn) = pending.get(&id) {
                    swapped.push(describe(&id, vpn)?);
                }
            }
            Err(err) if err.is_auth() => return Err(err.into()),
            Err(err) => skipped.push(Skip::call(&id, "update_site_to_site_vpn", &err)),
        }
    }
    swapped.sort_by(|a, b| a.network_id.cmp(&b.network_id));
    info!(swapped = swapped.len(), not_applicable, "hub swap complete");

    Ok(HubSwapReport {
        elapsed_ms: started.elapsed().as_millis() as u64,
        swapped,
        not_applicable,
        skipped,
        dry_run: false,
    })
}
