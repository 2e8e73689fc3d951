// ── Usage alerting ──
//
// Two-pass uplink scan. Phase 1 pulls one org-wide 300s usage window and
// the per-network upload limits; the coarse pass flags networks whose
// WAN rate crossed half the configured limit. Phase 2 re-samples only
// the flagged networks over five consecutive 60s windows and reports
// breaches against the tighter fine threshold. The limit table is
// fetched once and serves both passes.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use crate::convert;
use crate::correlate::CorrelationStore;
use crate::error::CoreError;
use crate::fanout;
use crate::model::BandwidthLimits;
use crate::report::{Skip, UsageReport};
use crate::threshold::{self, ScanProfile};

use super::TaskContext;

/// Tunable thresholds for one usage-alerting run.
#[derive(Debug, Clone, Copy)]
pub struct UsageScanConfig {
    pub coarse_fraction: f64,
    pub fine_fraction: f64,
}

impl Default for UsageScanConfig {
    fn default() -> Self {
        Self {
            coarse_fraction: threshold::DEFAULT_COARSE_FRACTION,
            fine_fraction: threshold::DEFAULT_FINE_FRACTION,
        }
    }
}

/// Run the usage-alerting task for one organization.
pub async fn run(
    ctx: &TaskContext,
    org_id: &str,
    config: &UsageScanConfig,
) -> Result<UsageReport, CoreError> {
    let started = Instant::now();
    let now = Utc::now().timestamp();
    let coarse = ScanProfile::org_wide(config.coarse_fraction);
    let fine = ScanProfile::per_site(config.fine_fraction);

    // Phase 1a: org-wide usage. Without it there is no run.
    let t1 = now - coarse.window_secs as i64;
    let usage = ctx
        .gateway
        .call("org_uplink_usage", || {
            ctx.client.org_uplink_usage(org_id, t1, coarse.window_secs)
        })
        .await?;
    info!(networks = usage.len(), "org uplink usage fetched");

    // Names enter the store before any per-network phase starts; every
    // later result must correlate back through it.
    let names: CorrelationStore<String> = usage
        .iter()
        .map(|u| (u.network_id.clone(), u.name.clone()))
        .collect();

    // Phase 1b: per-network upload limits, fetched by bounded fan-out
    // and reduced into one read-only table.
    let limit_requests: Vec<(String, _)> = usage
        .iter()
        .map(|u| {
            let id = u.network_id.clone();
            let fut = async move {
                ctx.gateway
                    .call("uplink_bandwidth", || ctx.client.uplink_bandwidth(&id))
                    .await
            };
            (u.network_id.clone(), fut)
        })
        .collect();

    let mut limits = BandwidthLimits::new();
    let mut skipped = Vec::new();
    let mut fetch_failed: HashSet<String> = HashSet::new();
    for (id, result) in fanout::collect_all(limit_requests, ctx.concurrency).await {
        match result {
            Ok(dto) => convert::record_bandwidth_limits(&mut limits, &id, &dto),
            Err(err) if err.is_auth() => return Err(err.into()),
            Err(err) => {
                skipped.push(Skip::call(&id, "uplink_bandwidth", &err));
                fetch_failed.insert(id);
            }
        }
    }

    // Coarse pass: evaluate every WAN uplink in the org window.
    let mut reported_gaps: HashSet<(String, String)> = HashSet::new();
    let mut coarse_alerts = Vec::new();
    let mut flagged: Vec<String> = Vec::new();
    for u in &usage {
        if fetch_failed.contains(&u.network_id) {
            continue;
        }
        let name = names.attach(&u.network_id)?;
        for sample in convert::samples_from_org_usage(u, coarse.window_secs) {
            match threshold::evaluate(&sample, name, &limits, coarse) {
                Ok(Some(event)) => {
                    if !flagged.contains(&event.network_id) {
                        flagged.push(event.network_id.clone());
                    }
                    coarse_alerts.push(event);
                }
                Ok(None) => {}
                Err(gap) => {
                    if reported_gaps.insert((gap.network_id.clone(), gap.interface.clone())) {
                        skipped.push(Skip::gap(&gap));
                    }
                }
            }
        }
    }
    info!(
        alerts = coarse_alerts.len(),
        flagged = flagged.len(),
        "coarse pass complete"
    );

    // Phase 2: five consecutive 60s windows per flagged network.
    let mut history_requests = Vec::new();
    for id in &flagged {
        for k in 1..=ScanProfile::FINE_WINDOW_COUNT {
            let net_id = id.clone();
            let t1 = now - (fine.window_secs * k) as i64;
            let fut = async move {
                ctx.gateway
                    .call("network_uplink_history", || {
                        ctx.client
                            .network_uplink_history(&net_id, t1, fine.window_secs)
                    })
                    .await
            };
            history_requests.push((id.clone(), fut));
        }
    }

    let mut fine_alerts = Vec::new();
    for (id, result) in fanout::collect_all(history_requests, ctx.concurrency).await {
        // A key the store has never seen means the orchestrator and
        // store drifted apart; fail loudly rather than dropping it.
        let name = names.attach(&id)?;
        match result {
            Ok(history) => {
                debug!(network_id = %id, intervals = history.len(), "history window fetched");
                for sample in convert::samples_from_history(&id, &history) {
                    match threshold::evaluate(&sample, name, &limits, fine) {
                        Ok(Some(event)) => fine_alerts.push(event),
                        Ok(None) => {}
                        Err(gap) => {
                            if reported_gaps
                                .insert((gap.network_id.clone(), gap.interface.clone()))
                            {
                                skipped.push(Skip::gap(&gap));
                            }
                        }
                    }
                }
            }
            Err(err) if err.is_auth() => return Err(err.into()),
            Err(err) => skipped.push(Skip::call(&id, "network_uplink_history", &err)),
        }
    }

    Ok(UsageReport {
        elapsed_ms: started.elapsed().as_millis() as u64,
        networks_scanned: usage.len(),
        coarse_alerts,
        fine_alerts,
        skipped,
    })
}
