//! Run reports: what each task touched, skipped, and how long it took.
//!
//! A partial-failure run still reports every entity that succeeded plus a
//! per-entity skip reason; these types are what the CLI renders.

use serde::Serialize;

use crate::error::{CallError, ConfigurationGap};
use crate::model::{AlertEvent, TagUpdate};

/// One entity excluded from a run, and why.
#[derive(Debug, Clone, Serialize)]
pub struct Skip {
    pub network_id: String,
    pub reason: String,
}

impl Skip {
    /// A gateway call for this entity failed terminally.
    pub fn call(network_id: &str, op: &str, err: &CallError) -> Self {
        Self {
            network_id: network_id.to_owned(),
            reason: format!("{op}: {err}"),
        }
    }

    /// Expected configuration data was missing for this entity.
    pub fn gap(gap: &ConfigurationGap) -> Self {
        Self {
            network_id: gap.network_id.clone(),
            reason: gap.to_string(),
        }
    }
}

/// Outcome of a usage-alerting run.
#[derive(Debug, Serialize)]
pub struct UsageReport {
    pub elapsed_ms: u64,
    /// Networks present in the org-wide usage response.
    pub networks_scanned: usize,
    /// Breaches from the coarse 300s org-wide pass.
    pub coarse_alerts: Vec<AlertEvent>,
    /// Breaches from the fine 60s per-site pass over flagged networks.
    pub fine_alerts: Vec<AlertEvent>,
    pub skipped: Vec<Skip>,
}

/// Outcome of a tag-sync run.
#[derive(Debug, Serialize)]
pub struct TagSyncReport {
    pub elapsed_ms: u64,
    /// Networks whose tag sequence was rewritten (or would be, on a
    /// dry run).
    pub updated: Vec<TagUpdate>,
    /// Networks whose reconciled tags already matched.
    pub unchanged: usize,
    pub skipped: Vec<Skip>,
    pub dry_run: bool,
}

/// One completed (or planned) hub-priority swap.
#[derive(Debug, Clone, Serialize)]
pub struct SwappedHub {
    pub network_id: String,
    pub name: String,
    pub new_primary: String,
    pub new_secondary: String,
}

/// Outcome of a hub-swap run.
#[derive(Debug, Serialize)]
pub struct HubSwapReport {
    pub elapsed_ms: u64,
    pub swapped: Vec<SwappedHub>,
    /// Tagged networks that are not spokes with two or more hubs.
    pub not_applicable: usize,
    pub skipped: Vec<Skip>,
    pub dry_run: bool,
}
