use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outbound byte count for one uplink over one time window.
/// Immutable once fetched.
#[derive(Debug, Clone, Serialize)]
pub struct UplinkSample {
    pub network_id: String,
    pub interface: String,
    pub bytes_sent: u64,
    pub window_secs: u64,
    pub start_time: Option<DateTime<Utc>>,
}

impl UplinkSample {
    /// Average outbound rate over the window, in bits per second.
    pub fn observed_bps(&self) -> f64 {
        if self.window_secs == 0 {
            return 0.0;
        }
        (self.bytes_sent as f64) * 8.0 / (self.window_secs as f64)
    }
}

/// Read-only lookup table of configured upload limits, keyed by network
/// id then interface name, normalized to bits/sec.
///
/// Built once per run by a single reducer after the bandwidth fan-out
/// completes; the same snapshot serves both scan passes (staleness
/// between them is accepted).
#[derive(Debug, Default)]
pub struct BandwidthLimits {
    limits: HashMap<String, HashMap<String, u64>>,
}

impl BandwidthLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the upload limit for one network/interface pair.
    pub fn insert(&mut self, network_id: &str, interface: &str, limit_bps: u64) {
        self.limits
            .entry(network_id.to_owned())
            .or_default()
            .insert(interface.to_owned(), limit_bps);
    }

    /// The upload limit in bits/sec, if one is configured.
    pub fn limit_bps(&self, network_id: &str, interface: &str) -> Option<u64> {
        self.limits.get(network_id)?.get(interface).copied()
    }

    /// Whether any limits were recorded for a network.
    pub fn has_network(&self, network_id: &str) -> bool {
        self.limits.contains_key(network_id)
    }
}

/// A threshold breach for one uplink: everything the run summary needs
/// to report it. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct AlertEvent {
    pub network_id: String,
    pub name: String,
    pub interface: String,
    pub observed_bps: f64,
    pub threshold_bps: f64,
    pub window_secs: u64,
}

impl AlertEvent {
    /// Observed rate in Mbps, for human-readable output.
    pub fn observed_mbps(&self) -> f64 {
        self.observed_bps / 1_000_000.0
    }
}
