// ── Threshold evaluation ──
//
// Pure decision logic: given an uplink sample and the configured upload
// limit, does an alert condition hold? No state is retained between
// calls. Two profiles are used per run: a coarse org-wide pass and a
// fine per-site pass over the networks the coarse pass flagged.

use crate::error::ConfigurationGap;
use crate::model::{AlertEvent, BandwidthLimits, UplinkSample};

/// Interfaces participate only when named with this prefix; `cellular`
/// and management interfaces are ignored even if present in a payload.
pub const WAN_PREFIX: &str = "wan";

/// Default threshold fraction for the org-wide 300s pass.
pub const DEFAULT_COARSE_FRACTION: f64 = 0.5;

/// Default threshold fraction for the per-site 60s pass.
pub const DEFAULT_FINE_FRACTION: f64 = 0.7;

/// Window length and threshold fraction for one evaluation pass.
#[derive(Debug, Clone, Copy)]
pub struct ScanProfile {
    pub window_secs: u64,
    pub fraction: f64,
}

impl ScanProfile {
    /// Coarse organization-wide profile: one 300s window per network.
    pub fn org_wide(fraction: f64) -> Self {
        Self {
            window_secs: 300,
            fraction,
        }
    }

    /// Fine per-site profile: five consecutive 60s windows ending now.
    pub fn per_site(fraction: f64) -> Self {
        Self {
            window_secs: 60,
            fraction,
        }
    }

    /// How many consecutive windows the per-site pass covers.
    pub const FINE_WINDOW_COUNT: u64 = 5;
}

/// Whether an interface participates in uplink alerting.
pub fn is_wan(interface: &str) -> bool {
    interface.starts_with(WAN_PREFIX)
}

/// Evaluate one sample against its configured limit.
///
/// Returns `Ok(None)` for non-WAN interfaces and rates below threshold,
/// `Ok(Some(event))` when `observed >= limit * fraction`, and a
/// [`ConfigurationGap`] when the network/interface pair has no configured
/// upload limit -- a data gap to report, not a transient failure.
pub fn evaluate(
    sample: &UplinkSample,
    display_name: &str,
    limits: &BandwidthLimits,
    profile: ScanProfile,
) -> Result<Option<AlertEvent>, ConfigurationGap> {
    if !is_wan(&sample.interface) {
        return Ok(None);
    }

    let limit_bps = limits
        .limit_bps(&sample.network_id, &sample.interface)
        .ok_or_else(|| ConfigurationGap {
            network_id: sample.network_id.to_owned(),
            interface: sample.interface.clone(),
        })?;

    let observed_bps = sample.observed_bps();
    let threshold_bps = (limit_bps as f64) * profile.fraction;

    if observed_bps >= threshold_bps {
        Ok(Some(AlertEvent {
            network_id: sample.network_id.clone(),
            name: display_name.to_owned(),
            interface: sample.interface.clone(),
            observed_bps,
            threshold_bps,
            window_secs: sample.window_secs,
        }))
    } else {
        Ok(None)
    }
}
