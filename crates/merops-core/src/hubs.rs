// ── Hub priority transition ──
//
// Pure decision logic for the failover swap. The write-back (posting the
// updated configuration) is a separate orchestrated, retryable call; a
// `None` here means the caller must not attempt one.

use crate::model::VpnConfig;

/// Compute the hub-priority swap for a network, if applicable.
///
/// Applicable only when the network is a spoke with at least two hubs:
/// the result exchanges the entries at positions 0 and 1 (whole entries,
/// default-route flags included) and leaves everything else unchanged.
pub fn compute_swap(config: &VpnConfig) -> Option<VpnConfig> {
    if !config.is_spoke() || config.hubs.len() < 2 {
        return None;
    }

    let mut next = config.clone();
    next.hubs.swap(0, 1);
    Some(next)
}
