//! Domain model: networks, uplink samples, bandwidth limits, VPN configs.
//!
//! All entities are created fresh per run and discarded after the summary;
//! nothing here persists or is shared across concurrent writers.

mod network;
mod uplink;
mod vpn;

pub use network::{NetworkRecord, TagUpdate};
pub use uplink::{AlertEvent, BandwidthLimits, UplinkSample};
pub use vpn::{VpnConfig, VpnHub, VpnMode, VpnSubnet};
