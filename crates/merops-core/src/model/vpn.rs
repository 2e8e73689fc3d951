use serde::Serialize;
use strum::{Display, EnumString};

/// Site-to-site VPN role of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VpnMode {
    Hub,
    Spoke,
    None,
}

/// One hub entry in a spoke's priority list (index 0 = primary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpnHub {
    pub hub_id: String,
    pub use_default_route: Option<bool>,
}

/// A local subnet exported (or not) into the VPN. Carried through swap
/// write-backs untouched.
#[derive(Debug, Clone, Serialize)]
pub struct VpnSubnet {
    pub local_subnet: String,
    pub use_vpn: Option<bool>,
}

/// Site-to-site VPN configuration for one network.
///
/// Invariant: hub-priority swaps only apply when `mode` is spoke and
/// `hubs` has at least two entries.
#[derive(Debug, Clone, Serialize)]
pub struct VpnConfig {
    pub network_id: String,
    pub mode: VpnMode,
    pub hubs: Vec<VpnHub>,
    pub subnets: Vec<VpnSubnet>,
}

impl VpnConfig {
    /// The primary hub id, if any hubs are configured.
    pub fn primary_hub(&self) -> Option<&str> {
        self.hubs.first().map(|h| h.hub_id.as_str())
    }

    pub fn is_spoke(&self) -> bool {
        self.mode == VpnMode::Spoke
    }
}
