use serde::Serialize;

/// One network in the organization, as the tasks see it.
///
/// Read-only except for the tag sequence, which the tag reconciler
/// replaces wholesale. The dashboard allows duplicate tags; this logic
/// treats the sequence as a set while preserving order.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkRecord {
    pub id: String,
    pub name: String,
    pub product_types: Vec<String>,
    pub tags: Vec<String>,
}

impl NetworkRecord {
    /// Whether this network contains an MX/Z security appliance -- the
    /// only product type with uplinks and site-to-site VPN.
    pub fn is_appliance(&self) -> bool {
        self.product_types.iter().any(|p| p == "appliance")
    }
}

/// A pending tag write-back: the reconciled sequence for one network.
#[derive(Debug, Clone, Serialize)]
pub struct TagUpdate {
    pub network_id: String,
    pub name: String,
    pub tags: Vec<String>,
}
