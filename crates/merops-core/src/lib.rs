// merops-core: orchestration and domain logic for dashboard operations
//
// The shape of every task: a rate-limit-aware gateway wraps each call,
// a bounded fan-out multiplexes independent calls, a correlation store
// matches out-of-order results back to their network, and pure domain
// functions (threshold, tag, hub-swap decisions) turn payloads into
// reports or write-backs.

pub mod convert;
pub mod correlate;
pub mod error;
pub mod fanout;
pub mod gateway;
pub mod hubs;
pub mod model;
pub mod report;
pub mod tags;
pub mod tasks;
pub mod threshold;

pub use correlate::CorrelationStore;
pub use error::{CallError, ConfigurationGap, CoreError};
pub use gateway::Gateway;
pub use model::{
    AlertEvent, BandwidthLimits, NetworkRecord, TagUpdate, UplinkSample, VpnConfig, VpnHub,
    VpnMode, VpnSubnet,
};
pub use report::{HubSwapReport, Skip, SwappedHub, TagSyncReport, UsageReport};
pub use tasks::TaskContext;
pub use threshold::ScanProfile;
