//! Task runners: the three orchestrations the CLI exposes.
//!
//! Each runner follows the same shape: a fatal phase-1 discovery call,
//! bounded fan-out fetches correlated by network id, a single-threaded
//! reducer over the completed batch, then (for writers) a fan-out of
//! write-backs. Phases are strict barriers -- a batch fully completes
//! before the next phase starts.

pub mod hub_swap;
pub mod tag_sync;
pub mod usage_scan;

use merops_api::DashboardClient;

use crate::fanout::DEFAULT_CONCURRENCY;
use crate::gateway::Gateway;

/// Everything a task runner needs: the API client, the retry gateway,
/// and the fan-out concurrency ceiling.
pub struct TaskContext {
    pub client: DashboardClient,
    pub gateway: Gateway,
    pub concurrency: usize,
}

impl TaskContext {
    pub fn new(client: DashboardClient) -> Self {
        Self {
            client,
            gateway: Gateway::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_gateway(mut self, gateway: Gateway) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
