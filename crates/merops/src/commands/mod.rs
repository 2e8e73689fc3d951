//! Command dispatch: bridges CLI args -> core task runners -> output.

pub mod hub_swap;
pub mod tag_sync;
pub mod usage;

use merops_core::TaskContext;
use tabled::Tabled;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to its handler.
pub async fn dispatch(
    cmd: Command,
    ctx: &TaskContext,
    org: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Usage(args) => usage::handle(ctx, org, args, global).await,
        Command::TagSync(args) => tag_sync::handle(ctx, org, args, global).await,
        Command::HubSwap(args) => hub_swap::handle(ctx, org, args, global).await,
    }
}

// ── Shared table rows ───────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct SkipRow {
    #[tabled(rename = "Network")]
    pub network_id: String,
    #[tabled(rename = "Reason")]
    pub reason: String,
}

impl From<&merops_core::Skip> for SkipRow {
    fn from(skip: &merops_core::Skip) -> Self {
        Self {
            network_id: skip.network_id.clone(),
            reason: skip.reason.clone(),
        }
    }
}
