//! Clap derive structures for the `merops` CLI.
//!
//! One subcommand per operational task, plus global flags shared by all
//! of them.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// merops -- operational automation for Meraki dashboard organizations
#[derive(Debug, Parser)]
#[command(
    name = "merops",
    version,
    about = "Automate uplink alerting, hub tagging, and VPN failover for a dashboard org",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Organization ID
    #[arg(long, env = "MERAKI_ORG_ID", global = true)]
    pub org: Option<String>,

    /// Dashboard API key
    #[arg(long, env = "MERAKI_DASHBOARD_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Dashboard base URL
    #[arg(long, env = "MERAKI_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum simultaneously in-flight API requests
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty tables plus a summary line
    Table,
    /// Pretty-printed JSON report
    Json,
    /// Affected network ids, one per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan uplink utilization and alert on threshold breaches
    Usage(UsageArgs),

    /// Tag spoke networks with their primary VPN hub
    TagSync(TagSyncArgs),

    /// Swap primary and secondary VPN hubs on tagged spokes
    HubSwap(HubSwapArgs),
}

#[derive(Debug, Args)]
pub struct UsageArgs {
    /// Fraction of the upload limit that triggers the org-wide 300s pass
    #[arg(long, default_value_t = merops_core::threshold::DEFAULT_COARSE_FRACTION)]
    pub coarse_fraction: f64,

    /// Fraction of the upload limit that triggers the per-site 60s pass
    #[arg(long, default_value_t = merops_core::threshold::DEFAULT_FINE_FRACTION)]
    pub fine_fraction: f64,
}

#[derive(Debug, Args)]
pub struct TagSyncArgs {
    /// Prefix identifying the hub tags this tool owns
    #[arg(long, default_value = merops_core::tags::DEFAULT_HUB_TAG_PREFIX)]
    pub prefix: String,

    /// Compute and report updates without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct HubSwapArgs {
    /// Only consider networks carrying this tag
    #[arg(long)]
    pub tag: String,

    /// Compute and report swaps without writing them
    #[arg(long)]
    pub dry_run: bool,
}
