//! Hub-swap command handler.

use tabled::Tabled;

use merops_core::tasks::hub_swap::{self, HubSwapConfig};
use merops_core::{SwappedHub, TaskContext};

use crate::cli::{GlobalOpts, HubSwapArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::SkipRow;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SwapRow {
    #[tabled(rename = "Network")]
    name: String,
    #[tabled(rename = "New primary")]
    new_primary: String,
    #[tabled(rename = "New secondary")]
    new_secondary: String,
}

impl From<&SwappedHub> for SwapRow {
    fn from(swap: &SwappedHub) -> Self {
        Self {
            name: swap.name.clone(),
            new_primary: swap.new_primary.clone(),
            new_secondary: swap.new_secondary.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &TaskContext,
    org: &str,
    args: HubSwapArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.tag.is_empty() {
        return Err(CliError::Validation {
            field: "tag".into(),
            reason: "must not be empty".into(),
        });
    }

    let config = HubSwapConfig {
        tag: args.tag,
        dry_run: args.dry_run,
    };
    let report = hub_swap::run(ctx, org, &config).await?;

    match global.output {
        OutputFormat::Json => output::print_output(&output::render_json(&report), global.quiet),
        OutputFormat::Plain => {
            let ids: Vec<&str> = report
                .swapped
                .iter()
                .map(|s| s.network_id.as_str())
                .collect();
            output::print_output(&ids.join("\n"), global.quiet);
        }
        OutputFormat::Table => {
            let rows: Vec<SwapRow> = report.swapped.iter().map(Into::into).collect();
            let skips: Vec<SkipRow> = report.skipped.iter().map(Into::into).collect();
            let title = if report.dry_run {
                "Hub swaps (dry run, not written)"
            } else {
                "Hub swaps"
            };
            output::print_section(title, &output::render_table(&rows), global.quiet);
            output::print_section("Skipped", &output::render_table(&skips), global.quiet);
            output::print_summary(
                &format!(
                    "{} {} spokes ({} not applicable, {} skipped) in {} ms",
                    if report.dry_run { "Would swap" } else { "Swapped" },
                    report.swapped.len(),
                    report.not_applicable,
                    report.skipped.len(),
                    report.elapsed_ms
                ),
                global.quiet,
            );
        }
    }
    Ok(())
}
