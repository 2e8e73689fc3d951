//! Usage-alerting command handler.

use tabled::Tabled;

use merops_core::tasks::usage_scan::{self, UsageScanConfig};
use merops_core::{AlertEvent, TaskContext};

use crate::cli::{GlobalOpts, OutputFormat, UsageArgs};
use crate::error::CliError;
use crate::output;

use super::SkipRow;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Network")]
    name: String,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Mbps")]
    observed: String,
    #[tabled(rename = "Threshold Mbps")]
    threshold: String,
    #[tabled(rename = "Window")]
    window: String,
}

impl From<&AlertEvent> for AlertRow {
    fn from(event: &AlertEvent) -> Self {
        Self {
            name: event.name.clone(),
            interface: event.interface.clone(),
            observed: format!("{:.2}", event.observed_mbps()),
            threshold: format!("{:.2}", event.threshold_bps / 1_000_000.0),
            window: format!("{}s", event.window_secs),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &TaskContext,
    org: &str,
    args: UsageArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    for (field, value) in [
        ("coarse-fraction", args.coarse_fraction),
        ("fine-fraction", args.fine_fraction),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(CliError::Validation {
                field: field.into(),
                reason: format!("must be between 0 and 1, got {value}"),
            });
        }
    }

    let config = UsageScanConfig {
        coarse_fraction: args.coarse_fraction,
        fine_fraction: args.fine_fraction,
    };
    let report = usage_scan::run(ctx, org, &config).await?;

    match global.output {
        OutputFormat::Json => output::print_output(&output::render_json(&report), global.quiet),
        OutputFormat::Plain => {
            let mut ids: Vec<&str> = report
                .coarse_alerts
                .iter()
                .chain(&report.fine_alerts)
                .map(|a| a.network_id.as_str())
                .collect();
            ids.sort_unstable();
            ids.dedup();
            output::print_output(&ids.join("\n"), global.quiet);
        }
        OutputFormat::Table => {
            let coarse: Vec<AlertRow> = report.coarse_alerts.iter().map(Into::into).collect();
            let fine: Vec<AlertRow> = report.fine_alerts.iter().map(Into::into).collect();
            let skips: Vec<SkipRow> = report.skipped.iter().map(Into::into).collect();
            output::print_section(
                "Org-wide alerts (300s)",
                &output::render_table(&coarse),
                global.quiet,
            );
            output::print_section(
                "Per-site alerts (60s)",
                &output::render_table(&fine),
                global.quiet,
            );
            output::print_section("Skipped", &output::render_table(&skips), global.quiet);
            output::print_summary(
                &format!(
                    "Scanned {} networks in {} ms: {} org-wide alerts, {} per-site alerts, {} skipped",
                    report.networks_scanned,
                    report.elapsed_ms,
                    report.coarse_alerts.len(),
                    report.fine_alerts.len(),
                    report.skipped.len()
                ),
                global.quiet,
            );
        }
    }
    Ok(())
}
