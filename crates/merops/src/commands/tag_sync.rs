//! Tag-sync command handler.

use tabled::Tabled;

use merops_core::tasks::tag_sync::{self, TagSyncConfig};
use merops_core::{TagUpdate, TaskContext};

use crate::cli::{GlobalOpts, OutputFormat, TagSyncArgs};
use crate::error::CliError;
use crate::output;

use super::SkipRow;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Network")]
    name: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&TagUpdate> for TagRow {
    fn from(update: &TagUpdate) -> Self {
        Self {
            name: update.name.clone(),
            tags: update.tags.join(" "),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &TaskContext,
    org: &str,
    args: TagSyncArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.prefix.is_empty() {
        return Err(CliError::Validation {
            field: "prefix".into(),
            reason: "must not be empty".into(),
        });
    }

    let config = TagSyncConfig {
        prefix: args.prefix,
        dry_run: args.dry_run,
    };
    let report = tag_sync::run(ctx, org, &config).await?;

    match global.output {
        OutputFormat::Json => output::print_output(&output::render_json(&report), global.quiet),
        OutputFormat::Plain => {
            let ids: Vec<&str> = report
                .updated
                .iter()
                .map(|u| u.network_id.as_str())
                .collect();
            output::print_output(&ids.join("\n"), global.quiet);
        }
        OutputFormat::Table => {
            let rows: Vec<TagRow> = report.updated.iter().map(Into::into).collect();
            let skips: Vec<SkipRow> = report.skipped.iter().map(Into::into).collect();
            let title = if report.dry_run {
                "Tag updates (dry run, not written)"
            } else {
                "Tag updates"
            };
            output::print_section(title, &output::render_table(&rows), global.quiet);
            output::print_section("Skipped", &output::render_table(&skips), global.quiet);
            output::print_summary(
                &format!(
                    "{} {} networks ({} unchanged, {} skipped) in {} ms",
                    if report.dry_run { "Would update" } else { "Updated" },
                    report.updated.len(),
                    report.unchanged,
                    report.skipped.len(),
                    report.elapsed_ms
                ),
                global.quiet,
            );
        }
    }
    Ok(())
}
