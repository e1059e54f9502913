//! Consolidate command implementation.

use super::{resolve_settings, run_date};
use crate::cli::ConsolidateArgs;
use crate::config::CliOverrides;
use crate::consolidate::{ConsolidateConfig, ConsolidateReport, consolidate_files};
use crate::error::Result;
use crate::output::OutputContext;
use std::path::Path;

fn overrides_from_args(args: &ConsolidateArgs) -> CliOverrides {
    CliOverrides {
        tasks: args.tasks.clone(),
        test_matrix: args.test_matrix.clone(),
        output: args.output.clone(),
        environment: args.environment.clone(),
        date: args.date.clone(),
        ..CliOverrides::default()
    }
}

/// Execute the consolidate command.
///
/// # Errors
///
/// Returns an error if configuration, input, or output handling fails.
pub fn execute(args: &ConsolidateArgs, config_file: Option<&Path>, ctx: &OutputContext) -> Result<()> {
    let settings = resolve_settings(config_file, &overrides_from_args(args))?;
    let config = ConsolidateConfig {
        tasks_path: settings.tasks.clone(),
        test_matrix_path: settings.test_matrix.clone(),
        output_path: settings.output.clone(),
        last_updated: run_date(&settings)?,
        environment: settings.environment,
    };

    let report = consolidate_files(&config)?;
    if ctx.is_json() {
        return ctx.json(&report);
    }
    print_report(&report, ctx);
    Ok(())
}

fn print_report(report: &ConsolidateReport, ctx: &OutputContext) {
    ctx.success(&format!(
        "Consolidated {} unique tasks into {}",
        report.total,
        report.output.display()
    ));
    ctx.detail(&format!("From input files: {}", report.from_inputs));
    ctx.detail(&format!("Known issues added: {}", report.known_issues));
    ctx.detail(&format!("Duplicates merged: {}", report.duplicates_merged));
    if report.test_matrix_found {
        ctx.detail(&format!("Test scenarios attached: {}", report.matrix_matched));
    } else {
        ctx.detail("Test scenario table not found");
    }
    ctx.detail(&format!("Test instructions generated: {}", report.backfilled));
}
