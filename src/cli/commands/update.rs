//! Update command implementation.

use super::{resolve_settings, run_date};
use crate::cli::UpdateArgs;
use crate::config::CliOverrides;
use crate::error::Result;
use crate::output::OutputContext;
use crate::update::{UpdateConfig, UpdateReport, update_file};
use std::path::Path;

fn overrides_from_args(args: &UpdateArgs) -> CliOverrides {
    CliOverrides {
        output: args.file.clone(),
        roadmap: args.roadmap.clone(),
        environment: args.environment.clone(),
        date: args.date.clone(),
        ..CliOverrides::default()
    }
}

/// Execute the update command.
///
/// The master table is the configured `output`, which `--file` overrides.
///
/// # Errors
///
/// Returns an error if configuration, input, or output handling fails.
pub fn execute(args: &UpdateArgs, config_file: Option<&Path>, ctx: &OutputContext) -> Result<()> {
    let settings = resolve_settings(config_file, &overrides_from_args(args))?;
    let config = UpdateConfig {
        path: settings.output.clone(),
        roadmap: settings.roadmap.clone(),
        last_updated: run_date(&settings)?,
        environment: settings.environment,
    };

    let report = update_file(&config)?;
    if ctx.is_json() {
        return ctx.json(&report);
    }
    print_report(&report, ctx);
    Ok(())
}

fn print_report(report: &UpdateReport, ctx: &OutputContext) {
    ctx.success(&format!(
        "Updated {} ({} rows)",
        report.path.display(),
        report.total
    ));
    ctx.detail(&format!("Test instructions backfilled: {}", report.backfilled));
    match &report.first_new_id {
        Some(first) => ctx.detail(&format!(
            "Roadmap tasks appended: {} (starting at {first})",
            report.appended
        )),
        None => ctx.detail("Roadmap tasks appended: 0"),
    }
    if report.skipped > 0 {
        ctx.detail(&format!("Already present, skipped: {}", report.skipped));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn file_overrides_output() {
        let args = UpdateArgs {
            file: Some(PathBuf::from("master.csv")),
            ..UpdateArgs::default()
        };
        let layer = overrides_from_args(&args).as_layer();
        assert_eq!(layer.get("output"), Some("master.csv"));
        assert!(layer.get("roadmap").is_none());
    }
}
