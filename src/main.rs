use clap::Parser;
use std::io::{self, IsTerminal};
use tasksheet::cli::commands;
use tasksheet::cli::{Cli, Commands};
use tasksheet::logging::init_logging;
use tasksheet::output::OutputContext;
use tasksheet::{StructuredError, TaskSheetError};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let ctx = OutputContext::from_flags(cli.json, cli.quiet);
    let config_file = cli.config.as_deref();

    let result = match &cli.command {
        Commands::Consolidate(args) => commands::consolidate::execute(args, config_file, &ctx),
        Commands::Update(args) => commands::update::execute(args, config_file, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Version => commands::version::execute(&ctx),
    };

    if let Err(e) = result {
        handle_error(&e, cli.json);
    }
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
/// Otherwise, outputs human-readable error with optional color.
fn handle_error(err: &TaskSheetError, json_mode: bool) -> ! {
    tracing::debug!(error = %err, "Command failed");
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}
