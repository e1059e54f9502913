//! Logging setup for `tasksheet`.
//!
//! Logs go to stderr so stdout stays clean for the run summary and `--json`
//! payloads. `RUST_LOG` always wins over the verbosity flags.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Map the CLI verbosity flags to a default filter directive.
#[must_use]
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "tasksheet=debug,info",
        _ => "tasksheet=trace,debug",
    }
}

fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose, quiet)))
}

/// Initialize the global tracing subscriber.
///
/// When `log_file` is set, log lines are written there as JSON instead of to
/// stderr.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = build_filter(verbose, quiet);

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    Ok(())
}

/// Best-effort subscriber for tests; repeated calls are ignored.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("tasksheet=debug"))
        .with_test_writer()
        .try_init();
}
