//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Consolidate, deduplicate and extend a master tasks CSV
#[derive(Parser, Debug)]
#[command(name = "tasksheet", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ./tasksheet.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write logs to this file as JSON lines instead of stderr
    #[arg(long, global = true, env = "TASKSHEET_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the master table from the task-status and test-scenario tables
    Consolidate(ConsolidateArgs),

    /// Backfill an existing master table and append the roadmap batch
    Update(UpdateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ConsolidateArgs {
    /// Task-status table (Category, Priority, Task, Status, StatusNotes, CursorPrompt)
    #[arg(long)]
    pub tasks: Option<PathBuf>,

    /// Test-scenario table (Feature, Scenario, TestSteps, ExpectedResult)
    #[arg(long)]
    pub test_matrix: Option<PathBuf>,

    /// Master table to write
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Run date for Last Updated (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Environment for rows that do not name one
    #[arg(long)]
    pub environment: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct UpdateArgs {
    /// Master table to update in place (default: the configured output)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// YAML roadmap file to append instead of the built-in batch
    #[arg(long)]
    pub roadmap: Option<PathBuf>,

    /// Run date for Last Updated (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Environment for roadmap entries that do not name one
    #[arg(long)]
    pub environment: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    #[value(name = "powershell")]
    #[value(alias = "pwsh")]
    /// `PowerShell`
    PowerShell,
    /// Elvish
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tasksheet",
            "consolidate",
            "--tasks",
            "in.csv",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        let Commands::Consolidate(args) = cli.command else {
            panic!("expected consolidate");
        };
        assert_eq!(args.tasks, Some(PathBuf::from("in.csv")));
        assert!(args.output.is_none());
    }

    #[test]
    fn update_accepts_roadmap_file() {
        let cli = Cli::try_parse_from([
            "tasksheet",
            "update",
            "--file",
            "m.csv",
            "--roadmap",
            "r.yaml",
        ])
        .unwrap();
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(args.roadmap, Some(PathBuf::from("r.yaml")));
    }

    #[test]
    fn pwsh_alias_parses() {
        let cli = Cli::try_parse_from(["tasksheet", "completions", "pwsh"]).unwrap();
        let Commands::Completions(args) = cli.command else {
            panic!("expected completions");
        };
        assert_eq!(args.shell, ShellType::PowerShell);
    }
}
