//! Output coordination for human and JSON modes.
//!
//! Summaries go to stdout. Human mode prints short status lines, JSON mode
//! prints exactly one JSON document, quiet mode prints nothing.

use serde::Serialize;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Status lines with a leading check mark when stdout is a terminal
    Rich,
    /// Plain status lines (for piping)
    Plain,
    /// JSON output only
    Json,
    /// No output
    Quiet,
}

/// Central output coordinator that respects json/quiet modes.
#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    mode: OutputMode,
}

impl OutputContext {
    /// Create from CLI-style flags.
    #[must_use]
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else if std::env::var("NO_COLOR").is_ok() || !io::stdout().is_terminal() {
            OutputMode::Plain
        } else {
            OutputMode::Rich
        };
        Self { mode }
    }

    #[must_use]
    pub const fn with_mode(mode: OutputMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.mode == OutputMode::Quiet
    }

    /// Headline for a completed step.
    #[must_use]
    pub fn success_line(&self, message: &str) -> Option<String> {
        match self.mode {
            OutputMode::Rich => Some(format!("✓ {message}")),
            OutputMode::Plain => Some(message.to_string()),
            OutputMode::Json | OutputMode::Quiet => None,
        }
    }

    /// Indented detail line under a headline.
    #[must_use]
    pub fn detail_line(&self, message: &str) -> Option<String> {
        match self.mode {
            OutputMode::Rich | OutputMode::Plain => Some(format!("  {message}")),
            OutputMode::Json | OutputMode::Quiet => None,
        }
    }

    pub fn success(&self, message: &str) {
        if let Some(line) = self.success_line(message) {
            println!("{line}");
        }
    }

    pub fn detail(&self, message: &str) {
        if let Some(line) = self.detail_line(message) {
            println!("{line}");
        }
    }

    /// Print a JSON document in JSON mode; no-op otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the stdout write fails.
    pub fn json<T: Serialize>(&self, value: &T) -> crate::Result<()> {
        if !self.is_json() {
            return Ok(());
        }
        let payload = serde_json::to_string_pretty(value)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{payload}")?;
        Ok(())
    }
}
