//! Output management and formatting.

use std::io;

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use strata_core::domain::ExecutionPlan;

use crate::cli::global::GlobalArgs;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// Colour is also dropped when stdout is not a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let term = Term::stdout();
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !term.is_term(),
            term,
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Output the user explicitly asked for (`describe`, `config get`).
    /// Written even in quiet mode.
    pub fn document(&self, text: &str) -> io::Result<()> {
        self.term.write_line(text.trim_end_matches('\n'))
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// A value rendered as YAML; suppressed in quiet mode.
    pub fn yaml<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        if self.quiet {
            return Ok(());
        }
        self.document(&to_yaml(value)?)?;
        Ok(())
    }

    /// The command about to run, `Executing command: <line>`, preceded by
    /// any environment variables the plan sets.
    pub fn command(&self, plan: &ExecutionPlan) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if !plan.env.is_empty() {
            self.term.write_line("Using ENV vars:")?;
            for (key, value) in &plan.env {
                self.term.write_line(&format!("  {key}={value}"))?;
            }
        }
        let line = plan.command_line();
        let line = if self.no_color {
            format!("Executing command: {line}")
        } else {
            format!("{} {}", "Executing command:".bold(), line.dimmed())
        };
        self.term.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }
}

/// Render any serialisable value as YAML.
pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_yaml::to_string(value).map_err(|e| CliError::Serialization {
        format: "YAML",
        message: e.to_string(),
    })
}

/// Render any serialisable value as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Serialization {
        format: "JSON",
        message: e.to_string(),
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
