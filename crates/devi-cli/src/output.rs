//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use devi_core::application::{FileOutcome, GenerationReport};
use owo_colors::OwoColorize;
use serde_json::json;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            // JSON output carries reports only
            quiet: args.quiet || resolved_format == OutputFormat::Json,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
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

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.decorated("\u{2713}", msg, |s| s.green().to_string())
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.decorated("\u{26a0}", msg, |s| s.yellow().to_string())
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.decorated("\u{2139}", msg, |s| s.blue().to_string())
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

    /// One job's per-file outcomes followed by a summary line.
    ///
    /// Failures are printed even in quiet mode.
    pub fn report(&self, report: &GenerationReport) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.term.write_line(&report_json(report).to_string());
        }

        self.header(&format!("{} → {}", report.label, report.target_root.display()))?;
        for file in &report.files {
            let target = file.entry.target.to_string();
            match &file.outcome {
                FileOutcome::Written => self.print(&format!("  {} {target}", self.paint("+", Paint::Green)))?,
                FileOutcome::Planned => self.print(&format!("  {} {target}", self.paint("~", Paint::Blue)))?,
                FileOutcome::Skipped => self.print(&format!("  {} {target} (kept)", self.paint("=", Paint::Yellow)))?,
                FileOutcome::Failed(e) => self
                    .term
                    .write_line(&format!("  {} {target}: {e}", self.paint("!", Paint::Red)))?,
            }
        }

        if report.planned() > 0 {
            self.info(&format!("{} file(s) would be generated", report.planned()))
        } else {
            self.success(&format!(
                "{} written, {} skipped, {} failed",
                report.written(),
                report.skipped(),
                report.failures().count()
            ))
        }
    }

    // ── Internal ──────────────────────────────────────────────────────────

    fn decorated(&self, icon: &str, msg: &str, color: impl Fn(&str) -> String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{icon} {msg}")
        } else {
            format!("{} {}", color(icon).bold(), color(msg))
        };
        self.term.write_line(&line)
    }

    fn paint(&self, text: &str, paint: Paint) -> String {
        if self.no_color {
            return text.to_owned();
        }
        match paint {
            Paint::Green => text.green().to_string(),
            Paint::Blue => text.blue().to_string(),
            Paint::Yellow => text.yellow().to_string(),
            Paint::Red => text.red().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Paint {
    Green,
    Blue,
    Yellow,
    Red,
}

fn report_json(report: &GenerationReport) -> serde_json::Value {
    let files: Vec<_> = report
        .files
        .iter()
        .map(|file| {
            let (outcome, error) = match &file.outcome {
                FileOutcome::Written => ("written", None),
                FileOutcome::Skipped => ("skipped", None),
                FileOutcome::Planned => ("planned", None),
                FileOutcome::Failed(e) => ("failed", Some(e.to_string())),
            };
            json!({
                "source": file.entry.source.to_string(),
                "target": file.entry.target.to_string(),
                "outcome": outcome,
                "error": error,
            })
        })
        .collect();

    json!({
        "job": report.label,
        "id": report.job_id.to_string(),
        "target_root": report.target_root.display().to_string(),
        "files": files,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
