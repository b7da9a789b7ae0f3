use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;
use std::io::{self, Write};
use streamcheck_models::WatchlistReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.status("success", Some("✓".green().to_string()), msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.status("warning", Some("⚠".yellow().to_string()), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.status("info", None, msg.as_ref());
    }

    // Status lines go to stderr so stdout carries only the report
    fn status(&self, kind: &str, marker: Option<String>, msg: &str) {
        let mut stderr = io::stderr().lock();
        let _ = self.write_status(&mut stderr, kind, marker.as_deref(), msg);
    }

    fn write_status<W: Write>(
        &self,
        out: &mut W,
        kind: &str,
        marker: Option<&str>,
        msg: &str,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        match (self.format, marker) {
            (OutputFormat::Human, Some(marker)) => writeln!(out, "{} {}", marker, msg),
            (OutputFormat::Human, None) => writeln!(out, "{}", msg),
            (OutputFormat::Json | OutputFormat::JsonPretty, _) => {
                writeln!(out, "{}", self.encode(&json!({"type": kind, "message": msg})))
            }
        }
    }

    /// Print the report on stdout. This is the command's result, so quiet
    /// mode does not suppress it.
    pub fn report(&self, report: &WatchlistReport) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => {
                let mut stdout = io::stdout().lock();
                write!(stdout, "{}", report)?;
                stdout.flush()
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let value = serde_json::to_value(report)?;
                self.json(&value);
                Ok(())
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        println!("{}", self.encode(data));
    }

    fn encode(&self, data: &serde_json::Value) -> String {
        match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data).unwrap_or_default(),
            _ => serde_json::to_string(data).unwrap_or_default(),
        }
    }
}
