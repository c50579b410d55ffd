pub mod apply;
pub mod history;
pub mod resolve;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use history::{history, HistoryArgs};
pub use resolve::{resolve, ResolveArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uidsl_model::Document;
use uidsl_validator::{DiagnosticLevel, ValidationReport};

/// Read and hydrate a document from disk
pub fn read_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    Document::from_json_str(&text).with_context(|| format!("Invalid document {}", path.display()))
}

/// Pretty JSON to `output`, or stdout when absent
pub fn write_json<T: Serialize>(value: &T, output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json + "\n").with_context(|| format!("Cannot write {}", path.display()))?;
            println!("   {} {}", "Wrote".green(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Human-readable diagnostics of one report, on stdout
pub fn print_report(label: &str, report: &ValidationReport) {
    print!("{}", render_report(label, report));
}

/// Same as [`print_report`] but on stderr, for commands whose stdout is JSON
pub fn eprint_report(label: &str, report: &ValidationReport) {
    eprint!("{}", render_report(label, report));
}

fn render_report(label: &str, report: &ValidationReport) -> String {
    let status = if report.valid { "✓".green() } else { "✗".red() };
    let mut out = format!("{} {}\n", status, label);

    for diagnostic in report.diagnostics() {
        let level = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
        };
        let at = diagnostic.path.as_deref().unwrap_or("$");
        out += &format!("  {} [{}] {} {}\n", level, diagnostic.code, diagnostic.message, at.dimmed());

        if let Some(suggestion) = &diagnostic.suggestion {
            out += &format!("    {} {}\n", "💡".dimmed(), suggestion.dimmed());
        }
    }
    out
}
