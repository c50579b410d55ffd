use super::print_report;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uidsl_validator::{validate_json, ValidateOptions, ValidationReport};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document file or directory of documents
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long)]
    pub warnings_as_errors: bool,
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let warnings_as_errors = args.warnings_as_errors || config.session.warnings_as_errors;

    let files = if args.input.is_file() {
        vec![args.input.clone()]
    } else if args.input.is_dir() {
        find_documents(&args.input)
    } else {
        return Err(anyhow::anyhow!("Input path does not exist: {}", args.input.display()));
    };

    let mut reports = Vec::new();
    for file in &files {
        let text = fs::read_to_string(file)?;
        let report = validate_json(
            &text,
            ValidateOptions {
                registry: None,
                warnings_as_errors,
            },
        );
        reports.push((file.display().to_string(), report));
    }

    let total_errors: usize = reports.iter().map(|(_, r)| r.errors.len()).sum();
    let total_warnings: usize = reports.iter().map(|(_, r)| r.warnings.len()).sum();

    match args.format {
        OutputFormat::Json => {
            let out: Vec<FileReport> = reports
                .iter()
                .map(|(file, report)| FileReport { file: file.clone(), report })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for (file, report) in &reports {
                print_report(file, report);
            }
            println!();
            println!("   Files checked: {}", files.len());
            if total_errors > 0 {
                println!("   {} {}", "Errors:".red(), total_errors);
            }
            if total_warnings > 0 {
                println!("   {} {}", "Warnings:".yellow(), total_warnings);
            }
            if total_errors == 0 && total_warnings == 0 {
                println!("   {} No issues found!", "✓".green());
            }
        }
    }

    if total_errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// `.json` files under `dir`, minus config and history files
fn find_documents(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .filter(|path| {
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            name != DEFAULT_CONFIG_NAME && !name.ends_with(".history.json")
        })
        .collect();
    files.sort();
    files
}
