use super::{eprint_report, read_document, write_json};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uidsl_editor::{apply_all, Patch};
use uidsl_validator::{validate_with, ValidateOptions};

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Document to patch
    pub document: PathBuf,

    /// JSON file holding one patch or an array of patches
    pub patches: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep the patches before a failing one instead of discarding the batch
    #[arg(long)]
    pub no_atomic: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PatchFile {
    Batch(Vec<Patch>),
    Single(Patch),
}

/// Read a patch file: a single patch or an array of patches
pub fn read_patches(path: &Path) -> Result<Vec<Patch>> {
    let text = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let file: PatchFile =
        serde_json::from_str(&text).with_context(|| format!("Invalid patches in {}", path.display()))?;
    debug!(path = %path.display(), "read patch file");
    Ok(match file {
        PatchFile::Batch(patches) => patches,
        PatchFile::Single(patch) => vec![patch],
    })
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let atomic = config.session.atomic_batches && !args.no_atomic;

    let document = read_document(&args.document)?;
    let patches = read_patches(&args.patches)?;
    info!(patches = patches.len(), atomic, "applying batch");

    let result = match apply_all(&document, &patches) {
        Ok(result) => result,
        Err(err) if atomic => return Err(err.into()),
        Err(err) => {
            eprintln!(
                "{} patch {} ({}) failed, keeping the {} before it: {}",
                "⚠".yellow(),
                err.index,
                err.error.op,
                err.index,
                err.error.reason
            );
            *err.partial
        }
    };

    let report = validate_with(
        &result,
        ValidateOptions {
            registry: None,
            warnings_as_errors: config.session.warnings_as_errors,
        },
    );
    if !report.valid || !report.warnings.is_empty() {
        eprintln!("Result has diagnostics:");
        eprint_report(&args.document.display().to_string(), &report);
    }

    write_json(&result, args.output.as_ref())
}
