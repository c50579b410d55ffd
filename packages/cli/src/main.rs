mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, history, resolve, validate, ApplyArgs, HistoryArgs, ResolveArgs, ValidateArgs};

/// uidsl - validate, patch and version UI-DSL documents
#[derive(Parser, Debug)]
#[command(name = "uidsl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a document, or every .json document under a directory
    Validate(ValidateArgs),

    /// Apply a batch of patches to a document
    Apply(ApplyArgs),

    /// Locate a node by id, path or external tag
    Resolve(ResolveArgs),

    /// Commit, undo, redo and branch a document's history
    History(HistoryArgs),
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Validate(args) => validate(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Resolve(args) => resolve(args, &cwd),
        Command::History(args) => history(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
