use super::apply::read_patches;
use super::{print_report, read_document, write_json};
use crate::config::Config;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uidsl_editor::{CommitFilter, CommitMeta, EditSession, History, HistoryError};

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// History file (defaults to `historyFile` from uidsl.config.json)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: HistoryCommand,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// Start a history from a document
    Init {
        document: PathBuf,

        #[arg(short, long, default_value = "initial document")]
        message: String,

        /// Overwrite an existing history file
        #[arg(long)]
        force: bool,
    },

    /// Apply patches to the current document and commit the result
    Commit {
        patches: PathBuf,

        #[arg(short, long)]
        message: String,

        /// Overrides the configured author
        #[arg(long)]
        author: Option<String>,
    },

    /// Step back one commit
    Undo,

    /// Step forward one commit
    Redo,

    /// Move to a commit by id
    Checkout { id: String },

    /// Create a branch at the current commit
    Branch { name: String },

    /// Switch to a branch
    Switch { name: String },

    /// List commits, oldest first
    Log {
        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        branch: Option<String>,

        /// Only commits whose message contains this text
        #[arg(long)]
        grep: Option<String>,

        /// RFC 3339 timestamp
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        /// RFC 3339 timestamp
        #[arg(long)]
        until: Option<DateTime<Utc>>,

        /// Only the most recent N matches
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Print the document at the current commit
    Show {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_history(path: &Path) -> Result<History> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read history {}; run `uidsl history init` first", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid history {}", path.display()))
}

fn save_history(path: &Path, history: &History) -> Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    fs::write(path, json + "\n").with_context(|| format!("Cannot write {}", path.display()))
}

fn short(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn history(args: HistoryArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = args.file.clone().unwrap_or_else(|| config.history_path(cwd));

    match args.command {
        HistoryCommand::Init { document, message, force } => init(&path, &config, &document, &message, force),
        HistoryCommand::Commit { patches, message, author } => {
            let mut session = open_session(&path, &config)?;
            let patches = read_patches(&patches)?;
            let meta = CommitMeta::new(author.unwrap_or_else(|| config.session.author.clone()), message);
            let proposal = session.apply(patches, meta)?;
            if let Some(failure) = &proposal.failure {
                println!("   {} kept {} patch(es); {}", "⚠".yellow(), proposal.patches.len(), failure);
            }
            print_report(&path.display().to_string(), &proposal.report);
            if let Some(head) = session.history().head() {
                println!("   {} {} on {}", "Committed".green(), short(&head.id), head.branch);
            }
            save_history(&path, session.history())
        }
        HistoryCommand::Undo => {
            let mut session = open_session(&path, &config)?;
            if !session.undo() {
                println!("   Nothing to undo");
            }
            save_history(&path, session.history())
        }
        HistoryCommand::Redo => {
            let mut session = open_session(&path, &config)?;
            if !session.redo() {
                println!("   Nothing to redo");
            }
            save_history(&path, session.history())
        }
        HistoryCommand::Checkout { id } => {
            let mut session = open_session(&path, &config)?;
            let full = session
                .history()
                .commits(&CommitFilter::default())
                .iter()
                .find(|commit| commit.id.starts_with(id.as_str()))
                .map(|commit| commit.id.clone())
                .ok_or_else(|| HistoryError::CommitNotFound(id.clone()))?;
            session.checkout(&full);
            save_history(&path, session.history())
        }
        HistoryCommand::Branch { name } => {
            let mut session = open_session(&path, &config)?;
            session.create_branch(&name)?;
            println!("   {} {}", "Created branch".green(), name);
            save_history(&path, session.history())
        }
        HistoryCommand::Switch { name } => {
            let mut session = open_session(&path, &config)?;
            session.switch_branch(&name)?;
            println!("   {} {}", "Switched to".green(), name);
            save_history(&path, session.history())
        }
        HistoryCommand::Log { author, branch, grep, since, until, limit, json } => {
            let session = open_session(&path, &config)?;
            let filter = CommitFilter {
                author,
                branch,
                message_contains: grep,
                since,
                until,
                limit,
            };
            print_log(session.history(), &filter, json)
        }
        HistoryCommand::Show { output } => {
            let session = open_session(&path, &config)?;
            debug!(cursor = ?session.history().cursor(), "showing current document");
            write_json(session.document(), output.as_ref())
        }
    }
}

fn open_session(path: &Path, config: &Config) -> Result<EditSession> {
    let history = load_history(path)?;
    debug!(path = %path.display(), commits = history.len(), "loaded history");
    EditSession::from_history(history, config.session.clone())
        .ok_or_else(|| anyhow::anyhow!("History {} has no commits", path.display()))
}

fn init(path: &Path, config: &Config, document: &Path, message: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "History {} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    let document = read_document(document)?;
    let mut session = EditSession::new(document.clone(), config.session.clone());
    let report = session.start(document, session.meta(message))?;
    print_report(&path.display().to_string(), &report);
    save_history(path, session.history())?;
    println!("   {} {}", "Initialized".green(), path.display());
    Ok(())
}

fn print_log(history: &History, filter: &CommitFilter, as_json: bool) -> Result<()> {
    let head = history.head().map(|commit| commit.id.as_str());
    let commits = history.commits(filter);

    if as_json {
        let entries: Vec<_> = commits
            .iter()
            .map(|commit| {
                json!({
                    "id": commit.id,
                    "parentId": commit.parent_id,
                    "branch": commit.branch,
                    "author": commit.meta.author,
                    "message": commit.meta.message,
                    "timestamp": commit.meta.timestamp,
                    "patches": commit.patches.len(),
                    "head": Some(commit.id.as_str()) == head,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for commit in commits {
        let marker = if Some(commit.id.as_str()) == head { "*".green().bold() } else { " ".normal() };
        println!(
            "{} {} {} {} {} {}",
            marker,
            short(&commit.id).yellow(),
            format!("({})", commit.branch).cyan(),
            commit.meta.timestamp.format("%Y-%m-%d %H:%M:%S"),
            commit.meta.author.dimmed(),
            commit.meta.message
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(dir: &Path, command: HistoryCommand) -> Result<()> {
        history(HistoryArgs { file: None, command }, &dir.display().to_string())
    }

    #[test]
    fn test_init_commit_undo_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("page.json");
        fs::write(
            &document,
            r#"{ "id": "p", "kind": "page", "sections": [{ "id": "s", "kind": "hero", "title": "Hi", "content": [] }] }"#,
        )
        .unwrap();
        let patches = dir.path().join("rename.json");
        fs::write(&patches, r#"{ "op": "renameSection", "target": "s", "value": "Hello" }"#).unwrap();

        run(dir.path(), HistoryCommand::Init { document: document.clone(), message: "init".into(), force: false }).unwrap();
        assert!(run(dir.path(), HistoryCommand::Init { document, message: "again".into(), force: false }).is_err());

        run(dir.path(), HistoryCommand::Commit { patches, message: "rename".into(), author: Some("ana".into()) }).unwrap();
        let saved = load_history(&dir.path().join("uidsl.history.json")).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.head().map(|c| c.meta.author.as_str()), Some("ana"));

        run(dir.path(), HistoryCommand::Undo).unwrap();
        let saved = load_history(&dir.path().join("uidsl.history.json")).unwrap();
        assert_eq!(saved.cursor(), Some(0));

        let err = run(dir.path(), HistoryCommand::Checkout { id: "zzzz".into() }).unwrap_err();
        assert!(err.to_string().contains("Commit not found"));
    }

    #[test]
    fn test_branch_switch_and_show_use_the_saved_history() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("table.json");
        fs::write(&document, r#"{ "id": "t", "kind": "table", "columns": [{ "id": "c", "key": "id" }] }"#).unwrap();
        run(dir.path(), HistoryCommand::Init { document, message: "init".into(), force: false }).unwrap();

        run(dir.path(), HistoryCommand::Branch { name: "draft".into() }).unwrap();
        assert!(run(dir.path(), HistoryCommand::Branch { name: "draft".into() }).is_err());
        run(dir.path(), HistoryCommand::Switch { name: "draft".into() }).unwrap();

        let saved = load_history(&dir.path().join("uidsl.history.json")).unwrap();
        assert_eq!(saved.active_branch(), "draft");

        let shown = dir.path().join("shown.json");
        run(dir.path(), HistoryCommand::Show { output: Some(shown.clone()) }).unwrap();
        let text = fs::read_to_string(&shown).unwrap();
        assert!(text.contains("\"columns\""));
    }

    #[test]
    fn test_missing_history_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), HistoryCommand::Undo).unwrap_err();
        assert!(err.to_string().contains("history init"));
    }
}
