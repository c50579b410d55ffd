//! # History
//!
//! Linear commit log with a cursor and named branch pointers.
//!
//! ## Design
//!
//! - Each commit snapshots the document `before` and `after` its patches
//! - Undo/redo move the cursor; the log itself is never rewritten by them
//! - A commit made with the cursor behind the tip discards the redo tail
//! - Branches are named cursor positions into the one log
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.commit(patches, before, after, CommitMeta::new("ana", "add email"));
//!
//! let previous = history.undo();
//! let restored = history.redo();
//! ```

use crate::errors::HistoryError;
use crate::patches::Patch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};
use uidsl_model::{new_id, Document};

pub const MAIN_BRANCH: &str = "main";

pub type CommitId = String;

/// Who committed, why, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMeta {
    pub author: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl CommitMeta {
    /// Metadata stamped with the current time
    pub fn new(author: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Immutable record of one accepted change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: CommitId,

    /// Tip of the log when this commit was made
    pub parent_id: Option<CommitId>,

    /// Branch that was active when this commit was made
    pub branch: String,

    pub patches: Vec<Patch>,
    pub before: Document,
    pub after: Document,
    pub meta: CommitMeta,
}

/// Query over the commit log; unset criteria match everything
#[derive(Debug, Clone, Default)]
pub struct CommitFilter {
    pub author: Option<String>,
    pub branch: Option<String>,
    pub message_contains: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,

    /// Keep only the most recent `limit` matches
    pub limit: Option<usize>,
}

impl CommitFilter {
    fn matches(&self, commit: &Commit) -> bool {
        self.author.as_ref().map_or(true, |author| &commit.meta.author == author)
            && self.branch.as_ref().map_or(true, |branch| &commit.branch == branch)
            && self
                .message_contains
                .as_ref()
                .map_or(true, |needle| commit.meta.message.contains(needle.as_str()))
            && self.since.map_or(true, |since| commit.meta.timestamp >= since)
            && self.until.map_or(true, |until| commit.meta.timestamp <= until)
    }
}

/// Commit log, cursor and branch pointers
///
/// A cursor of `None` sits before the first commit; the document there is
/// the first commit's `before`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    commits: Vec<Commit>,
    cursor: Option<usize>,
    branches: BTreeMap<String, Option<usize>>,
    active_branch: String,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(MAIN_BRANCH.to_string(), None);
        Self {
            commits: Vec::new(),
            cursor: None,
            branches,
            active_branch: MAIN_BRANCH.to_string(),
        }
    }

    /// Record a change and move the cursor onto it
    ///
    /// Commits after the cursor are discarded first. Branch pointers into
    /// the discarded tail fall back to the cursor.
    #[instrument(skip_all, fields(branch = %self.active_branch, patches = patches.len()))]
    pub fn commit(
        &mut self,
        patches: Vec<Patch>,
        before: Document,
        after: Document,
        meta: CommitMeta,
    ) -> &Commit {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        if keep < self.commits.len() {
            debug!(discarded = self.commits.len() - keep, "truncating redo tail");
            self.commits.truncate(keep);
            let cursor = self.cursor;
            for pointer in self.branches.values_mut() {
                if pointer.is_some_and(|index| index >= keep) {
                    *pointer = cursor;
                }
            }
        }

        let commit = Commit {
            id: new_id(),
            parent_id: self.head().map(|head| head.id.clone()),
            branch: self.active_branch.clone(),
            patches,
            before,
            after,
            meta,
        };
        debug!(id = %commit.id, message = %commit.meta.message, "commit");

        self.commits.push(commit);
        let index = self.commits.len() - 1;
        self.cursor = Some(index);
        self.branches.insert(self.active_branch.clone(), Some(index));
        &self.commits[index]
    }

    /// Step the cursor back one commit
    ///
    /// Returns the document now current, or `None` if already at the start.
    #[instrument(skip_all)]
    pub fn undo(&mut self) -> Option<&Document> {
        let Some(cursor) = self.cursor else {
            warn!("nothing to undo");
            return None;
        };
        self.cursor = cursor.checked_sub(1);
        self.current_document()
    }

    /// Step the cursor forward one commit
    #[instrument(skip_all)]
    pub fn redo(&mut self) -> Option<&Document> {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        if next >= self.commits.len() {
            warn!("nothing to redo");
            return None;
        }
        self.cursor = Some(next);
        self.current_document()
    }

    /// Move the cursor onto the commit with `id`
    ///
    /// An unknown id leaves the history untouched and returns `None`.
    #[instrument(skip(self))]
    pub fn checkout(&mut self, id: &str) -> Option<&Document> {
        let Some(index) = self.commits.iter().position(|commit| commit.id == id) else {
            warn!("commit not found");
            return None;
        };
        self.cursor = Some(index);
        self.current_document()
    }

    /// Make `name` the active branch and jump to its pointer
    #[instrument(skip(self))]
    pub fn switch_branch(&mut self, name: &str) -> Result<Option<&Document>, HistoryError> {
        let Some(pointer) = self.branches.get(name).copied() else {
            warn!("branch not found");
            return Err(HistoryError::BranchNotFound(name.to_string()));
        };
        self.active_branch = name.to_string();
        self.cursor = pointer;
        Ok(self.current_document())
    }

    /// Record a branch at the cursor without moving it
    #[instrument(skip(self))]
    pub fn create_branch(&mut self, name: &str) -> Result<(), HistoryError> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(HistoryError::InvalidBranchName(name.to_string()));
        }
        if self.branches.contains_key(name) {
            return Err(HistoryError::BranchExists(name.to_string()));
        }
        self.branches.insert(name.to_string(), self.cursor);
        Ok(())
    }

    /// Document at the cursor; `None` for an empty history
    pub fn current_document(&self) -> Option<&Document> {
        match self.cursor {
            Some(index) => self.commits.get(index).map(|commit| &commit.after),
            None => self.commits.first().map(|commit| &commit.before),
        }
    }

    /// Matching commits in chronological order
    pub fn commits(&self, filter: &CommitFilter) -> Vec<&Commit> {
        let mut matches: Vec<&Commit> = self
            .commits
            .iter()
            .filter(|commit| filter.matches(commit))
            .collect();
        if let Some(limit) = filter.limit {
            let skip = matches.len().saturating_sub(limit);
            matches.drain(..skip);
        }
        matches
    }

    pub fn get(&self, id: &str) -> Option<&Commit> {
        self.commits.iter().find(|commit| commit.id == id)
    }

    /// Commit at the cursor
    pub fn head(&self) -> Option<&Commit> {
        self.cursor.and_then(|index| self.commits.get(index))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn active_branch(&self) -> &str {
        &self.active_branch
    }

    pub fn branches(&self) -> impl Iterator<Item = (&str, Option<usize>)> {
        self.branches.iter().map(|(name, pointer)| (name.as_str(), *pointer))
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |cursor| cursor + 1) < self.commits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uidsl_model::{DocumentBody, FormBody};

    fn doc(title: &str) -> Document {
        let mut doc = Document::new("f", DocumentBody::Form(FormBody::default()));
        doc.title = Some(title.to_string());
        doc
    }

    fn title(doc: Option<&Document>) -> Option<&str> {
        doc.and_then(|doc| doc.title.as_deref())
    }

    fn linear(n: usize) -> History {
        let mut history = History::new();
        for i in 0..n {
            history.commit(
                Vec::new(),
                doc(&format!("v{}", i)),
                doc(&format!("v{}", i + 1)),
                CommitMeta::new("ana", format!("c{}", i + 1)),
            );
        }
        history
    }

    #[test]
    fn test_commit_links_parent_and_moves_branch() {
        let history = linear(2);
        let commits = history.commits(&CommitFilter::default());
        assert_eq!(commits[0].parent_id, None);
        assert_eq!(commits[1].parent_id.as_deref(), Some(commits[0].id.as_str()));
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(history.branches().collect::<Vec<_>>(), vec![("main", Some(1))]);
    }

    #[test]
    fn test_undo_to_start_and_redo_to_tip() {
        let mut history = linear(2);
        assert_eq!(title(history.undo()), Some("v1"));
        assert_eq!(title(history.undo()), Some("v0"));
        assert_eq!(history.cursor(), None);
        assert!(history.undo().is_none());

        assert_eq!(title(history.redo()), Some("v1"));
        assert_eq!(title(history.redo()), Some("v2"));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_checkout_unknown_is_noop() {
        let mut history = linear(3);
        assert!(history.checkout("nope").is_none());
        assert_eq!(history.cursor(), Some(2));

        let first = history.commits(&CommitFilter::default())[0].id.clone();
        assert_eq!(title(history.checkout(&first)), Some("v1"));
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_branches() {
        let mut history = linear(1);
        history.create_branch("experiment").unwrap();
        assert_eq!(history.create_branch("experiment"), Err(HistoryError::BranchExists("experiment".into())));
        assert!(matches!(history.create_branch("has space"), Err(HistoryError::InvalidBranchName(_))));
        assert_eq!(history.cursor(), Some(0));

        history.switch_branch("experiment").unwrap();
        history.commit(Vec::new(), doc("v1"), doc("x"), CommitMeta::new("bo", "try"));
        assert_eq!(history.active_branch(), "experiment");
        assert_eq!(history.commits(&CommitFilter { branch: Some("experiment".into()), ..Default::default() }).len(), 1);

        assert_eq!(title(history.switch_branch("main").unwrap()), Some("v1"));
        assert_eq!(history.cursor(), Some(0));
        assert!(history.switch_branch("ghost").is_err());
        assert_eq!(history.active_branch(), "main");
    }

    #[test]
    fn test_truncation_clamps_stale_branch_pointers() {
        let mut history = linear(3);
        history.create_branch("tip").unwrap();
        history.undo();
        history.undo();
        history.commit(Vec::new(), doc("v1"), doc("alt"), CommitMeta::new("ana", "alt"));

        assert_eq!(history.len(), 2);
        let tip = history.branches().find(|(name, _)| *name == "tip").map(|(_, pointer)| pointer);
        assert_eq!(tip, Some(Some(0)));
    }

    #[test]
    fn test_filter_by_author_message_time_and_limit() {
        let mut history = History::new();
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for (i, author) in ["ana", "bo", "ana", "ana"].iter().enumerate() {
            let meta = CommitMeta::new(*author, format!("edit {}", i)).at(base + chrono::Duration::hours(i as i64));
            history.commit(Vec::new(), doc("a"), doc("b"), meta);
        }

        let ana = CommitFilter { author: Some("ana".into()), ..Default::default() };
        assert_eq!(history.commits(&ana).len(), 3);

        let recent = CommitFilter { author: Some("ana".into()), limit: Some(2), ..Default::default() };
        let messages: Vec<&str> = history.commits(&recent).iter().map(|c| c.meta.message.as_str()).collect();
        assert_eq!(messages, vec!["edit 2", "edit 3"]);

        let window = CommitFilter {
            since: Some(base + chrono::Duration::hours(1)),
            until: Some(base + chrono::Duration::hours(2)),
            ..Default::default()
        };
        assert_eq!(history.commits(&window).len(), 2);

        let needle = CommitFilter { message_contains: Some("edit 1".into()), ..Default::default() };
        assert_eq!(history.commits(&needle).len(), 1);
    }
}
