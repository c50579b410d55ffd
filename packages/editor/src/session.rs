//! # Edit Session
//!
//! Ties the patch engine, the validator and the history together.
//!
//! A batch of patches is first *proposed*: folded over the current document
//! and validated, without touching history. The caller inspects the
//! proposal and *accepts* it, which records a commit. [`EditSession::apply`]
//! does both, honouring the configured [`CommitPolicy`].

use crate::config::{CommitPolicy, SessionConfig};
use crate::errors::{EditorError, PatchError};
use crate::history::{Commit, CommitMeta, History};
use crate::patches::{apply_all, Patch};
use tracing::{debug, instrument, warn};
use uidsl_model::Document;
use uidsl_validator::{validate_with, ValidateOptions, ValidationReport};

/// A validated but uncommitted batch
#[derive(Debug, Clone)]
pub struct Proposal {
    /// Patches that were applied; a prefix of the batch after a non-atomic failure
    pub patches: Vec<Patch>,

    /// Document the batch was applied to
    pub base: Document,

    pub document: Document,
    pub report: ValidationReport,

    /// Failure that cut a non-atomic batch short
    pub failure: Option<PatchError>,
}

/// Single-user editing session over one document
#[derive(Debug, Clone)]
pub struct EditSession {
    document: Document,
    history: History,
    config: SessionConfig,
}

impl EditSession {
    pub fn new(document: Document, config: SessionConfig) -> Self {
        Self {
            document,
            history: History::new(),
            config,
        }
    }

    /// Resume from a saved history; `None` if it has no commits
    pub fn from_history(history: History, config: SessionConfig) -> Option<Self> {
        let document = history.current_document()?.clone();
        Some(Self {
            document,
            history,
            config,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn into_history(self) -> History {
        self.history
    }

    /// Commit metadata authored by the configured author
    pub fn meta(&self, message: impl Into<String>) -> CommitMeta {
        CommitMeta::new(self.config.author.clone(), message)
    }

    pub fn validate(&self, doc: &Document) -> ValidationReport {
        validate_with(
            doc,
            ValidateOptions {
                registry: None,
                warnings_as_errors: self.config.warnings_as_errors,
            },
        )
    }

    /// Replace the document wholesale, e.g. with a freshly generated draft
    #[instrument(skip_all, fields(draft = %draft.id))]
    pub fn start(&mut self, draft: Document, meta: CommitMeta) -> Result<ValidationReport, EditorError> {
        let report = self.validate(&draft);
        self.check_policy(&report)?;
        let before = std::mem::replace(&mut self.document, draft.clone());
        self.history.commit(Vec::new(), before, draft, meta);
        Ok(report)
    }

    /// Fold `patches` over the current document and validate the result
    #[instrument(skip_all, fields(patches = patches.len(), atomic = self.config.atomic_batches))]
    pub fn propose(&self, patches: Vec<Patch>) -> Result<Proposal, EditorError> {
        let (document, applied, failure) = match apply_all(&self.document, &patches) {
            Ok(document) => (document, patches, None),
            Err(err) if self.config.atomic_batches => return Err(err.into()),
            Err(err) => {
                warn!(index = err.index, "keeping partial batch");
                let mut applied = patches;
                applied.truncate(err.index);
                (*err.partial, applied, Some(err.error))
            }
        };

        let report = self.validate(&document);
        debug!(valid = report.valid, errors = report.errors.len(), "proposal validated");
        Ok(Proposal {
            patches: applied,
            base: self.document.clone(),
            document,
            report,
            failure,
        })
    }

    /// Commit a proposal built on the current document
    #[instrument(skip_all)]
    pub fn accept(&mut self, proposal: Proposal, meta: CommitMeta) -> Result<&Commit, EditorError> {
        if proposal.base != self.document {
            return Err(EditorError::StaleProposal);
        }
        self.check_policy(&proposal.report)?;

        self.document = proposal.document.clone();
        Ok(self
            .history
            .commit(proposal.patches, proposal.base, proposal.document, meta))
    }

    /// Propose and accept in one step
    pub fn apply(&mut self, patches: Vec<Patch>, meta: CommitMeta) -> Result<Proposal, EditorError> {
        let proposal = self.propose(patches)?;
        self.accept(proposal.clone(), meta)?;
        Ok(proposal)
    }

    fn check_policy(&self, report: &ValidationReport) -> Result<(), EditorError> {
        if self.config.commit_policy == CommitPolicy::RejectInvalid && !report.valid {
            warn!(errors = report.errors.len(), "rejecting invalid document");
            return Err(EditorError::Rejected(Box::new(report.clone())));
        }
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo().cloned();
        self.sync(restored)
    }

    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo().cloned();
        self.sync(restored)
    }

    pub fn checkout(&mut self, id: &str) -> bool {
        let restored = self.history.checkout(id).cloned();
        self.sync(restored)
    }

    pub fn switch_branch(&mut self, name: &str) -> Result<(), EditorError> {
        let restored = self.history.switch_branch(name)?.cloned();
        self.sync(restored);
        Ok(())
    }

    pub fn create_branch(&mut self, name: &str) -> Result<(), EditorError> {
        Ok(self.history.create_branch(name)?)
    }

    fn sync(&mut self, restored: Option<Document>) -> bool {
        match restored {
            Some(document) => {
                self.document = document;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(n: u32) -> String {
        format!("00000000-0000-4000-8000-{:012}", n)
    }

    fn form() -> Document {
        Document::from_value(json!({
            "id": id(1),
            "kind": "form",
            "fields": [{ "id": id(2), "name": "name", "label": "Name", "component": "input" }]
        }))
        .unwrap()
    }

    fn add_hard_action() -> Patch {
        Patch::AddNode {
            parent: id(1).into(),
            index: None,
            node: json!({ "id": id(3), "label": "Delete", "type": "button", "kind": "hard" }),
            container: None,
        }
    }

    #[test]
    fn test_advisory_policy_commits_invalid_documents() {
        let mut session = EditSession::new(form(), SessionConfig::default());
        let proposal = session.apply(vec![add_hard_action()], session.meta("add delete")).unwrap();
        assert!(!proposal.report.valid);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.document().actions.len(), 1);
    }

    #[test]
    fn test_reject_invalid_policy_blocks_commit() {
        let config = SessionConfig {
            commit_policy: CommitPolicy::RejectInvalid,
            ..SessionConfig::default()
        };
        let mut session = EditSession::new(form(), config);
        let err = session.apply(vec![add_hard_action()], session.meta("add delete")).unwrap_err();
        assert!(matches!(err, EditorError::Rejected(_)));
        assert!(session.history().is_empty());
        assert!(session.document().actions.is_empty());
    }

    #[test]
    fn test_stale_proposal_is_refused() {
        let mut session = EditSession::new(form(), SessionConfig::default());
        let stale = session.propose(vec![add_hard_action()]).unwrap();
        let rename = Patch::RenameField { target: id(2).into(), from: "name".into(), to: "full_name".into() };
        session.apply(vec![rename], session.meta("rename")).unwrap();

        let err = session.accept(stale, session.meta("late")).unwrap_err();
        assert!(matches!(err, EditorError::StaleProposal));
    }

    #[test]
    fn test_non_atomic_batch_keeps_prefix() {
        let config = SessionConfig {
            atomic_batches: false,
            ..SessionConfig::default()
        };
        let session = EditSession::new(form(), config);
        let patches = vec![
            Patch::SetCopy { target: id(2).into(), path: "label".into(), value: json!("Full name") },
            Patch::RemoveNode { target: "missing".into() },
            Patch::SetCopy { target: id(2).into(), path: "placeholder".into(), value: json!("Jane") },
        ];

        let proposal = session.propose(patches.clone()).unwrap();
        assert_eq!(proposal.patches, patches[..1].to_vec());
        assert_eq!(proposal.failure.map(|f| f.op), Some("removeNode"));

        let atomic = EditSession::new(form(), SessionConfig::default());
        assert!(matches!(atomic.propose(patches), Err(EditorError::Batch(_))));
    }

    #[test]
    fn test_undo_redo_keep_document_in_sync() {
        let mut session = EditSession::new(form(), SessionConfig::default());
        let rename = Patch::RenameField { target: id(2).into(), from: "name".into(), to: "full_name".into() };
        session.apply(vec![rename], session.meta("rename")).unwrap();

        assert!(session.undo());
        assert_eq!(session.document(), &form());
        assert!(!session.undo());
        assert!(session.redo());
        assert_ne!(session.document(), &form());
    }
}
