//! Error types for the editor

use crate::patches::Patch;
use serde::Serialize;
use thiserror::Error;
use uidsl_model::{Document, ModelError, NodeCategory, NodeId};
use uidsl_validator::ValidationReport;

/// Coarse classification of patch failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PatchErrorKind {
    NotFound,
    StructuralMismatch,
    ConcurrencyGuardFailure,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchErrorReason {
    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("'{found}' is not supported on a {owner}; supported: {}", .supported.join(", "))]
    StructuralMismatch {
        owner: NodeCategory,
        found: String,
        supported: Vec<String>,
    },

    #[error("Expected name '{expected}', found '{found}'")]
    NameMismatch { expected: String, found: String },

    #[error("Nodes do not share a parent container")]
    DifferentParents,

    #[error("Path segment '{0}' does not exist")]
    MissingPathSegment(String),

    #[error("Index {index} out of bounds for {container} of length {len}")]
    IndexOutOfBounds {
        container: String,
        index: usize,
        len: usize,
    },

    #[error("Cannot move a node into its own subtree")]
    CycleDetected,

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("The document root cannot be {0}")]
    RootNotAllowed(&'static str),
}

impl PatchErrorReason {
    pub fn kind(&self) -> PatchErrorKind {
        match self {
            PatchErrorReason::NotFound(_) | PatchErrorReason::ParentNotFound(_) => PatchErrorKind::NotFound,
            PatchErrorReason::NameMismatch { .. } => PatchErrorKind::ConcurrencyGuardFailure,
            _ => PatchErrorKind::StructuralMismatch,
        }
    }
}

impl From<serde_json::Error> for PatchErrorReason {
    fn from(err: serde_json::Error) -> Self {
        PatchErrorReason::InvalidValue(err.to_string())
    }
}

/// A failed patch, with enough context to report or retry it
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{op} failed: {reason}")]
pub struct PatchError {
    /// Operation name (`addNode`, `swap`, ...)
    pub op: &'static str,

    pub reason: PatchErrorReason,

    /// The failing patch
    pub patch: Patch,

    /// Ids in the container the patch was aimed at, empty if unresolved
    pub sibling_ids: Vec<NodeId>,
}

impl PatchError {
    pub fn kind(&self) -> PatchErrorKind {
        self.reason.kind()
    }
}

/// A failed batch: the failing index and the accumulator before it
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Patch {index} of the batch failed: {error}")]
pub struct BatchError {
    pub index: usize,
    pub error: PatchError,
    pub partial: Box<Document>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("Branch already exists: {0}")]
    BranchExists(String),

    #[error("Invalid branch name: '{0}'")]
    InvalidBranchName(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Document failed validation with {} error(s)", .0.errors.len())]
    Rejected(Box<ValidationReport>),

    #[error("Proposal was built on a document that is no longer current")]
    StaleProposal,
}
