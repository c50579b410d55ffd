//! # UI-DSL Editor
//!
//! Resolution, patching and history for UI-DSL documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ intent layer: batches of typed patches      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor                                      │
//! │  - resolve refs (id, path, external tag)    │
//! │  - fold patches over a cloned document      │
//! │  - validate the result                      │
//! │  - commit to history (undo/redo/branches)   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ code generator: reads validated documents   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Inputs are never mutated**: every patch clones before it mutates
//! 2. **Validation is advisory**: reports are returned, commits still happen
//!    unless the session is configured to reject invalid documents
//! 3. **History is a value**: the caller owns it and passes it around
//!
//! ## Usage
//!
//! ```rust,ignore
//! use uidsl_editor::{EditSession, Patch, SessionConfig};
//!
//! let mut session = EditSession::new(doc, SessionConfig::default());
//! let proposal = session.apply(
//!     vec![Patch::DuplicateNode { target: email_id.into() }],
//!     session.meta("duplicate email"),
//! )?;
//! for diagnostic in proposal.report.diagnostics() {
//!     println!("{}", diagnostic);
//! }
//!
//! session.undo();
//! ```

mod config;
mod errors;
mod history;
mod patches;
mod placement;
mod resolver;
mod session;

pub use config::{CommitPolicy, SessionConfig};
pub use errors::{BatchError, EditorError, HistoryError, PatchError, PatchErrorKind, PatchErrorReason};
pub use history::{Commit, CommitFilter, CommitId, CommitMeta, History, MAIN_BRANCH};
pub use patches::{apply, apply_all, Patch};
pub use placement::classify;
pub use resolver::{locate, resolve, resolve_parent, NodeRef, ParentRef, Resolved};
pub use session::{EditSession, Proposal};
