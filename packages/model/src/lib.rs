//! # UI-DSL Model
//!
//! Typed tree model for UI-DSL documents: forms, pages (screens), tables,
//! dashboards and decision screens.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document / nodes: closed typed structs      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tree / registry: uniform node views and the │
//! │ owner → ordered containers table            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ visitor / location: depth-first traversal   │
//! │ in container order, structural addresses    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use uidsl_model::{visitor::collect_ids, Document};
//!
//! let doc = Document::from_json_str(&std::fs::read_to_string("signup.json")?)?;
//! for id in collect_ids(&doc) {
//!     println!("{}", id);
//! }
//! ```

pub mod data_source;
pub mod document;
mod error;
mod hydrate;
pub mod id_generator;
mod location;
pub mod nodes;
mod registry;
mod tree;
pub mod visitor;

pub use data_source::{DataSource, HttpMethod};
pub use document::{
    Accessibility, Condition, Constraint, Constraints, DashboardBody, DecisionBody,
    DecisionPattern, Document, DocumentBody, DocumentKind, Evaluation, FormBody, Intent, Metric,
    PageBody, TableBody,
};
pub use error::{ModelError, ModelResult};
pub use hydrate::hydrate_value;
pub use id_generator::{is_uuid_v4, new_id};
pub use location::{Location, Step};
pub use nodes::*;
pub use registry::{ContainerKey, ContainerMut, ContainerView};
pub use tree::{Node, NodeCategory, NodeView, NodeViewMut};
