//! # Document
//!
//! Root of a UI-DSL tree. The document is a discriminated union over its
//! `kind`; fields shared by every kind (identity, copy, layout, intent,
//! constraints, evaluation and the Action Contract list) live on
//! [`Document`] itself, kind-specific containers live on [`DocumentBody`].
//!
//! ```json
//! {
//!   "id": "8c1f…",
//!   "kind": "form",
//!   "title": "Sign up",
//!   "fields": [{ "id": "…", "name": "email", "component": "input" }],
//!   "actions": [{ "id": "…", "label": "Create account", "type": "submit", "kind": "soft" }]
//! }
//! ```

use crate::nodes::{
    Action, Column, DecisionOption, Filter, FormField, Layout, NodeId, Props, Region, RegionSlot,
    Section, Widget,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: NodeId,

    #[serde(flatten)]
    pub body: DocumentBody,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,

    /// Calls-to-action and their contracts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DocumentBody {
    Form(FormBody),
    #[serde(alias = "screen")]
    Page(PageBody),
    Table(TableBody),
    Dashboard(DashboardBody),
    Decision(DecisionBody),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Form,
    Page,
    Table,
    Dashboard,
    Decision,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocumentKind::Form => "form",
            DocumentKind::Page => "page",
            DocumentKind::Table => "table",
            DocumentKind::Dashboard => "dashboard",
            DocumentKind::Decision => "decision",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormBody {
    #[serde(default)]
    pub fields: Vec<FormField>,
}

/// Page or screen
///
/// A page is laid out either as `sections` or as `regions`; when both are
/// present, regions take precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageBody {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regions: BTreeMap<RegionSlot, Region>,

    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBody {
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Static rows keyed by column key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Props>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardBody {
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionPattern {
    #[serde(rename = "compare-3")]
    Compare3,
    Recommendation,
    Tradeoffs,
    ReviewConfirm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<DecisionPattern>,

    #[serde(default)]
    pub options: Vec<DecisionOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Accessibility hints for the rendered surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessibility {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// Semantic purpose of the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub primary: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hard: Vec<Constraint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub soft: Vec<Constraint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Field name or node id the condition applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(flatten)]
    pub condition: Condition,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Condition {
    Required,
    MinLength { value: usize },
    MaxLength { value: usize },
    Pattern { value: String },
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Custom { expression: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

/// Named success metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Document {
    /// Create an empty document of the given body
    pub fn new(id: impl Into<NodeId>, body: DocumentBody) -> Self {
        Self {
            id: id.into(),
            body,
            title: None,
            description: None,
            layout: None,
            accessibility: None,
            intent: None,
            constraints: None,
            evaluation: None,
            actions: Vec::new(),
            test_id: None,
            props: Props::new(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.body.kind()
    }
}

impl DocumentBody {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentBody::Form(_) => DocumentKind::Form,
            DocumentBody::Page(_) => DocumentKind::Page,
            DocumentBody::Table(_) => DocumentKind::Table,
            DocumentBody::Dashboard(_) => DocumentKind::Dashboard,
            DocumentBody::Decision(_) => DocumentKind::Decision,
        }
    }
}
