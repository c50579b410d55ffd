//! Addressable node types.
//!
//! Each node category is a closed struct. Every node carries an `id`, an
//! optional `layout`, an optional external `testId` and a `props` map for
//! properties its shape does not declare.

use crate::data_source::DataSource;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node identifier (UUID v4 for well-formed documents)
pub type NodeId = String;

/// Free-form property bag
pub type Props = IndexMap<String, Value>;

/// Design tokens and free-form layout hints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Anything else (columns, direction, gap, ...)
    #[serde(flatten)]
    pub extra: Props,
}

/// Style token namespaced under a node's `layout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleToken {
    Space,
    Radius,
    Color,
}

impl StyleToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleToken::Space => "space",
            StyleToken::Radius => "radius",
            StyleToken::Color => "color",
        }
    }
}

impl Layout {
    pub fn set_token(&mut self, token: StyleToken, value: impl Into<String>) {
        let value = Some(value.into());
        match token {
            StyleToken::Space => self.space = value,
            StyleToken::Radius => self.radius = value,
            StyleToken::Color => self.color = value,
        }
    }

    pub fn token(&self, token: StyleToken) -> Option<&str> {
        match token {
            StyleToken::Space => self.space.as_deref(),
            StyleToken::Radius => self.radius.as_deref(),
            StyleToken::Color => self.color.as_deref(),
        }
    }
}

/// Option of a select/radio field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOption {
    Simple(String),
    Labeled { label: String, value: Value },
}

/// Form input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(default)]
    pub id: NodeId,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Rendering component (input, select, textarea, checkbox, group, ...)
    #[serde(default)]
    pub component: String,

    /// Validation rule string, e.g. `required|email`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,

    /// Nested fields of a `group` field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FormField>,
}

/// Destructiveness of a call-to-action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Destructive or irreversible
    Hard,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Telemetry descriptor attached to an action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub event: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: Props,
}

/// Call-to-action carrying its Action Contract
///
/// The contract invariants (hard ⇒ confirmation, high risk ⇒ confirmation,
/// preauth ⇒ soft) are checked by validation, not by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(default)]
    pub id: NodeId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Rendering kind: submit, button, reset, link
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ActionKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_confirmation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preauth_allowed: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub side_effects: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<Telemetry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

impl Action {
    pub fn requires_confirmation(&self) -> bool {
        self.requires_confirmation.unwrap_or(false)
    }

    pub fn preauth_allowed(&self) -> bool {
        self.preauth_allowed.unwrap_or(false)
    }
}

/// Generic UI element inside sections, regions, modules and widgets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    #[serde(default)]
    pub id: NodeId,

    #[serde(rename = "type", default)]
    pub node_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

/// Section body: an ordered list, or named groups for tabbed content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    List(Vec<ContentNode>),
    Groups(IndexMap<String, Vec<ContentNode>>),
}

impl Default for SectionContent {
    fn default() -> Self {
        SectionContent::List(Vec::new())
    }
}

impl SectionContent {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::List(items) => items.is_empty(),
            SectionContent::Groups(groups) => groups.values().all(Vec::is_empty),
        }
    }
}

/// Page section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub id: NodeId,

    /// Kind tag (hero, form, table, tabs, ...)
    #[serde(default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub content: SectionContent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,

    /// Module reference, checked against [`ModuleKind`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

/// Named layout slot of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionSlot {
    Header,
    Sidebar,
    Content,
    Footer,
    Main,
}

impl RegionSlot {
    pub const ALL: [RegionSlot; 5] = [
        RegionSlot::Header,
        RegionSlot::Sidebar,
        RegionSlot::Content,
        RegionSlot::Footer,
        RegionSlot::Main,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionSlot::Header => "header",
            RegionSlot::Sidebar => "sidebar",
            RegionSlot::Content => "content",
            RegionSlot::Footer => "footer",
            RegionSlot::Main => "main",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == name)
    }
}

impl std::fmt::Display for RegionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout region holding modules and/or direct content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default)]
    pub id: NodeId,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Module>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

/// Known module types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    Navbar,
    SidebarNav,
    Hero,
    Form,
    Table,
    Chart,
    MetricGrid,
    CardList,
    Detail,
    Timeline,
    Filters,
    Search,
    Tabs,
    Footer,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 14] = [
        ModuleKind::Navbar,
        ModuleKind::SidebarNav,
        ModuleKind::Hero,
        ModuleKind::Form,
        ModuleKind::Table,
        ModuleKind::Chart,
        ModuleKind::MetricGrid,
        ModuleKind::CardList,
        ModuleKind::Detail,
        ModuleKind::Timeline,
        ModuleKind::Filters,
        ModuleKind::Search,
        ModuleKind::Tabs,
        ModuleKind::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Navbar => "navbar",
            ModuleKind::SidebarNav => "sidebar-nav",
            ModuleKind::Hero => "hero",
            ModuleKind::Form => "form",
            ModuleKind::Table => "table",
            ModuleKind::Chart => "chart",
            ModuleKind::MetricGrid => "metric-grid",
            ModuleKind::CardList => "card-list",
            ModuleKind::Detail => "detail",
            ModuleKind::Timeline => "timeline",
            ModuleKind::Filters => "filters",
            ModuleKind::Search => "search",
            ModuleKind::Tabs => "tabs",
            ModuleKind::Footer => "footer",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// Reusable module placed in a region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(default)]
    pub id: NodeId,

    #[serde(rename = "type", default)]
    pub module_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

/// Table column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(default)]
    pub id: NodeId,

    #[serde(default)]
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub sortable: bool,

    #[serde(default)]
    pub filterable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

/// Table filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default)]
    pub id: NodeId,

    /// Key of the filtered column
    #[serde(default)]
    pub column: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Metric,
    Chart,
    Table,
}

impl WidgetKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "metric" => Some(WidgetKind::Metric),
            "chart" => Some(WidgetKind::Chart),
            "table" => Some(WidgetKind::Table),
            _ => None,
        }
    }
}

/// Dashboard widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    #[serde(default)]
    pub id: NodeId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<WidgetKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Free-form payload (metric value, chart series, table rows)
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

/// Option presented by a decision screen
///
/// Pattern-specific fields (price, pros, cons, score, ...) live in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOption {
    #[serde(default)]
    pub id: NodeId,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,

    #[serde(flatten)]
    pub fields: Props,
}
