//! Uniform views over the typed node structs.
//!
//! [`NodeView`] and [`NodeViewMut`] let traversal, resolution and patching
//! treat every node category the same way without erasing the typed model.
//! [`Node`] is the owned form used when a node is detached from, or inserted
//! into, a container.

use crate::data_source::DataSource;
use crate::document::Document;
use crate::location::Location;
use crate::nodes::*;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeCategory {
    Document,
    Field,
    Action,
    Section,
    Content,
    Region,
    Module,
    Column,
    Filter,
    Widget,
    DecisionOption,
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeCategory::Document => "document",
            NodeCategory::Field => "field",
            NodeCategory::Action => "action",
            NodeCategory::Section => "section",
            NodeCategory::Content => "content",
            NodeCategory::Region => "region",
            NodeCategory::Module => "module",
            NodeCategory::Column => "column",
            NodeCategory::Filter => "filter",
            NodeCategory::Widget => "widget",
            NodeCategory::DecisionOption => "option",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum NodeView<'a> {
    Document(&'a Document),
    Field(&'a FormField),
    Action(&'a Action),
    Section(&'a Section),
    Content(&'a ContentNode),
    Region(RegionSlot, &'a Region),
    Module(&'a Module),
    Column(&'a Column),
    Filter(&'a Filter),
    Widget(&'a Widget),
    DecisionOption(&'a DecisionOption),
}

#[derive(Debug)]
pub enum NodeViewMut<'a> {
    Document(&'a mut Document),
    Field(&'a mut FormField),
    Action(&'a mut Action),
    Section(&'a mut Section),
    Content(&'a mut ContentNode),
    Region(RegionSlot, &'a mut Region),
    Module(&'a mut Module),
    Column(&'a mut Column),
    Filter(&'a mut Filter),
    Widget(&'a mut Widget),
    DecisionOption(&'a mut DecisionOption),
}

/// Detached node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Field(FormField),
    Action(Action),
    Section(Section),
    Content(ContentNode),
    Region(RegionSlot, Region),
    Module(Module),
    Column(Column),
    Filter(Filter),
    Widget(Widget),
    DecisionOption(DecisionOption),
}

/// Evaluate `$body` with `$n` bound to the inner struct of any view variant
macro_rules! with_node {
    ($ty:ident, $value:expr, $n:ident => $body:expr) => {
        match $value {
            $ty::Document($n) => $body,
            $ty::Field($n) => $body,
            $ty::Action($n) => $body,
            $ty::Section($n) => $body,
            $ty::Content($n) => $body,
            $ty::Region(_, $n) => $body,
            $ty::Module($n) => $body,
            $ty::Column($n) => $body,
            $ty::Filter($n) => $body,
            $ty::Widget($n) => $body,
            $ty::DecisionOption($n) => $body,
        }
    };
}

macro_rules! with_owned {
    ($value:expr, $n:ident => $body:expr) => {
        match $value {
            Node::Field($n) => $body,
            Node::Action($n) => $body,
            Node::Section($n) => $body,
            Node::Content($n) => $body,
            Node::Region(_, $n) => $body,
            Node::Module($n) => $body,
            Node::Column($n) => $body,
            Node::Filter($n) => $body,
            Node::Widget($n) => $body,
            Node::DecisionOption($n) => $body,
        }
    };
}

impl<'a> NodeView<'a> {
    pub fn id(self) -> &'a str {
        with_node!(NodeView, self, n => n.id.as_str())
    }

    pub fn test_id(self) -> Option<&'a str> {
        with_node!(NodeView, self, n => n.test_id.as_deref())
    }

    pub fn category(self) -> NodeCategory {
        match self {
            NodeView::Document(_) => NodeCategory::Document,
            NodeView::Field(_) => NodeCategory::Field,
            NodeView::Action(_) => NodeCategory::Action,
            NodeView::Section(_) => NodeCategory::Section,
            NodeView::Content(_) => NodeCategory::Content,
            NodeView::Region(..) => NodeCategory::Region,
            NodeView::Module(_) => NodeCategory::Module,
            NodeView::Column(_) => NodeCategory::Column,
            NodeView::Filter(_) => NodeCategory::Filter,
            NodeView::Widget(_) => NodeCategory::Widget,
            NodeView::DecisionOption(_) => NodeCategory::DecisionOption,
        }
    }

    pub fn layout(self) -> Option<&'a Layout> {
        with_node!(NodeView, self, n => n.layout.as_ref())
    }

    pub fn props(self) -> &'a Props {
        with_node!(NodeView, self, n => &n.props)
    }

    /// First-class `variant` slot, if the category has one
    pub fn variant(self) -> Option<&'a str> {
        match self {
            NodeView::Field(field) => field.variant.as_deref(),
            NodeView::Action(action) => action.variant.as_deref(),
            NodeView::Content(content) => content.variant.as_deref(),
            _ => None,
        }
    }

    pub fn data_source(self) -> Option<&'a DataSource> {
        match self {
            NodeView::Section(section) => section.data_source.as_ref(),
            NodeView::Content(content) => content.data_source.as_ref(),
            NodeView::Module(module) => module.data_source.as_ref(),
            NodeView::Widget(widget) => widget.data_source.as_ref(),
            _ => None,
        }
    }

    /// Human-readable text of the node (label, title or name)
    pub fn display_text(self) -> Option<&'a str> {
        match self {
            NodeView::Document(doc) => doc.title.as_deref(),
            NodeView::Field(field) => field.label.as_deref(),
            NodeView::Action(action) => action.label.as_deref(),
            NodeView::Section(section) => section.title.as_deref().or(section.label.as_deref()),
            NodeView::Content(content) => content
                .label
                .as_deref()
                .or(content.title.as_deref())
                .or(content.text.as_deref()),
            NodeView::Module(module) => module.title.as_deref(),
            NodeView::Column(column) => column.label.as_deref(),
            NodeView::Filter(filter) => filter.label.as_deref(),
            NodeView::Widget(widget) => widget.title.as_deref(),
            NodeView::DecisionOption(option) => Some(option.name.as_str()),
            NodeView::Region(..) => None,
        }
    }

    pub fn to_value(self) -> serde_json::Result<Value> {
        let mut value = with_node!(NodeView, self, n => serde_json::to_value(n))?;
        if let (NodeView::Region(slot, _), Value::Object(map)) = (self, &mut value) {
            map.insert("slot".to_string(), Value::String(slot.to_string()));
        }
        Ok(value)
    }

    /// Owned copy; `None` for the document root
    pub fn to_node(self) -> Option<Node> {
        let node = match self {
            NodeView::Document(_) => return None,
            NodeView::Field(field) => Node::Field(field.clone()),
            NodeView::Action(action) => Node::Action(action.clone()),
            NodeView::Section(section) => Node::Section(section.clone()),
            NodeView::Content(content) => Node::Content(content.clone()),
            NodeView::Region(slot, region) => Node::Region(slot, region.clone()),
            NodeView::Module(module) => Node::Module(module.clone()),
            NodeView::Column(column) => Node::Column(column.clone()),
            NodeView::Filter(filter) => Node::Filter(filter.clone()),
            NodeView::Widget(widget) => Node::Widget(widget.clone()),
            NodeView::DecisionOption(option) => Node::DecisionOption(option.clone()),
        };
        Some(node)
    }
}

impl<'a> NodeViewMut<'a> {
    pub fn id(&self) -> &str {
        with_node!(NodeViewMut, self, n => n.id.as_str())
    }

    pub fn set_id(&mut self, id: impl Into<NodeId>) {
        let id = id.into();
        with_node!(NodeViewMut, self, n => n.id = id)
    }

    pub fn category(&self) -> NodeCategory {
        self.as_view().category()
    }

    pub fn as_view(&self) -> NodeView<'_> {
        match self {
            NodeViewMut::Document(n) => NodeView::Document(n),
            NodeViewMut::Field(n) => NodeView::Field(n),
            NodeViewMut::Action(n) => NodeView::Action(n),
            NodeViewMut::Section(n) => NodeView::Section(n),
            NodeViewMut::Content(n) => NodeView::Content(n),
            NodeViewMut::Region(slot, n) => NodeView::Region(*slot, n),
            NodeViewMut::Module(n) => NodeView::Module(n),
            NodeViewMut::Column(n) => NodeView::Column(n),
            NodeViewMut::Filter(n) => NodeView::Filter(n),
            NodeViewMut::Widget(n) => NodeView::Widget(n),
            NodeViewMut::DecisionOption(n) => NodeView::DecisionOption(n),
        }
    }

    pub fn reborrow(&mut self) -> NodeViewMut<'_> {
        match self {
            NodeViewMut::Document(n) => NodeViewMut::Document(n),
            NodeViewMut::Field(n) => NodeViewMut::Field(n),
            NodeViewMut::Action(n) => NodeViewMut::Action(n),
            NodeViewMut::Section(n) => NodeViewMut::Section(n),
            NodeViewMut::Content(n) => NodeViewMut::Content(n),
            NodeViewMut::Region(slot, n) => NodeViewMut::Region(*slot, n),
            NodeViewMut::Module(n) => NodeViewMut::Module(n),
            NodeViewMut::Column(n) => NodeViewMut::Column(n),
            NodeViewMut::Filter(n) => NodeViewMut::Filter(n),
            NodeViewMut::Widget(n) => NodeViewMut::Widget(n),
            NodeViewMut::DecisionOption(n) => NodeViewMut::DecisionOption(n),
        }
    }

    pub fn layout_mut(&mut self) -> &mut Option<Layout> {
        with_node!(NodeViewMut, self, n => &mut n.layout)
    }

    pub fn props_mut(&mut self) -> &mut Props {
        with_node!(NodeViewMut, self, n => &mut n.props)
    }

    pub fn variant_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            NodeViewMut::Field(field) => Some(&mut field.variant),
            NodeViewMut::Action(action) => Some(&mut action.variant),
            NodeViewMut::Content(content) => Some(&mut content.variant),
            _ => None,
        }
    }

    pub fn data_source_mut(&mut self) -> Option<&mut Option<DataSource>> {
        match self {
            NodeViewMut::Section(section) => Some(&mut section.data_source),
            NodeViewMut::Content(content) => Some(&mut content.data_source),
            NodeViewMut::Module(module) => Some(&mut module.data_source),
            NodeViewMut::Widget(widget) => Some(&mut widget.data_source),
            _ => None,
        }
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        self.as_view().to_value()
    }

    /// Overwrite the node with a deserialized value of the same category
    ///
    /// A region's `slot` key is ignored; regions never change slot in place.
    pub fn replace_from_value(&mut self, mut value: Value) -> serde_json::Result<()> {
        if let (NodeViewMut::Region(..), Value::Object(map)) = (&*self, &mut value) {
            map.remove("slot");
        }
        with_node!(NodeViewMut, self, n => {
            **n = serde_json::from_value(value)?;
            Ok(())
        })
    }
}

impl Node {
    pub fn id(&self) -> &str {
        with_owned!(self, n => n.id.as_str())
    }

    pub fn category(&self) -> NodeCategory {
        self.view().category()
    }

    pub fn view(&self) -> NodeView<'_> {
        match self {
            Node::Field(n) => NodeView::Field(n),
            Node::Action(n) => NodeView::Action(n),
            Node::Section(n) => NodeView::Section(n),
            Node::Content(n) => NodeView::Content(n),
            Node::Region(slot, n) => NodeView::Region(*slot, n),
            Node::Module(n) => NodeView::Module(n),
            Node::Column(n) => NodeView::Column(n),
            Node::Filter(n) => NodeView::Filter(n),
            Node::Widget(n) => NodeView::Widget(n),
            Node::DecisionOption(n) => NodeView::DecisionOption(n),
        }
    }

    pub fn view_mut(&mut self) -> NodeViewMut<'_> {
        match self {
            Node::Field(n) => NodeViewMut::Field(n),
            Node::Action(n) => NodeViewMut::Action(n),
            Node::Section(n) => NodeViewMut::Section(n),
            Node::Content(n) => NodeViewMut::Content(n),
            Node::Region(slot, n) => NodeViewMut::Region(*slot, n),
            Node::Module(n) => NodeViewMut::Module(n),
            Node::Column(n) => NodeViewMut::Column(n),
            Node::Filter(n) => NodeViewMut::Filter(n),
            Node::Widget(n) => NodeViewMut::Widget(n),
            Node::DecisionOption(n) => NodeViewMut::DecisionOption(n),
        }
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        self.view().to_value()
    }

    /// Deserialize a node payload of a known category
    ///
    /// Region payloads carry their slot under `slot`.
    pub fn from_value(category: NodeCategory, value: Value) -> serde_json::Result<Node> {
        let node = match category {
            NodeCategory::Document => {
                return Err(serde_json::Error::custom("a document cannot be nested as a node"))
            }
            NodeCategory::Field => Node::Field(serde_json::from_value(value)?),
            NodeCategory::Action => Node::Action(serde_json::from_value(value)?),
            NodeCategory::Section => Node::Section(serde_json::from_value(value)?),
            NodeCategory::Content => Node::Content(serde_json::from_value(value)?),
            NodeCategory::Region => {
                let mut value = value;
                let slot = match &mut value {
                    Value::Object(map) => map
                        .remove("slot")
                        .and_then(|slot| slot.as_str().and_then(RegionSlot::parse)),
                    _ => None,
                };
                let slot = slot.ok_or_else(|| {
                    serde_json::Error::custom("region payload requires a known `slot`")
                })?;
                Node::Region(slot, serde_json::from_value(value)?)
            }
            NodeCategory::Module => Node::Module(serde_json::from_value(value)?),
            NodeCategory::Column => Node::Column(serde_json::from_value(value)?),
            NodeCategory::Filter => Node::Filter(serde_json::from_value(value)?),
            NodeCategory::Widget => Node::Widget(serde_json::from_value(value)?),
            NodeCategory::DecisionOption => Node::DecisionOption(serde_json::from_value(value)?),
        };
        Ok(node)
    }
}

impl Document {
    pub fn view(&self) -> NodeView<'_> {
        NodeView::Document(self)
    }

    pub fn view_mut(&mut self) -> NodeViewMut<'_> {
        NodeViewMut::Document(self)
    }

    pub fn node_at(&self, location: &Location) -> Option<NodeView<'_>> {
        let mut node = self.view();
        for step in &location.steps {
            node = node.container(&step.container)?.items().into_iter().nth(step.index)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, location: &Location) -> Option<NodeViewMut<'_>> {
        let mut node = self.view_mut();
        for step in &location.steps {
            node = node.into_container(&step.container)?.into_item(step.index)?;
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Step;
    use crate::registry::ContainerKey;
    use serde_json::json;

    fn form() -> Document {
        serde_json::from_value(json!({
            "id": "doc",
            "kind": "form",
            "fields": [
                { "id": "f1", "name": "email", "component": "input", "label": "Email" },
                { "id": "g1", "name": "address", "component": "group", "fields": [
                    { "id": "f2", "name": "street", "component": "input" }
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_node_at_follows_steps() {
        let doc = form();
        let location = Location {
            steps: vec![
                Step { container: ContainerKey::Fields, index: 1 },
                Step { container: ContainerKey::Fields, index: 0 },
            ],
        };

        let node = doc.node_at(&location).unwrap();
        assert_eq!(node.id(), "f2");
        assert_eq!(node.category(), NodeCategory::Field);
        assert!(doc.node_at(&location.child(ContainerKey::Fields, 3)).is_none());
    }

    #[test]
    fn test_replace_from_value_keeps_category() {
        let mut doc = form();
        let location = Location::root().child(ContainerKey::Fields, 0);
        let mut node = doc.node_at_mut(&location).unwrap();

        let mut value = node.to_value().unwrap();
        value["label"] = json!("Work email");
        node.replace_from_value(value).unwrap();

        assert_eq!(doc.node_at(&location).unwrap().display_text(), Some("Work email"));
    }

    #[test]
    fn test_region_value_carries_slot() {
        let node = Node::from_value(
            NodeCategory::Region,
            json!({ "id": "r1", "slot": "footer", "modules": [] }),
        )
        .unwrap();

        assert!(matches!(node, Node::Region(RegionSlot::Footer, _)));
        assert_eq!(node.to_value().unwrap()["slot"], json!("footer"));
        assert!(Node::from_value(NodeCategory::Region, json!({ "id": "r2" })).is_err());
    }

    #[test]
    fn test_variant_slots() {
        let mut node = Node::Column(Column::default());
        assert!(node.view_mut().variant_mut().is_none());

        let mut node = Node::Action(Action::default());
        *node.view_mut().variant_mut().unwrap() = Some("primary".to_string());
        assert_eq!(node.view().variant(), Some("primary"));
    }
}
