use crate::document::Document;
use crate::location::Location;
use crate::nodes::*;
use crate::tree::{NodeView, NodeViewMut};
use std::ops::ControlFlow;

/// Visitor pattern for traversing a document immutably
///
/// Default implementations walk the whole tree depth-first in container
/// order. Override specific visit_* methods to act on nodes; call
/// [`walk_children`] from an override to keep descending.
pub trait Visitor<'a>: Sized {
    fn visit_document(&mut self, doc: &'a Document) {
        walk_children(self, NodeView::Document(doc));
    }

    fn visit_field(&mut self, field: &'a FormField) {
        walk_children(self, NodeView::Field(field));
    }

    fn visit_action(&mut self, _action: &'a Action) {
        // Leaf node, no children to walk
    }

    fn visit_section(&mut self, section: &'a Section) {
        walk_children(self, NodeView::Section(section));
    }

    fn visit_region(&mut self, slot: RegionSlot, region: &'a Region) {
        walk_children(self, NodeView::Region(slot, region));
    }

    fn visit_module(&mut self, module: &'a Module) {
        walk_children(self, NodeView::Module(module));
    }

    fn visit_content(&mut self, content: &'a ContentNode) {
        walk_children(self, NodeView::Content(content));
    }

    fn visit_column(&mut self, _column: &'a Column) {
        // Leaf node, no children to walk
    }

    fn visit_filter(&mut self, _filter: &'a Filter) {
        // Leaf node, no children to walk
    }

    fn visit_widget(&mut self, widget: &'a Widget) {
        walk_children(self, NodeView::Widget(widget));
    }

    fn visit_option(&mut self, _option: &'a DecisionOption) {
        // Leaf node, no children to walk
    }
}

/// Dispatch a node to the matching visit_* method
pub fn visit_node<'a, V: Visitor<'a>>(visitor: &mut V, node: NodeView<'a>) {
    match node {
        NodeView::Document(doc) => visitor.visit_document(doc),
        NodeView::Field(field) => visitor.visit_field(field),
        NodeView::Action(action) => visitor.visit_action(action),
        NodeView::Section(section) => visitor.visit_section(section),
        NodeView::Region(slot, region) => visitor.visit_region(slot, region),
        NodeView::Module(module) => visitor.visit_module(module),
        NodeView::Content(content) => visitor.visit_content(content),
        NodeView::Column(column) => visitor.visit_column(column),
        NodeView::Filter(filter) => visitor.visit_filter(filter),
        NodeView::Widget(widget) => visitor.visit_widget(widget),
        NodeView::DecisionOption(option) => visitor.visit_option(option),
    }
}

pub fn walk_children<'a, V: Visitor<'a>>(visitor: &mut V, node: NodeView<'a>) {
    for (_, container) in node.containers() {
        for child in container.items() {
            visit_node(visitor, child);
        }
    }
}

/// Pre-order walk handing every node its structural location
///
/// Returning `ControlFlow::Break` stops the walk.
pub fn walk_located<'a, F>(doc: &'a Document, mut f: F) -> ControlFlow<()>
where
    F: FnMut(&Location, NodeView<'a>) -> ControlFlow<()>,
{
    walk_located_inner(doc.view(), &Location::root(), &mut f)
}

fn walk_located_inner<'a, F>(node: NodeView<'a>, location: &Location, f: &mut F) -> ControlFlow<()>
where
    F: FnMut(&Location, NodeView<'a>) -> ControlFlow<()>,
{
    f(location, node)?;
    for (key, container) in node.containers() {
        for (index, child) in container.items().into_iter().enumerate() {
            walk_located_inner(child, &location.child(key.clone(), index), f)?;
        }
    }
    ControlFlow::Continue(())
}

/// First node in traversal order matching `predicate`, with its location
pub fn find_located<'a>(
    doc: &'a Document,
    mut predicate: impl FnMut(NodeView<'a>) -> bool,
) -> Option<(Location, NodeView<'a>)> {
    let mut found = None;
    let _ = walk_located(doc, |location, node| {
        if predicate(node) {
            found = Some((location.clone(), node));
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    });
    found
}

/// Every node id in traversal order, the document root included
pub fn collect_ids(doc: &Document) -> Vec<NodeId> {
    let mut ids = Vec::new();
    let _ = walk_located(doc, |_, node| {
        ids.push(node.id().to_string());
        ControlFlow::Continue(())
    });
    ids
}

/// Pre-order mutable walk of `node` and everything below it
pub fn walk_mut<F>(mut node: NodeViewMut<'_>, f: &mut F)
where
    F: FnMut(&mut NodeViewMut<'_>),
{
    f(&mut node);
    for (_, container) in node.into_containers() {
        for child in container.into_items() {
            walk_mut(child, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dashboard() -> Document {
        serde_json::from_value(json!({
            "id": "d",
            "kind": "dashboard",
            "widgets": [
                { "id": "w1", "kind": "metric", "content": [
                    { "id": "c1", "type": "text", "children": [{ "id": "c2", "type": "badge" }] }
                ]},
                { "id": "w2", "kind": "chart" }
            ],
            "actions": [{ "id": "a1", "label": "Refresh" }]
        }))
        .unwrap()
    }

    struct WidgetCounter {
        widgets: usize,
        content: Vec<String>,
    }

    impl<'a> Visitor<'a> for WidgetCounter {
        fn visit_widget(&mut self, widget: &'a Widget) {
            self.widgets += 1;
            walk_children(self, NodeView::Widget(widget));
        }

        fn visit_content(&mut self, content: &'a ContentNode) {
            self.content.push(content.id.clone());
            walk_children(self, NodeView::Content(content));
        }
    }

    #[test]
    fn test_visitor_walks_nested_content() {
        let doc = dashboard();
        let mut counter = WidgetCounter { widgets: 0, content: Vec::new() };
        counter.visit_document(&doc);

        assert_eq!(counter.widgets, 2);
        assert_eq!(counter.content, vec!["c1", "c2"]);
    }

    #[test]
    fn test_collect_ids_is_depth_first() {
        let doc = dashboard();
        assert_eq!(collect_ids(&doc), vec!["d", "w1", "c1", "c2", "w2", "a1"]);
    }

    #[test]
    fn test_find_located_stops_at_first_match() {
        let doc = dashboard();
        let (location, node) = find_located(&doc, |node| node.id() == "c2").unwrap();
        assert_eq!(location.to_string(), "widgets[0].content[0].children[0]");
        assert_eq!(node.id(), "c2");
        assert!(find_located(&doc, |node| node.id() == "missing").is_none());
    }

    #[test]
    fn test_walk_mut_reaches_every_node() {
        let mut doc = dashboard();
        walk_mut(doc.view_mut(), &mut |node| {
            let id = format!("x-{}", node.id());
            node.set_id(id);
        });
        assert_eq!(collect_ids(&doc), vec!["x-d", "x-w1", "x-c1", "x-c2", "x-w2", "x-a1"]);
    }
}
