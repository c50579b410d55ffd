//! # Container Registry
//!
//! The single place that knows which ordered containers an owner node has
//! and which node category each container accepts:
//!
//! | owner     | containers (traversal order)        |
//! |-----------|-------------------------------------|
//! | form      | `fields`, `actions`                 |
//! | page      | `regions`, `sections`, `actions`    |
//! | table     | `columns`, `filters`, `actions`     |
//! | dashboard | `widgets`, `actions`                |
//! | decision  | `options`, `actions`                |
//! | field     | `fields` (group fields)             |
//! | section   | `content` or one entry per group    |
//! | region    | `modules`, `content`                |
//! | module    | `content`                           |
//! | widget    | `content`                           |
//! | content   | `children`                          |
//!
//! Resolution, traversal, insertion, removal, swaps and reorders all go
//! through [`NodeView::containers`] / [`NodeViewMut::into_containers`], so
//! every operation agrees on one tree shape.

use crate::document::{Document, DocumentBody, PageBody, TableBody};
use crate::nodes::*;
use crate::tree::{Node, NodeCategory, NodeView, NodeViewMut};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Name of a child container on an owner node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerKey {
    Fields,
    Actions,
    Sections,
    Regions,
    Columns,
    Filters,
    Widgets,
    Options,
    Modules,
    Content,
    /// Named group of a tabbed section
    Group(String),
    Children,
}

impl ContainerKey {
    /// Node category the container holds
    pub fn accepts(&self) -> NodeCategory {
        match self {
            ContainerKey::Fields => NodeCategory::Field,
            ContainerKey::Actions => NodeCategory::Action,
            ContainerKey::Sections => NodeCategory::Section,
            ContainerKey::Regions => NodeCategory::Region,
            ContainerKey::Columns => NodeCategory::Column,
            ContainerKey::Filters => NodeCategory::Filter,
            ContainerKey::Widgets => NodeCategory::Widget,
            ContainerKey::Options => NodeCategory::DecisionOption,
            ContainerKey::Modules => NodeCategory::Module,
            ContainerKey::Content | ContainerKey::Group(_) | ContainerKey::Children => {
                NodeCategory::Content
            }
        }
    }

    /// Parse a container name as used in patches (`fields`, `content.Details`, ...)
    pub fn parse(name: &str) -> Option<Self> {
        let key = match name {
            "fields" => ContainerKey::Fields,
            "actions" => ContainerKey::Actions,
            "sections" => ContainerKey::Sections,
            "regions" => ContainerKey::Regions,
            "columns" => ContainerKey::Columns,
            "filters" => ContainerKey::Filters,
            "widgets" => ContainerKey::Widgets,
            "options" => ContainerKey::Options,
            "modules" => ContainerKey::Modules,
            "content" => ContainerKey::Content,
            "children" => ContainerKey::Children,
            other => {
                let group = other.strip_prefix("content.")?;
                if group.is_empty() {
                    return None;
                }
                ContainerKey::Group(group.to_string())
            }
        };
        Some(key)
    }
}

impl std::fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerKey::Fields => f.write_str("fields"),
            ContainerKey::Actions => f.write_str("actions"),
            ContainerKey::Sections => f.write_str("sections"),
            ContainerKey::Regions => f.write_str("regions"),
            ContainerKey::Columns => f.write_str("columns"),
            ContainerKey::Filters => f.write_str("filters"),
            ContainerKey::Widgets => f.write_str("widgets"),
            ContainerKey::Options => f.write_str("options"),
            ContainerKey::Modules => f.write_str("modules"),
            ContainerKey::Content => f.write_str("content"),
            ContainerKey::Group(name) => write!(f, "content.{}", name),
            ContainerKey::Children => f.write_str("children"),
        }
    }
}

impl Serialize for ContainerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContainerKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        ContainerKey::parse(&name)
            .ok_or_else(|| D::Error::custom(format!("unknown container '{}'", name)))
    }
}

/// Read-only view of one container
#[derive(Debug, Clone, Copy)]
pub enum ContainerView<'a> {
    Fields(&'a [FormField]),
    Actions(&'a [Action]),
    Sections(&'a [Section]),
    Regions(&'a BTreeMap<RegionSlot, Region>),
    Columns(&'a [Column]),
    Filters(&'a [Filter]),
    Widgets(&'a [Widget]),
    Options(&'a [DecisionOption]),
    Modules(&'a [Module]),
    Content(&'a [ContentNode]),
}

impl<'a> ContainerView<'a> {
    pub fn len(self) -> usize {
        match self {
            ContainerView::Fields(items) => items.len(),
            ContainerView::Actions(items) => items.len(),
            ContainerView::Sections(items) => items.len(),
            ContainerView::Regions(items) => items.len(),
            ContainerView::Columns(items) => items.len(),
            ContainerView::Filters(items) => items.len(),
            ContainerView::Widgets(items) => items.len(),
            ContainerView::Options(items) => items.len(),
            ContainerView::Modules(items) => items.len(),
            ContainerView::Content(items) => items.len(),
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Items in container order
    pub fn items(self) -> Vec<NodeView<'a>> {
        match self {
            ContainerView::Fields(items) => items.iter().map(NodeView::Field).collect(),
            ContainerView::Actions(items) => items.iter().map(NodeView::Action).collect(),
            ContainerView::Sections(items) => items.iter().map(NodeView::Section).collect(),
            ContainerView::Regions(items) => items
                .iter()
                .map(|(slot, region)| NodeView::Region(*slot, region))
                .collect(),
            ContainerView::Columns(items) => items.iter().map(NodeView::Column).collect(),
            ContainerView::Filters(items) => items.iter().map(NodeView::Filter).collect(),
            ContainerView::Widgets(items) => items.iter().map(NodeView::Widget).collect(),
            ContainerView::Options(items) => items.iter().map(NodeView::DecisionOption).collect(),
            ContainerView::Modules(items) => items.iter().map(NodeView::Module).collect(),
            ContainerView::Content(items) => items.iter().map(NodeView::Content).collect(),
        }
    }

    pub fn ids(self) -> Vec<NodeId> {
        self.items().into_iter().map(|item| item.id().to_string()).collect()
    }

    pub fn position(self, id: &str) -> Option<usize> {
        self.items().into_iter().position(|item| item.id() == id)
    }
}

/// Mutable view of one container
#[derive(Debug)]
pub enum ContainerMut<'a> {
    Fields(&'a mut Vec<FormField>),
    Actions(&'a mut Vec<Action>),
    Sections(&'a mut Vec<Section>),
    Regions(&'a mut BTreeMap<RegionSlot, Region>),
    Columns(&'a mut Vec<Column>),
    Filters(&'a mut Vec<Filter>),
    Widgets(&'a mut Vec<Widget>),
    Options(&'a mut Vec<DecisionOption>),
    Modules(&'a mut Vec<Module>),
    Content(&'a mut Vec<ContentNode>),
}

/// Conversion between a container's item type and [`Node`]
trait ContainerItem: Sized {
    fn into_node(self) -> Node;
    fn from_node(node: Node) -> Result<Self, Node>;
}

macro_rules! container_item {
    ($ty:ty, $variant:ident) => {
        impl ContainerItem for $ty {
            fn into_node(self) -> Node {
                Node::$variant(self)
            }

            fn from_node(node: Node) -> Result<Self, Node> {
                match node {
                    Node::$variant(item) => Ok(item),
                    other => Err(other),
                }
            }
        }
    };
}

container_item!(FormField, Field);
container_item!(Action, Action);
container_item!(Section, Section);
container_item!(Column, Column);
container_item!(Filter, Filter);
container_item!(Widget, Widget);
container_item!(DecisionOption, DecisionOption);
container_item!(Module, Module);
container_item!(ContentNode, Content);

fn remove_at<T: ContainerItem>(items: &mut Vec<T>, index: usize) -> Option<Node> {
    if index < items.len() {
        Some(items.remove(index).into_node())
    } else {
        None
    }
}

fn insert_at<T: ContainerItem>(items: &mut Vec<T>, index: usize, node: Node) -> Result<usize, Node> {
    let item = T::from_node(node)?;
    let index = index.min(items.len());
    items.insert(index, item);
    Ok(index)
}

fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

fn swap_within<T>(items: &mut [T], a: usize, b: usize) -> bool {
    if a >= items.len() || b >= items.len() {
        return false;
    }
    items.swap(a, b);
    true
}

macro_rules! each_list {
    ($container:expr, $items:ident => $body:expr, $map:ident => $map_body:expr) => {
        match $container {
            ContainerMut::Fields($items) => $body,
            ContainerMut::Actions($items) => $body,
            ContainerMut::Sections($items) => $body,
            ContainerMut::Columns($items) => $body,
            ContainerMut::Filters($items) => $body,
            ContainerMut::Widgets($items) => $body,
            ContainerMut::Options($items) => $body,
            ContainerMut::Modules($items) => $body,
            ContainerMut::Content($items) => $body,
            ContainerMut::Regions($map) => $map_body,
        }
    };
}

impl<'a> ContainerMut<'a> {
    pub fn as_view(&self) -> ContainerView<'_> {
        match self {
            ContainerMut::Fields(items) => ContainerView::Fields(items),
            ContainerMut::Actions(items) => ContainerView::Actions(items),
            ContainerMut::Sections(items) => ContainerView::Sections(items),
            ContainerMut::Regions(items) => ContainerView::Regions(items),
            ContainerMut::Columns(items) => ContainerView::Columns(items),
            ContainerMut::Filters(items) => ContainerView::Filters(items),
            ContainerMut::Widgets(items) => ContainerView::Widgets(items),
            ContainerMut::Options(items) => ContainerView::Options(items),
            ContainerMut::Modules(items) => ContainerView::Modules(items),
            ContainerMut::Content(items) => ContainerView::Content(items),
        }
    }

    pub fn len(&self) -> usize {
        self.as_view().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.as_view().ids()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.as_view().position(id)
    }

    pub fn into_item(self, index: usize) -> Option<NodeViewMut<'a>> {
        match self {
            ContainerMut::Fields(items) => items.get_mut(index).map(NodeViewMut::Field),
            ContainerMut::Actions(items) => items.get_mut(index).map(NodeViewMut::Action),
            ContainerMut::Sections(items) => items.get_mut(index).map(NodeViewMut::Section),
            ContainerMut::Regions(items) => items
                .iter_mut()
                .nth(index)
                .map(|(slot, region)| NodeViewMut::Region(*slot, region)),
            ContainerMut::Columns(items) => items.get_mut(index).map(NodeViewMut::Column),
            ContainerMut::Filters(items) => items.get_mut(index).map(NodeViewMut::Filter),
            ContainerMut::Widgets(items) => items.get_mut(index).map(NodeViewMut::Widget),
            ContainerMut::Options(items) => items.get_mut(index).map(NodeViewMut::DecisionOption),
            ContainerMut::Modules(items) => items.get_mut(index).map(NodeViewMut::Module),
            ContainerMut::Content(items) => items.get_mut(index).map(NodeViewMut::Content),
        }
    }

    pub fn into_items(self) -> Vec<NodeViewMut<'a>> {
        match self {
            ContainerMut::Fields(items) => items.iter_mut().map(NodeViewMut::Field).collect(),
            ContainerMut::Actions(items) => items.iter_mut().map(NodeViewMut::Action).collect(),
            ContainerMut::Sections(items) => items.iter_mut().map(NodeViewMut::Section).collect(),
            ContainerMut::Regions(items) => items
                .iter_mut()
                .map(|(slot, region)| NodeViewMut::Region(*slot, region))
                .collect(),
            ContainerMut::Columns(items) => items.iter_mut().map(NodeViewMut::Column).collect(),
            ContainerMut::Filters(items) => items.iter_mut().map(NodeViewMut::Filter).collect(),
            ContainerMut::Widgets(items) => items.iter_mut().map(NodeViewMut::Widget).collect(),
            ContainerMut::Options(items) => {
                items.iter_mut().map(NodeViewMut::DecisionOption).collect()
            }
            ContainerMut::Modules(items) => items.iter_mut().map(NodeViewMut::Module).collect(),
            ContainerMut::Content(items) => items.iter_mut().map(NodeViewMut::Content).collect(),
        }
    }

    /// Detach the item at `index`
    pub fn remove(&mut self, index: usize) -> Option<Node> {
        each_list!(self, items => remove_at(&mut **items, index), map => {
            let slot = *map.keys().nth(index)?;
            map.remove(&slot).map(|region| Node::Region(slot, region))
        })
    }

    /// Insert `node` at `index` (clamped to the container length)
    ///
    /// Returns the node back when the container does not hold its category,
    /// or when a region slot is already occupied. Regions are keyed by slot,
    /// so `index` is ignored for them.
    pub fn insert(&mut self, index: usize, node: Node) -> Result<usize, Node> {
        each_list!(self, items => insert_at(&mut **items, index, node), map => match node {
            Node::Region(slot, region) => {
                if map.contains_key(&slot) {
                    return Err(Node::Region(slot, region));
                }
                map.insert(slot, region);
                Ok(map.keys().position(|key| *key == slot).unwrap_or(0))
            }
            other => Err(other),
        })
    }

    /// Splice-move an item; regions have fixed slots and never move
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        each_list!(self, items => move_within(&mut **items, from, to), _map => false)
    }

    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        each_list!(self, items => swap_within(items.as_mut_slice(), a, b), _map => false)
    }

    /// Whether items can change position inside this container
    pub fn is_ordered(&self) -> bool {
        !matches!(self, ContainerMut::Regions(_))
    }
}

impl<'a> NodeView<'a> {
    /// Child containers in traversal order
    pub fn containers(self) -> Vec<(ContainerKey, ContainerView<'a>)> {
        match self {
            NodeView::Document(doc) => {
                let mut containers = Vec::new();
                match &doc.body {
                    DocumentBody::Form(form) => {
                        containers.push((ContainerKey::Fields, ContainerView::Fields(&form.fields)));
                    }
                    DocumentBody::Page(page) => {
                        containers.push((ContainerKey::Regions, ContainerView::Regions(&page.regions)));
                        containers.push((ContainerKey::Sections, ContainerView::Sections(&page.sections)));
                    }
                    DocumentBody::Table(table) => {
                        containers.push((ContainerKey::Columns, ContainerView::Columns(&table.columns)));
                        containers.push((ContainerKey::Filters, ContainerView::Filters(&table.filters)));
                    }
                    DocumentBody::Dashboard(dashboard) => {
                        containers.push((ContainerKey::Widgets, ContainerView::Widgets(&dashboard.widgets)));
                    }
                    DocumentBody::Decision(decision) => {
                        containers.push((ContainerKey::Options, ContainerView::Options(&decision.options)));
                    }
                }
                containers.push((ContainerKey::Actions, ContainerView::Actions(&doc.actions)));
                containers
            }
            NodeView::Field(field) => vec![(ContainerKey::Fields, ContainerView::Fields(&field.fields))],
            NodeView::Section(section) => match &section.content {
                SectionContent::List(items) => vec![(ContainerKey::Content, ContainerView::Content(items))],
                SectionContent::Groups(groups) => groups
                    .iter()
                    .map(|(name, items)| (ContainerKey::Group(name.clone()), ContainerView::Content(items)))
                    .collect(),
            },
            NodeView::Region(_, region) => vec![
                (ContainerKey::Modules, ContainerView::Modules(&region.modules)),
                (ContainerKey::Content, ContainerView::Content(&region.content)),
            ],
            NodeView::Module(module) => vec![(ContainerKey::Content, ContainerView::Content(&module.content))],
            NodeView::Widget(widget) => vec![(ContainerKey::Content, ContainerView::Content(&widget.content))],
            NodeView::Content(node) => vec![(ContainerKey::Children, ContainerView::Content(&node.children))],
            NodeView::Action(_) | NodeView::Column(_) | NodeView::Filter(_) | NodeView::DecisionOption(_) => {
                Vec::new()
            }
        }
    }

    pub fn container(self, key: &ContainerKey) -> Option<ContainerView<'a>> {
        self.containers()
            .into_iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, container)| container)
    }
}

impl<'a> NodeViewMut<'a> {
    /// Child containers in traversal order; mirrors [`NodeView::containers`]
    pub fn into_containers(self) -> Vec<(ContainerKey, ContainerMut<'a>)> {
        match self {
            NodeViewMut::Document(doc) => {
                let Document { body, actions, .. } = doc;
                let mut containers = Vec::new();
                match body {
                    DocumentBody::Form(form) => {
                        containers.push((ContainerKey::Fields, ContainerMut::Fields(&mut form.fields)));
                    }
                    DocumentBody::Page(page) => {
                        let PageBody { regions, sections } = page;
                        containers.push((ContainerKey::Regions, ContainerMut::Regions(regions)));
                        containers.push((ContainerKey::Sections, ContainerMut::Sections(sections)));
                    }
                    DocumentBody::Table(table) => {
                        let TableBody { columns, filters, .. } = table;
                        containers.push((ContainerKey::Columns, ContainerMut::Columns(columns)));
                        containers.push((ContainerKey::Filters, ContainerMut::Filters(filters)));
                    }
                    DocumentBody::Dashboard(dashboard) => {
                        containers.push((ContainerKey::Widgets, ContainerMut::Widgets(&mut dashboard.widgets)));
                    }
                    DocumentBody::Decision(decision) => {
                        containers.push((ContainerKey::Options, ContainerMut::Options(&mut decision.options)));
                    }
                }
                containers.push((ContainerKey::Actions, ContainerMut::Actions(actions)));
                containers
            }
            NodeViewMut::Field(field) => vec![(ContainerKey::Fields, ContainerMut::Fields(&mut field.fields))],
            NodeViewMut::Section(section) => match &mut section.content {
                SectionContent::List(items) => vec![(ContainerKey::Content, ContainerMut::Content(items))],
                SectionContent::Groups(groups) => groups
                    .iter_mut()
                    .map(|(name, items)| (ContainerKey::Group(name.clone()), ContainerMut::Content(items)))
                    .collect(),
            },
            NodeViewMut::Region(_, region) => {
                let Region { modules, content, .. } = region;
                vec![
                    (ContainerKey::Modules, ContainerMut::Modules(modules)),
                    (ContainerKey::Content, ContainerMut::Content(content)),
                ]
            }
            NodeViewMut::Module(module) => vec![(ContainerKey::Content, ContainerMut::Content(&mut module.content))],
            NodeViewMut::Widget(widget) => vec![(ContainerKey::Content, ContainerMut::Content(&mut widget.content))],
            NodeViewMut::Content(node) => vec![(ContainerKey::Children, ContainerMut::Content(&mut node.children))],
            NodeViewMut::Action(_)
            | NodeViewMut::Column(_)
            | NodeViewMut::Filter(_)
            | NodeViewMut::DecisionOption(_) => Vec::new(),
        }
    }

    pub fn into_container(self, key: &ContainerKey) -> Option<ContainerMut<'a>> {
        self.into_containers()
            .into_iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, container)| container)
    }
}
